//! Agents that turn operator text into dispatcher tool calls.
//!
//! An agent receives one line of operator input and the [`Dispatcher`], may
//! call its tools any number of times, and answers with text for the
//! operator. Two implementations exist:
//! - [`RuleAgent`]: offline pattern matching, no network
//! - [`CliAgent`]: delegates to an installed LLM CLI (claude, gemini, codex)

mod cli;
mod rules;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::dispatch::Dispatcher;

pub use cli::{build_prompt, parse_plan, AgentPlan, CliAgent, ToolCall};
pub use rules::RuleAgent;

/// Result type for agent operations.
pub type AgentResult<T> = Result<T, AgentError>;

/// Errors from an agent.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("agent not available: {0}")]
    NotAvailable(String),

    #[error("agent timed out after {0:?}")]
    Timeout(Duration),

    #[error("agent exited with code {code}: {stderr}")]
    ExitCode { code: i32, stderr: String },

    #[error("agent returned an unusable response: {0}")]
    InvalidResponse(String),

    #[error("agent I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Interprets operator input using the dispatcher's tools.
pub trait Agent: Send {
    /// Human-readable name.
    fn name(&self) -> &'static str;

    /// Handle one line of operator input.
    fn respond(&mut self, input: &str, tools: &Dispatcher) -> AgentResult<String>;
}

/// Which agent implementation to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    /// Built-in pattern matching, works offline
    #[default]
    Rules,
    /// Claude CLI
    Claude,
    /// Gemini CLI
    Gemini,
    /// Codex CLI
    Codex,
}

impl AgentKind {
    /// Build the agent. CLI agents are bounded by `timeout` per request.
    pub fn build(self, timeout: Duration) -> Box<dyn Agent> {
        match self {
            Self::Rules => Box::new(RuleAgent::new()),
            Self::Claude => Box::new(CliAgent::claude(timeout)),
            Self::Gemini => Box::new(CliAgent::gemini(timeout)),
            Self::Codex => Box::new(CliAgent::codex(timeout)),
        }
    }
}
