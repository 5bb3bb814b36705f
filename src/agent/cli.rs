//! Agent backed by an LLM command-line tool.
//!
//! The CLI is asked to answer with a JSON plan naming the tool calls to make.
//! The calls are executed here, in order, through the dispatcher, so the
//! model never touches the display state directly.

use std::process::Command;
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use super::{Agent, AgentError, AgentResult};
use crate::dispatch::Dispatcher;
use crate::process::{command_exists, run_with_timeout};

/// One requested tool call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ToolCall {
    pub tool: String,
    pub input: String,
}

/// What the model wants done for one operator message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AgentPlan {
    #[serde(default)]
    pub calls: Vec<ToolCall>,
    #[serde(default)]
    pub reply: String,
}

/// Agent that shells out to `claude`, `gemini` or `codex`.
#[derive(Debug, Clone)]
pub struct CliAgent {
    name: &'static str,
    program: &'static str,
    args: &'static [&'static str],
    timeout: Duration,
}

impl CliAgent {
    /// `claude --print <prompt>`
    pub fn claude(timeout: Duration) -> Self {
        Self {
            name: "Claude",
            program: "claude",
            args: &["--print"],
            timeout,
        }
    }

    /// `gemini --prompt <prompt>`
    pub fn gemini(timeout: Duration) -> Self {
        Self {
            name: "Gemini",
            program: "gemini",
            args: &["--prompt"],
            timeout,
        }
    }

    /// `codex exec <prompt>`
    pub fn codex(timeout: Duration) -> Self {
        Self {
            name: "Codex",
            program: "codex",
            args: &["exec"],
            timeout,
        }
    }

    fn invoke(&self, prompt: &str) -> AgentResult<String> {
        if !command_exists(self.program) {
            return Err(AgentError::NotAvailable(format!(
                "{} CLI not found in PATH",
                self.program
            )));
        }

        let output = run_with_timeout(
            Command::new(self.program).args(self.args).arg(prompt),
            self.timeout,
        )
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::TimedOut => AgentError::Timeout(self.timeout),
            _ => AgentError::Io(e),
        })?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).to_string())
        } else {
            Err(AgentError::ExitCode {
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

impl Agent for CliAgent {
    fn name(&self) -> &'static str {
        self.name
    }

    fn respond(&mut self, input: &str, tools: &Dispatcher) -> AgentResult<String> {
        let response = self.invoke(&build_prompt(input))?;
        let plan = parse_plan(&response)?;
        debug!(agent = self.name, calls = plan.calls.len(), "agent plan received");
        Ok(execute_plan(&plan, tools))
    }
}

/// Prompt listing the tools and the expected JSON answer.
pub fn build_prompt(input: &str) -> String {
    let mut prompt = String::from(
        "You control the background color of a display and an RGB LED strip.\n\
         Available tools:\n",
    );
    for tool in Dispatcher::tools() {
        prompt.push_str(&format!("- {}: {}\n", tool.name, tool.description));
    }
    prompt.push_str(
        "\nAnswer with only a JSON object of the form\n\
         {\"calls\": [{\"tool\": \"<tool name>\", \"input\": \"<tool input>\"}], \"reply\": \"<short message for the operator>\"}\n\
         Use an empty \"calls\" list if no color change is needed.\n\nOperator: ",
    );
    prompt.push_str(input.trim());
    prompt
}

/// Extract the JSON plan from a response, tolerating surrounding prose and
/// markdown code fences.
pub fn parse_plan(response: &str) -> AgentResult<AgentPlan> {
    let start = response.find('{');
    let end = response.rfind('}');
    let json = match (start, end) {
        (Some(start), Some(end)) if start < end => &response[start..=end],
        _ => {
            return Err(AgentError::InvalidResponse(
                "no JSON object in response".to_string(),
            ))
        }
    };
    serde_json::from_str(json).map_err(|e| AgentError::InvalidResponse(e.to_string()))
}

fn execute_plan(plan: &AgentPlan, tools: &Dispatcher) -> String {
    let mut lines: Vec<String> = plan
        .calls
        .iter()
        .map(|call| tools.call(&call.tool, &call.input))
        .collect();
    let reply = plan.reply.trim();
    if !reply.is_empty() {
        lines.push(reply.to_string());
    }
    if lines.is_empty() {
        lines.push("(no response)".to_string());
    }
    lines.join("\n")
}
