//! The fixed tool set exposed to agents.
//!
//! Agents see two string-in/string-out operations. Both always return text:
//! a confirmation carrying the applied triple, or a readable error. They are
//! the only code path that writes the shared [`DisplayState`].

use std::sync::Arc;

use tracing::{info, warn};

use crate::command::Command;
use crate::resolver::{ResolveError, ResolveResult, Resolver};
use crate::state::DisplayState;

/// Name and description of one tool, as shown to an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
}

/// Tool name for [`Dispatcher::set_by_rgb`].
pub const SET_BY_RGB: &str = "set_by_rgb";
/// Tool name for [`Dispatcher::set_by_name`].
pub const SET_BY_NAME: &str = "set_by_name";

const TOOLS: [ToolSpec; 2] = [
    ToolSpec {
        name: SET_BY_RGB,
        description: "Change the display background and LED strip by providing an RGB value in 'R,G,B' format (e.g. '255,100,50').",
    },
    ToolSpec {
        name: SET_BY_NAME,
        description: "Change the display background and LED strip by providing a color name (e.g. 'teal'); the RGB value is looked up online.",
    },
];

/// Resolves command payloads and commits them to the display state.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    state: Arc<DisplayState>,
    resolver: Resolver,
}

impl Dispatcher {
    pub fn new(state: Arc<DisplayState>, resolver: Resolver) -> Self {
        Self { state, resolver }
    }

    /// The tools agents may call.
    pub fn tools() -> &'static [ToolSpec] {
        &TOOLS
    }

    /// Apply an explicit `R,G,B` triple.
    pub fn set_by_rgb(&self, text: &str) -> String {
        match self.commit(self.resolver.resolve_explicit(text)) {
            Ok(color) => format!("Set color to RGB: {}", color),
            Err(e) => failure_message(&e, text),
        }
    }

    /// Look a color name up and apply the triple found.
    pub fn set_by_name(&self, name: &str) -> String {
        let name = name.trim();
        match self.commit(self.resolver.resolve_by_name(name)) {
            Ok(color) => format!("Set color to RGB: {} (looked up '{}')", color, name),
            Err(e) => failure_message(&e, name),
        }
    }

    /// Call a tool by name.
    pub fn call(&self, tool: &str, input: &str) -> String {
        match tool {
            SET_BY_RGB => self.set_by_rgb(input),
            SET_BY_NAME => self.set_by_name(input),
            other => format!(
                "Unknown tool '{}'. Available tools: {}, {}.",
                other, SET_BY_RGB, SET_BY_NAME
            ),
        }
    }

    /// Run a command. `Terminate` belongs to the session and yields `None`.
    pub fn dispatch(&self, command: &Command) -> Option<String> {
        match command {
            Command::SetByRgb(text) => Some(self.set_by_rgb(text)),
            Command::SetByName(name) => Some(self.set_by_name(name)),
            Command::Terminate => None,
        }
    }

    fn commit(&self, resolved: ResolveResult) -> ResolveResult {
        match resolved {
            Ok(color) => {
                let snapshot = self.state.write(color);
                info!(%color, version = snapshot.version, "color applied");
                Ok(color)
            }
            Err(e) => {
                warn!(error = %e, retryable = e.is_retryable(), "color not applied");
                Err(e)
            }
        }
    }
}

fn failure_message(error: &ResolveError, payload: &str) -> String {
    match error {
        ResolveError::InvalidFormat { .. } => {
            "Invalid RGB format. Use 'R,G,B' (e.g., '255,100,50').".to_string()
        }
        ResolveError::OutOfRange { channel, value } => format!(
            "Invalid RGB value: {} channel is {}, but each channel must be between 0 and 255.",
            channel, value
        ),
        ResolveError::LookupFailed { reason } => format!(
            "Could not look up '{}' ({}). The lookup can be retried.",
            payload, reason
        ),
        ResolveError::NoTripleFound => format!(
            "Could not find RGB values for '{}'. Try another color.",
            payload
        ),
    }
}
