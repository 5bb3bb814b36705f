//! Offline rule-based agent.
//!
//! Understands two shapes of input:
//! - anything containing a numeric triple, e.g. `set to 0,255,0`
//! - a color name after an optional lead-in, e.g. `make it teal`

use once_cell::sync::Lazy;
use regex::Regex;

use super::{Agent, AgentResult};
use crate::command::Command;
use crate::dispatch::Dispatcher;

/// Loose triple: signs and decimals are captured so the dispatcher can reject
/// them with a proper message instead of silently using part of the number.
static LOOSE_TRIPLE: Lazy<Regex> = Lazy::new(|| {
    let num = r"-?[0-9]+(?:\.[0-9]+)?";
    Regex::new(&format!(r"{num}\s*,\s*{num}\s*,\s*{num}"))
        .unwrap_or_else(|e| panic!("triple pattern must compile: {}", e))
});

/// Lead-in phrases stripped before a color name, longest first.
const LEAD_INS: &[&str] = &[
    "change the color to",
    "set the color to",
    "change color to",
    "set color to",
    "change it to",
    "set it to",
    "change to",
    "set to",
    "make it",
    "turn it",
    "colour",
    "color",
    "turn",
    "make",
    "use",
];

const HELP: &str =
    "Tell me a color name (e.g. 'teal') or an RGB value (e.g. '255,100,50'). Type 'exit' to quit.";

/// Pattern-matching agent with no external dependencies.
#[derive(Debug, Clone, Default)]
pub struct RuleAgent;

impl RuleAgent {
    pub fn new() -> Self {
        Self
    }

    /// Turn a line into a dispatcher command, if it names a color.
    pub fn interpret(line: &str) -> Option<Command> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        if let Some(m) = LOOSE_TRIPLE.find(line) {
            return Some(Command::SetByRgb(m.as_str().to_string()));
        }

        let name = strip_lead_in(line)
            .trim()
            .trim_end_matches(['.', '!', '?'])
            .trim();
        if name.is_empty() {
            None
        } else {
            Some(Command::SetByName(name.to_string()))
        }
    }
}

fn strip_lead_in(line: &str) -> &str {
    for lead in LEAD_INS {
        let Some(head) = line.get(..lead.len()) else {
            continue;
        };
        if !head.eq_ignore_ascii_case(lead) {
            continue;
        }
        let rest = &line[lead.len()..];
        if rest.is_empty() || rest.starts_with(char::is_whitespace) {
            return rest;
        }
    }
    line
}

impl Agent for RuleAgent {
    fn name(&self) -> &'static str {
        "rules"
    }

    fn respond(&mut self, input: &str, tools: &Dispatcher) -> AgentResult<String> {
        Ok(Self::interpret(input)
            .and_then(|command| tools.dispatch(&command))
            .unwrap_or_else(|| HELP.to_string()))
    }
}
