//! Operator commands.

/// Words that end a session, matched case-insensitively on the whole line.
pub const EXIT_KEYWORDS: [&str; 2] = ["exit", "quit"];

/// One command for the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Apply an explicit `R,G,B` triple (raw, unvalidated text).
    SetByRgb(String),
    /// Look a color name up and apply the result.
    SetByName(String),
    /// End the session and stop rendering.
    Terminate,
}

impl Command {
    /// Session control command typed at the prompt, if `line` is one.
    ///
    /// Control commands are acted on by the session itself and never reach
    /// the agent. Currently the only one is [`Command::Terminate`].
    pub fn control(line: &str) -> Option<Command> {
        Self::is_exit_keyword(line).then_some(Command::Terminate)
    }

    /// Whether `line` is an exit keyword.
    pub fn is_exit_keyword(line: &str) -> bool {
        let line = line.trim();
        EXIT_KEYWORDS
            .iter()
            .any(|keyword| line.eq_ignore_ascii_case(keyword))
    }
}
