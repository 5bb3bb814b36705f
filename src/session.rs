//! Interactive command session.
//!
//! Reads operator lines, hands them to the agent, prints the agent's answer,
//! and owns shutdown: an exit keyword (or end of input) prints a farewell and
//! triggers the [`ShutdownSignal`] the render loop is watching.

use std::io::{self, BufRead, Write};

use tracing::{debug, warn};

use crate::agent::Agent;
use crate::command::Command;
use crate::dispatch::Dispatcher;
use crate::shutdown::ShutdownSignal;
use crate::theme::Theme;

/// Printed when the session ends.
pub const FAREWELL: &str = "Goodbye!";

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Operator typed an exit keyword.
    Exited,
    /// Input stream closed.
    EndOfInput,
    /// Shutdown was requested elsewhere (e.g. Ctrl-C).
    Interrupted,
}

/// Line-oriented loop between the operator and the agent.
pub struct CommandSession<R: BufRead, W: Write> {
    input: R,
    output: W,
    agent: Box<dyn Agent>,
    dispatcher: Dispatcher,
    shutdown: ShutdownSignal,
    theme: Theme,
    show_prompt: bool,
}

impl<R: BufRead, W: Write> CommandSession<R, W> {
    pub fn new(
        input: R,
        output: W,
        agent: Box<dyn Agent>,
        dispatcher: Dispatcher,
        shutdown: ShutdownSignal,
    ) -> Self {
        Self {
            input,
            output,
            agent,
            dispatcher,
            shutdown,
            theme: Theme::plain(),
            show_prompt: false,
        }
    }

    /// Use `theme` for output coloring.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Print a `You: ` prompt before each read.
    pub fn with_prompt(mut self, show_prompt: bool) -> Self {
        self.show_prompt = show_prompt;
        self
    }

    /// Consume the session and return the output writer (for tests).
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run until exit, end of input, or external shutdown.
    ///
    /// Shutdown is always triggered before this returns, including when
    /// reading or writing fails or the agent panics.
    pub fn run(&mut self) -> io::Result<SessionOutcome> {
        let _trigger = TriggerOnDrop(self.shutdown.clone());
        self.run_inner()
    }

    fn run_inner(&mut self) -> io::Result<SessionOutcome> {
        writeln!(
            self.output,
            "{}",
            self.theme.secondary_text(&format!(
                "Agent: {}. Type a color or 'exit' to quit.",
                self.agent.name()
            ))
        )?;

        let mut line = String::new();
        loop {
            if self.shutdown.is_triggered() {
                return Ok(SessionOutcome::Interrupted);
            }

            if self.show_prompt {
                write!(self.output, "{}", self.theme.primary_text("You: "))?;
                self.output.flush()?;
            }

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                self.farewell()?;
                return Ok(SessionOutcome::EndOfInput);
            }

            let request = line.trim();
            if request.is_empty() {
                continue;
            }
            if let Some(Command::Terminate) = Command::control(request) {
                self.farewell()?;
                return Ok(SessionOutcome::Exited);
            }

            debug!(agent = self.agent.name(), %request, "forwarding to agent");
            match self.agent.respond(request, &self.dispatcher) {
                Ok(reply) => {
                    writeln!(self.output, "{}", self.theme.accent_text(&format!("AI: {}", reply)))?
                }
                Err(e) => {
                    warn!(agent = self.agent.name(), error = %e, "agent request failed");
                    writeln!(self.output, "{}", self.theme.error_text(&format!("Error: {}", e)))?
                }
            }
            self.output.flush()?;
        }
    }

    fn farewell(&mut self) -> io::Result<()> {
        writeln!(self.output, "{}", self.theme.secondary_text(FAREWELL))?;
        self.output.flush()
    }
}

/// Triggers shutdown when dropped, so unwinding out of the session still
/// stops the render loop.
struct TriggerOnDrop(ShutdownSignal);

impl Drop for TriggerOnDrop {
    fn drop(&mut self) {
        self.0.trigger();
    }
}
