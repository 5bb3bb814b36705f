//! huectl - drive a display background and an LED strip from color commands
//!
//! An operator types free-form requests ("make it teal", "set to 0,255,0").
//! An agent turns them into calls on a small fixed tool set, the tools
//! resolve the request to an RGB triple, and a render loop on its own thread
//! pushes the current color to the outputs at a fixed rate.
//!
//! # Threads
//!
//! - session thread: [`session::CommandSession`] → [`agent::Agent`] →
//!   [`dispatch::Dispatcher`] → [`resolver`] (may block on a lookup)
//! - render thread: [`render::RenderLoop`] → sinks (never blocks on the network)
//!
//! The two meet only at [`state::DisplayState`] and [`shutdown::ShutdownSignal`].

pub mod agent;
pub mod color;
pub mod command;
pub mod config;
pub mod dispatch;
pub mod logging;
pub mod process;
pub mod render;
pub mod resolver;
pub mod session;
pub mod shutdown;
pub mod state;
pub mod theme;

pub use color::RgbColor;
pub use command::Command;
pub use config::Config;
pub use dispatch::Dispatcher;
pub use render::{RenderLoop, RenderPhase, RenderReport};
pub use resolver::{resolve_explicit, ResolveError, Resolver};
pub use session::{CommandSession, SessionOutcome};
pub use shutdown::ShutdownSignal;
pub use state::{DisplayState, Snapshot};
