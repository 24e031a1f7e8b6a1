pub mod backend;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod history;
pub mod input;
pub mod mode;
pub mod prompt;
pub mod protocol;
pub mod render;
pub mod scrollback;
pub mod session;

// Re-exports
pub use backend::{Backend, HttpBackend};
pub use client::{Client, Effect, KeyAction, SessionState};
pub use config::ClientConfig;
pub use dispatch::{DispatchState, Submission, dispatch};
pub use error::{ConfigError, TransportError};
pub use history::{History, Recall};
pub use input::InputLine;
pub use mode::{Mode, ModeController};
pub use prompt::Prompt;
pub use protocol::{AiOutcome, CommandResult, ExecuteReply, ExecuteRequest, NormalOutcome, SystemInfo};
pub use render::{Rendered, render_reply};
pub use scrollback::{LineStyle, ScrollLine, Scrollback};
pub use session::SessionId;
