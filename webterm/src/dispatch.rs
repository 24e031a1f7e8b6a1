use crate::backend::Backend;
use crate::error::TransportError;
use crate::protocol::{ExecuteReply, ExecuteRequest};

/// What a submitted line turned into.
#[derive(Debug, PartialEq, Eq)]
pub enum Submission {
    /// Blank input; nothing happened.
    Ignored,
    /// `clear` was handled locally; no request.
    ClearedLocally,
    /// `exit` / `quit`.
    Quit,
    /// Send this to the backend, then feed the outcome to `Client::apply_reply`.
    Request(ExecuteRequest),
}

/// Dispatcher side of the interaction state machine.
///
/// Submissions never wait for earlier replies, so several requests can be
/// outstanding; their replies are rendered in whatever order they resolve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DispatchState {
    #[default]
    Idle,
    Awaiting(usize),
}

impl DispatchState {
    pub fn begin(self) -> Self {
        DispatchState::Awaiting(self.pending() + 1)
    }

    pub fn finish(self) -> Self {
        match self.pending() {
            0 | 1 => DispatchState::Idle,
            n => DispatchState::Awaiting(n - 1),
        }
    }

    pub fn pending(self) -> usize {
        match self {
            DispatchState::Idle => 0,
            DispatchState::Awaiting(n) => n,
        }
    }

    pub fn is_idle(self) -> bool {
        self == DispatchState::Idle
    }
}

/// Commands handled without a round-trip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocalCommand {
    Clear,
    Quit,
}

pub fn local_command(command: &str) -> Option<LocalCommand> {
    let command = command.trim();
    if command.eq_ignore_ascii_case("clear") {
        Some(LocalCommand::Clear)
    } else if command.eq_ignore_ascii_case("exit") || command.eq_ignore_ascii_case("quit") {
        Some(LocalCommand::Quit)
    } else {
        None
    }
}

/// The one suspension point: hand a request to the backend and return its typed outcome.
/// No retries and no local timeout.
pub async fn dispatch(
    backend: &dyn Backend,
    request: ExecuteRequest,
) -> Result<ExecuteReply, TransportError> {
    tracing::debug!(command = %request.command, ai_mode = request.ai_mode, "dispatching");
    let result = backend.execute(&request).await;
    if let Err(err) = &result {
        tracing::warn!(command = %request.command, error = %err, "request failed");
    }
    result
}
