use crate::dispatch::{DispatchState, LocalCommand, Submission, local_command};
use crate::error::TransportError;
use crate::history::{History, Recall};
use crate::input::InputLine;
use crate::mode::{Mode, ModeController};
use crate::prompt::Prompt;
use crate::protocol::{ExecuteReply, ExecuteRequest};
use crate::render::{render_reply, render_transport_error};
use crate::scrollback::{LineStyle, ScrollLine, Scrollback};
use crate::session::SessionId;

/// Key-level intents the controller understands. Plain text editing goes
/// straight to [`Client::input_mut`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Enter
    Submit,
    /// ArrowUp
    RecallOlder,
    /// ArrowDown
    RecallNewer,
    /// Tab. Reserved for completion, which is not implemented.
    Complete,
    ToggleMode,
    Clear,
}

/// What the event loop has to do after a key was handled.
#[derive(Debug, PartialEq, Eq)]
pub enum Effect {
    None,
    Send(ExecuteRequest),
    Quit,
}

/// Everything the client owns for one session.
#[derive(Debug)]
pub struct SessionState {
    pub session_id: SessionId,
    pub prompt: Prompt,
    pub history: History,
    pub mode: ModeController,
    pub scrollback: Scrollback,
    pub input: InputLine,
    pub dispatch: DispatchState,
}

/// The interaction controller: composes history, dispatcher, renderer and mode.
///
/// Every method is synchronous. Network I/O happens outside, between
/// [`Client::submit`] handing out a request and [`Client::apply_reply`] taking the outcome.
#[derive(Debug)]
pub struct Client {
    state: SessionState,
}

impl Client {
    pub fn new(session_id: SessionId, mode: Mode) -> Self {
        Self::with_scrollback(session_id, mode, Scrollback::new())
    }

    pub fn with_scrollback(session_id: SessionId, mode: Mode, scrollback: Scrollback) -> Self {
        let mut prompt = Prompt::default();
        prompt.set_marker(mode.is_ai());
        Self {
            state: SessionState {
                session_id,
                prompt,
                history: History::new(),
                mode: ModeController::new(mode),
                scrollback,
                input: InputLine::new(),
                dispatch: DispatchState::Idle,
            },
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn session_id(&self) -> &SessionId {
        &self.state.session_id
    }

    pub fn input(&self) -> &InputLine {
        &self.state.input
    }

    pub fn input_mut(&mut self) -> &mut InputLine {
        &mut self.state.input
    }

    pub fn mode_label(&self) -> &'static str {
        self.state.mode.label()
    }

    pub fn handle_key(&mut self, action: KeyAction) -> Effect {
        match action {
            KeyAction::Submit => match self.submit() {
                Submission::Request(request) => return Effect::Send(request),
                Submission::Quit => return Effect::Quit,
                Submission::Ignored | Submission::ClearedLocally => {}
            },
            KeyAction::RecallOlder => self.recall(Recall::Older),
            KeyAction::RecallNewer => self.recall(Recall::Newer),
            KeyAction::Complete => {}
            KeyAction::ToggleMode => self.toggle_mode(),
            KeyAction::Clear => self.clear(),
        }
        Effect::None
    }

    /// Take the input line and turn it into a [`Submission`].
    pub fn submit(&mut self) -> Submission {
        let command = self.state.input.text().trim().to_string();
        if command.is_empty() {
            return Submission::Ignored;
        }
        self.state.history.record(&command);
        self.state.scrollback.push(ScrollLine::new(
            format!("{}{}", self.state.prompt.render(), command),
            LineStyle::CommandExecuted,
        ));
        self.state.input.take();

        // Local commands skip only the request.
        match local_command(&command) {
            Some(LocalCommand::Quit) => return Submission::Quit,
            Some(LocalCommand::Clear) => {
                self.clear();
                return Submission::ClearedLocally;
            }
            None => {}
        }

        self.state.dispatch = self.state.dispatch.begin();
        Submission::Request(ExecuteRequest {
            command,
            session_id: self.state.session_id.clone(),
            ai_mode: self.state.mode.is_ai(),
        })
    }

    /// Replace the input line with a history entry. No-op recalls leave it untouched.
    pub fn recall(&mut self, direction: Recall) {
        if let Some(text) = self.state.history.recall(direction) {
            self.state.input.replace(text);
        }
    }

    pub fn toggle_mode(&mut self) {
        let line = self.state.mode.toggle(&mut self.state.prompt);
        self.state.scrollback.push(line);
    }

    /// Clear rendered output. History, session and mode are untouched.
    pub fn clear(&mut self) {
        self.state.scrollback.clear();
    }

    /// Render the outcome of a request handed out by [`Client::submit`].
    ///
    /// How the reply renders is decided by the reply itself, not by the current
    /// toggle, so a mode flip while a request is in flight cannot garble it.
    pub fn apply_reply(&mut self, reply: Result<ExecuteReply, TransportError>) {
        self.state.dispatch = self.state.dispatch.finish();
        let reply = match reply {
            Ok(reply) => reply,
            Err(err) => {
                self.state.scrollback.push(render_transport_error(&err));
                return;
            }
        };

        let rendered = render_reply(&reply);
        self.state.scrollback.extend(rendered.lines);
        if let Some(mode) = rendered.directive
            && let Some(line) = self.state.mode.set(mode, &mut self.state.prompt)
        {
            self.state.scrollback.push(line);
        }
        if let Some(prompt) = reply.prompt() {
            self.state.prompt.replace(prompt);
        }
    }

    /// Apply the start-up prompt sync. Failure keeps the current prompt.
    pub fn apply_system_info(&mut self, prompt: Result<Option<String>, TransportError>) {
        match prompt {
            Ok(Some(prompt)) => self.state.prompt.replace(prompt),
            Ok(None) => {}
            Err(err) => tracing::warn!(error = %err, "could not load system info"),
        }
    }
}
