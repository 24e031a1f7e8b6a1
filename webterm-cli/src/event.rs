use crossterm::event::{Event as TermEvent, KeyCode, KeyEvent, KeyModifiers};
use webterm_core::{ExecuteReply, KeyAction, TransportError};

/// Unified event type for the main loop.
pub enum AppEvent {
    Terminal(TermEvent),
    /// Outcome of an `/execute` round-trip.
    Reply(Result<ExecuteReply, TransportError>),
    /// Outcome of the start-up prompt sync.
    SystemInfo(Result<Option<String>, TransportError>),
    Tick,
    Quit,
}

/// Plain edits of the input line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edit {
    Insert(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyInput {
    Action(KeyAction),
    Edit(Edit),
    PageUp,
    PageDown,
    Quit,
    Ignore,
}

/// Map a key press to what the client should do with it.
pub fn classify_key(key: &KeyEvent) -> KeyInput {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl {
        return match key.code {
            KeyCode::Char('c') => KeyInput::Quit,
            KeyCode::Char('a') => KeyInput::Action(KeyAction::ToggleMode),
            KeyCode::Char('l') => KeyInput::Action(KeyAction::Clear),
            _ => KeyInput::Ignore,
        };
    }
    match key.code {
        KeyCode::Enter => KeyInput::Action(KeyAction::Submit),
        KeyCode::Up => KeyInput::Action(KeyAction::RecallOlder),
        KeyCode::Down => KeyInput::Action(KeyAction::RecallNewer),
        KeyCode::Tab => KeyInput::Action(KeyAction::Complete),
        KeyCode::Backspace => KeyInput::Edit(Edit::Backspace),
        KeyCode::Delete => KeyInput::Edit(Edit::Delete),
        KeyCode::Left => KeyInput::Edit(Edit::Left),
        KeyCode::Right => KeyInput::Edit(Edit::Right),
        KeyCode::Home => KeyInput::Edit(Edit::Home),
        KeyCode::End => KeyInput::Edit(Edit::End),
        KeyCode::PageUp => KeyInput::PageUp,
        KeyCode::PageDown => KeyInput::PageDown,
        KeyCode::Char(c) => KeyInput::Edit(Edit::Insert(c)),
        _ => KeyInput::Ignore,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn key_contract() {
        assert_eq!(classify_key(&key(KeyCode::Enter)), KeyInput::Action(KeyAction::Submit));
        assert_eq!(classify_key(&key(KeyCode::Up)), KeyInput::Action(KeyAction::RecallOlder));
        assert_eq!(classify_key(&key(KeyCode::Down)), KeyInput::Action(KeyAction::RecallNewer));
        assert_eq!(classify_key(&key(KeyCode::Tab)), KeyInput::Action(KeyAction::Complete));
    }

    #[test]
    fn control_keys() {
        assert_eq!(classify_key(&ctrl('c')), KeyInput::Quit);
        assert_eq!(classify_key(&ctrl('a')), KeyInput::Action(KeyAction::ToggleMode));
        assert_eq!(classify_key(&ctrl('l')), KeyInput::Action(KeyAction::Clear));
        assert_eq!(classify_key(&ctrl('z')), KeyInput::Ignore);
    }

    #[test]
    fn text_goes_to_input_line() {
        assert_eq!(classify_key(&key(KeyCode::Char('x'))), KeyInput::Edit(Edit::Insert('x')));
        let shifted = KeyEvent::new(KeyCode::Char('X'), KeyModifiers::SHIFT);
        assert_eq!(classify_key(&shifted), KeyInput::Edit(Edit::Insert('X')));
        assert_eq!(classify_key(&key(KeyCode::Backspace)), KeyInput::Edit(Edit::Backspace));
    }
}
