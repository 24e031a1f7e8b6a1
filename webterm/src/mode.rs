use crate::prompt::Prompt;
use crate::scrollback::ScrollLine;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    Ai,
}

impl Mode {
    pub fn is_ai(self) -> bool {
        self == Mode::Ai
    }

    pub fn flipped(self) -> Self {
        match self {
            Mode::Normal => Mode::Ai,
            Mode::Ai => Mode::Normal,
        }
    }
}

/// Owns the AI mode flag and keeps the prompt badge in step with it.
#[derive(Debug, Default)]
pub struct ModeController {
    mode: Mode,
}

impl ModeController {
    pub fn new(mode: Mode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_ai(&self) -> bool {
        self.mode.is_ai()
    }

    /// Text of the mode-toggle control.
    pub fn label(&self) -> &'static str {
        match self.mode {
            Mode::Ai => "AI Mode: ON",
            Mode::Normal => "AI Mode: OFF",
        }
    }

    /// Flip the mode, rewrite the prompt badge and return the announcement line.
    pub fn toggle(&mut self, prompt: &mut Prompt) -> ScrollLine {
        self.mode = self.mode.flipped();
        self.apply(prompt)
    }

    /// Switch to `mode`. `None` when already there.
    pub fn set(&mut self, mode: Mode, prompt: &mut Prompt) -> Option<ScrollLine> {
        if self.mode == mode {
            return None;
        }
        self.mode = mode;
        Some(self.apply(prompt))
    }

    fn apply(&self, prompt: &mut Prompt) -> ScrollLine {
        prompt.set_marker(self.mode.is_ai());
        match self.mode {
            Mode::Ai => ScrollLine::info("AI Mode enabled. Use natural language commands."),
            Mode::Normal => ScrollLine::info("Normal terminal mode enabled."),
        }
    }
}
