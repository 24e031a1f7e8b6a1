use std::fmt;

/// Badge prepended to the prompt while AI mode is on.
pub const AI_MARKER: &str = "[AI] ";
/// Prompt shown until the backend reports its own.
pub const DEFAULT_PROMPT: &str = "$ ";

/// Prompt text mirrored from the backend, plus the AI badge flag.
///
/// The badge is kept apart from the text so it can never be doubled or go stale
/// when the backend overwrites the prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prompt {
    text: String,
    ai_marker: bool,
}

impl Prompt {
    pub fn new(text: impl Into<String>) -> Self {
        let mut prompt = Self {
            text: String::new(),
            ai_marker: false,
        };
        prompt.replace(text);
        prompt
    }

    /// Prompt text without the badge.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn has_marker(&self) -> bool {
        self.ai_marker
    }

    pub fn set_marker(&mut self, on: bool) {
        self.ai_marker = on;
    }

    /// Overwrite the text with a backend-reported prompt. The badge flag is untouched;
    /// a badge already baked into `text` is stripped so it is never shown twice.
    pub fn replace(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.text = match text.strip_prefix(AI_MARKER) {
            Some(rest) => rest.to_string(),
            None => text,
        };
    }

    /// Text as displayed, badge included.
    pub fn render(&self) -> String {
        if self.ai_marker {
            format!("{}{}", AI_MARKER, self.text)
        } else {
            self.text.clone()
        }
    }
}

impl Default for Prompt {
    fn default() -> Self {
        Self::new(DEFAULT_PROMPT)
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ai_marker {
            f.write_str(AI_MARKER)?;
        }
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_added_and_removed() {
        let mut p = Prompt::new("user@host:~$ ");
        p.set_marker(true);
        assert_eq!(p.render(), "[AI] user@host:~$ ");
        p.set_marker(false);
        assert_eq!(p.render(), "user@host:~$ ");
    }

    #[test]
    fn set_marker_is_idempotent() {
        let mut p = Prompt::new("$ ");
        p.set_marker(true);
        p.set_marker(true);
        assert_eq!(p.render(), "[AI] $ ");
    }

    #[test]
    fn replace_keeps_marker() {
        let mut p = Prompt::new("old$ ");
        p.set_marker(true);
        p.replace("new$ ");
        assert_eq!(p.render(), "[AI] new$ ");
    }

    #[test]
    fn replace_strips_embedded_marker() {
        let mut p = Prompt::default();
        p.set_marker(true);
        p.replace("[AI] /tmp$ ");
        assert_eq!(p.text(), "/tmp$ ");
        assert_eq!(p.render(), "[AI] /tmp$ ");
    }

    #[test]
    fn display_matches_render() {
        let mut p = Prompt::new("x> ");
        assert_eq!(p.to_string(), p.render());
        p.set_marker(true);
        assert_eq!(p.to_string(), p.render());
    }
}
