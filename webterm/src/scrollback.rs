/// Style category of a rendered line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineStyle {
    CommandExecuted,
    Success,
    Error,
    Info,
    AiInterpretation,
}

impl LineStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            LineStyle::CommandExecuted => "command-executed",
            LineStyle::Success => "success",
            LineStyle::Error => "error",
            LineStyle::Info => "info",
            LineStyle::AiInterpretation => "ai-interpretation",
        }
    }

    /// Style for command output given its exit status. A missing code counts as failure.
    pub fn for_return_code(code: Option<i32>) -> Self {
        if code == Some(0) {
            LineStyle::Success
        } else {
            LineStyle::Error
        }
    }
}

/// One rendered entry. `text` may span several physical lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrollLine {
    pub text: String,
    pub style: LineStyle,
}

impl ScrollLine {
    pub fn new(text: impl Into<String>, style: LineStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, LineStyle::Error)
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, LineStyle::Info)
    }
}

pub const WELCOME_BANNER: &[&str] = &[
    "webterm \u{b7} remote terminal client",
    "Type commands and press Enter. Ctrl+A toggles AI mode for natural language.",
    "Type 'clear' or press Ctrl+L to clear the screen, 'exit' to quit.",
];

/// Append-only log of rendered lines, below a permanent banner.
#[derive(Debug)]
pub struct Scrollback {
    banner: Vec<String>,
    lines: Vec<ScrollLine>,
}

impl Scrollback {
    pub fn new() -> Self {
        Self::with_banner(WELCOME_BANNER.iter().map(|s| s.to_string()).collect())
    }

    pub fn with_banner(banner: Vec<String>) -> Self {
        Self {
            banner,
            lines: Vec::new(),
        }
    }

    pub fn push(&mut self, line: ScrollLine) {
        self.lines.push(line);
    }

    pub fn extend(&mut self, lines: impl IntoIterator<Item = ScrollLine>) {
        self.lines.extend(lines);
    }

    /// Drop every rendered line. The banner is a fixture and survives.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn banner(&self) -> &[String] {
        &self.banner
    }

    pub fn lines(&self) -> &[ScrollLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Default for Scrollback {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_keeps_banner() {
        let mut sb = Scrollback::new();
        sb.push(ScrollLine::info("hello"));
        sb.push(ScrollLine::error("boom"));
        sb.clear();
        assert!(sb.is_empty());
        assert_eq!(sb.banner().len(), WELCOME_BANNER.len());
    }

    #[test]
    fn lines_keep_arrival_order() {
        let mut sb = Scrollback::with_banner(Vec::new());
        sb.push(ScrollLine::info("1"));
        sb.extend([ScrollLine::info("2"), ScrollLine::info("3")]);
        let texts: Vec<&str> = sb.lines().iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, ["1", "2", "3"]);
    }

    #[test]
    fn return_code_style() {
        assert_eq!(LineStyle::for_return_code(Some(0)), LineStyle::Success);
        assert_eq!(LineStyle::for_return_code(Some(1)), LineStyle::Error);
        assert_eq!(LineStyle::for_return_code(Some(-1)), LineStyle::Error);
        assert_eq!(LineStyle::for_return_code(None), LineStyle::Error);
    }

    #[test]
    fn style_names() {
        assert_eq!(LineStyle::CommandExecuted.as_str(), "command-executed");
        assert_eq!(LineStyle::AiInterpretation.as_str(), "ai-interpretation");
    }
}
