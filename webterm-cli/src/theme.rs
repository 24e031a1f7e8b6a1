use ratatui::style::{Color, Modifier, Style};
use webterm_core::LineStyle;

// ── Formwork: warm olive-tinted blacks ──────────────────────────────
pub const FORM: Color = Color::Rgb(14, 13, 11);
pub const FORM_RAISED: Color = Color::Rgb(20, 20, 18);

// ── Ash: structural greys ──────────────────────────────────────────
pub const ASH: Color = Color::Rgb(42, 42, 40);
pub const ASH_MID: Color = Color::Rgb(74, 74, 68);
pub const ASH_TEXT: Color = Color::Rgb(90, 90, 80);

// ── Chalk: text hierarchy ──────────────────────────────────────────
pub const CHALK_DIM: Color = Color::Rgb(122, 122, 112);
pub const CHALK_MID: Color = Color::Rgb(200, 196, 184);
pub const CHALK: Color = Color::Rgb(232, 228, 208);

// ── Accent colors ──────────────────────────────────────────────────
pub const SODIUM: Color = Color::Rgb(232, 163, 60);
pub const LICHEN: Color = Color::Rgb(138, 158, 108);
pub const ERROR: Color = Color::Rgb(204, 68, 68);
pub const SIGNAL: Color = Color::Rgb(110, 160, 190);

pub const STATUS_SEP: &str = " · ";

// ── Scrollback line categories ─────────────────────────────────────

pub fn line(style: LineStyle) -> Style {
    match style {
        LineStyle::CommandExecuted => Style::default().fg(CHALK).add_modifier(Modifier::BOLD),
        LineStyle::Success => Style::default().fg(CHALK_MID),
        LineStyle::Error => Style::default().fg(ERROR),
        LineStyle::Info => Style::default().fg(SIGNAL),
        LineStyle::AiInterpretation => Style::default().fg(SODIUM).add_modifier(Modifier::ITALIC),
    }
}

/// Welcome banner at the top of the scrollback
pub fn banner() -> Style {
    Style::default().fg(ASH_TEXT)
}

/// First banner line
pub fn banner_title() -> Style {
    Style::default().fg(SODIUM).add_modifier(Modifier::BOLD)
}

// ── Chrome ─────────────────────────────────────────────────────────

/// Prompt text in front of the input line
pub fn prompt() -> Style {
    Style::default().fg(LICHEN).add_modifier(Modifier::BOLD)
}

/// `[AI] ` badge in front of the prompt
pub fn ai_badge() -> Style {
    Style::default().fg(SODIUM).add_modifier(Modifier::BOLD)
}

/// User-typed text after the prompt
pub fn user_input() -> Style {
    Style::default().fg(CHALK_MID)
}

/// Input area border
pub fn input_border() -> Style {
    Style::default().fg(ASH)
}

/// "webterm" title in status bar
pub fn app_title() -> Style {
    Style::default().fg(SODIUM).add_modifier(Modifier::BOLD)
}

/// Session id / server url in status bar
pub fn status_detail() -> Style {
    Style::default().fg(CHALK_DIM)
}

/// Status bar separator ( · )
pub fn status_separator() -> Style {
    Style::default().fg(ASH_MID)
}

/// Mode label when AI mode is on
pub fn mode_on() -> Style {
    Style::default().fg(SODIUM).add_modifier(Modifier::BOLD)
}

/// Mode label when AI mode is off
pub fn mode_off() -> Style {
    Style::default().fg(ASH_MID)
}

/// Spinner character
pub fn spinner() -> Style {
    Style::default().fg(SODIUM)
}

/// Help bar key labels
pub fn help_key() -> Style {
    Style::default().fg(SODIUM).add_modifier(Modifier::BOLD)
}

/// Help bar descriptions
pub fn help_desc() -> Style {
    Style::default().fg(ASH_MID)
}

/// Status bar and help bar background
pub fn bar_bg() -> Style {
    Style::default().bg(FORM_RAISED)
}

/// History area background
pub fn history_bg() -> Style {
    Style::default().bg(FORM)
}

/// Scroll mode indicator in status bar
pub fn scroll_indicator() -> Style {
    Style::default().fg(SODIUM).add_modifier(Modifier::BOLD)
}
