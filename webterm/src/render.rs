use crate::error::TransportError;
use crate::mode::Mode;
use crate::protocol::{AiOutcome, ExecuteReply, NormalOutcome};
use crate::scrollback::{LineStyle, ScrollLine};

pub const UNKNOWN_ERROR: &str = "Unknown error";
pub const INTERPRETATION_FAILED: &str = "Could not interpret natural language command";

/// Output the backend uses to ask the client to switch mode (`ai` / `normal` commands).
const DIRECTIVE_PREFIX: &str = "terminal_command:";

/// Lines produced for one reply, plus a mode switch requested by the backend.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Rendered {
    pub lines: Vec<ScrollLine>,
    pub directive: Option<Mode>,
}

/// Turn a decoded reply into scrollback lines. Pure: no state is touched.
pub fn render_reply(reply: &ExecuteReply) -> Rendered {
    match reply {
        ExecuteReply::Failure { error } => Rendered {
            lines: vec![ScrollLine::error(
                error.as_deref().unwrap_or(UNKNOWN_ERROR),
            )],
            directive: None,
        },
        ExecuteReply::Normal(outcome) => render_normal(outcome),
        ExecuteReply::Ai(outcome) => Rendered {
            lines: render_ai(outcome),
            directive: None,
        },
    }
}

pub fn render_transport_error(err: &TransportError) -> ScrollLine {
    ScrollLine::error(format!("Network error: {}", err))
}

fn render_normal(outcome: &NormalOutcome) -> Rendered {
    let mut rendered = Rendered::default();
    if let Some(output) = &outcome.output {
        match parse_directive(output) {
            Some(mode) if outcome.return_code == Some(0) => rendered.directive = Some(mode),
            _ => rendered.lines.push(ScrollLine::new(
                output.as_str(),
                LineStyle::for_return_code(outcome.return_code),
            )),
        }
    }
    if let Some(error) = &outcome.error {
        rendered.lines.push(ScrollLine::error(error.as_str()));
    }
    rendered
}

fn render_ai(outcome: &AiOutcome) -> Vec<ScrollLine> {
    if outcome.interpreted_commands.is_empty() {
        return vec![ScrollLine::error(INTERPRETATION_FAILED)];
    }
    let mut lines = vec![ScrollLine::new(
        format!("AI interpreted: \"{}\"", outcome.original_command),
        LineStyle::AiInterpretation,
    )];
    // Backend execution order; never reorder.
    for result in &outcome.results {
        lines.push(ScrollLine::info(format!("\u{2192} {}", result.command)));
        if let Some(output) = &result.output {
            lines.push(ScrollLine::new(
                output.as_str(),
                LineStyle::for_return_code(result.return_code),
            ));
        }
        if let Some(error) = &result.error {
            lines.push(ScrollLine::error(error.as_str()));
        }
    }
    lines
}

/// `terminal_command:ai` → `Mode::Ai`, `terminal_command:normal` → `Mode::Normal`.
pub fn parse_directive(output: &str) -> Option<Mode> {
    match output.trim().strip_prefix(DIRECTIVE_PREFIX)? {
        "ai" => Some(Mode::Ai),
        "normal" => Some(Mode::Normal),
        _ => None,
    }
}
