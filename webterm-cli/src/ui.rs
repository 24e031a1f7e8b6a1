use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;
use webterm_core::prompt::AI_MARKER;

use crate::app::{App, RowKind, wrap_chars};
use crate::theme;

const SPINNER: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Rows taken by everything except the history pane.
const CHROME_HEIGHT: u16 = 1 + 3 + 1;

pub fn history_viewport_height(frame_height: u16) -> usize {
    frame_height.saturating_sub(CHROME_HEIGHT) as usize
}

pub fn draw(frame: &mut Frame, app: &App) {
    // Paint entire frame with FORM bg so no terminal background bleeds through
    frame.render_widget(Block::default().style(theme::history_bg()), frame.area());

    let chunks = Layout::vertical([
        Constraint::Length(1), // status bar
        Constraint::Min(3),    // history
        Constraint::Length(3), // input
        Constraint::Length(1), // help bar
    ])
    .split(frame.area());

    draw_status_bar(frame, app, chunks[0]);
    draw_history(frame, app, chunks[1]);
    draw_input(frame, app, chunks[2]);
    draw_help_bar(frame, chunks[3]);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mode_style = if app.client.state().mode.is_ai() {
        theme::mode_on()
    } else {
        theme::mode_off()
    };
    let mut spans = vec![
        Span::styled(" webterm", theme::app_title()),
        Span::styled(theme::STATUS_SEP, theme::status_separator()),
        Span::styled(app.server_url.as_str(), theme::status_detail()),
        Span::styled(theme::STATUS_SEP, theme::status_separator()),
        Span::styled(app.client.session_id().as_str(), theme::status_detail()),
        Span::styled(theme::STATUS_SEP, theme::status_separator()),
        Span::styled(app.client.mode_label(), mode_style),
    ];

    if app.is_awaiting() {
        let spinner_char = SPINNER[app.tick % SPINNER.len()];
        spans.push(Span::styled(format!("  {}", spinner_char), theme::spinner()));
        spans.push(Span::styled(
            format!(" {} pending", app.pending()),
            theme::status_detail(),
        ));
    }

    if app.scrolled_back {
        spans.push(Span::styled(theme::STATUS_SEP, theme::status_separator()));
        spans.push(Span::styled("SCROLL", theme::scroll_indicator()));
    }

    let bar = Paragraph::new(Line::from(spans)).style(theme::bar_bg());
    frame.render_widget(bar, area);
}

fn draw_history(frame: &mut Frame, app: &App, area: Rect) {
    let width = area.width as usize;
    let lines: Vec<Line> = app
        .rows()
        .into_iter()
        .flat_map(|row| {
            let style = match row.kind {
                RowKind::BannerTitle => theme::banner_title(),
                RowKind::Banner | RowKind::Spacer => theme::banner(),
                RowKind::Line(category) => theme::line(category),
            };
            // Pre-wrapped with the same rule total_content_height() counts
            wrap_chars(row.text, width)
                .into_iter()
                .map(move |part| Line::from(Span::styled(part, style)))
        })
        .collect();

    // scroll_offset is already clamped by the main loop before draw()
    let scroll = app.scroll_offset.min(u16::MAX as usize) as u16;
    let paragraph = Paragraph::new(lines)
        .style(theme::history_bg())
        .block(Block::default().borders(Borders::NONE))
        .scroll((scroll, 0));

    frame.render_widget(paragraph, area);
}

fn draw_input(frame: &mut Frame, app: &App, area: Rect) {
    let prompt = &app.client.state().prompt;
    let input = app.client.input();

    let mut spans = Vec::with_capacity(3);
    if prompt.has_marker() {
        spans.push(Span::styled(AI_MARKER, theme::ai_badge()));
    }
    spans.push(Span::styled(prompt.text(), theme::prompt()));
    spans.push(Span::styled(input.text(), theme::user_input()));

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::TOP | Borders::BOTTOM)
            .border_style(theme::input_border()),
    );
    frame.render_widget(paragraph, area);

    let prompt_w = prompt.render().width();
    let typed_w = input.text()[..input.cursor()].width();
    let cursor_x = area.x + (prompt_w + typed_w).min(area.width.saturating_sub(1) as usize) as u16;
    let cursor_y = area.y + 1; // inside the border
    frame.set_cursor_position((cursor_x, cursor_y));
}

fn draw_help_bar(frame: &mut Frame, area: Rect) {
    let help = Line::from(vec![
        Span::styled(" ^A", theme::help_key()),
        Span::styled(" AI mode  ", theme::help_desc()),
        Span::styled("^L", theme::help_key()),
        Span::styled(" clear  ", theme::help_desc()),
        Span::styled("\u{2191}\u{2193}", theme::help_key()),
        Span::styled(" history  ", theme::help_desc()),
        Span::styled("PgUp/PgDn", theme::help_key()),
        Span::styled(" scroll  ", theme::help_desc()),
        Span::styled("^C", theme::help_key()),
        Span::styled(" quit", theme::help_desc()),
    ]);

    let bar = Paragraph::new(help).style(theme::bar_bg());
    frame.render_widget(bar, area);
}
