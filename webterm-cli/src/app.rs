use unicode_width::UnicodeWidthChar;
use webterm_core::{Client, LineStyle};

use crate::event::Edit;

/// What a visual row of the history pane shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowKind {
    BannerTitle,
    Banner,
    Spacer,
    Line(LineStyle),
}

/// One physical line of the history pane, before wrapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Row<'a> {
    pub text: &'a str,
    pub kind: RowKind,
}

/// Split a line into visual rows of at most `width` columns, breaking between
/// characters. The history pane renders these rows as-is, so scroll math and
/// drawing always agree.
pub fn wrap_chars(line: &str, width: usize) -> Vec<&str> {
    if width == 0 || line.is_empty() {
        return vec![line];
    }
    let mut rows = Vec::new();
    let mut start = 0;
    let mut used = 0;
    for (i, c) in line.char_indices() {
        let w = c.width().unwrap_or(0);
        if used + w > width && i > start {
            rows.push(&line[start..i]);
            start = i;
            used = 0;
        }
        used += w;
    }
    rows.push(&line[start..]);
    rows
}

/// How many visual rows a single line of text takes when wrapped to `width`.
fn wrapped_line_height(line: &str, width: usize) -> usize {
    wrap_chars(line, width).len()
}

/// View state around the session controller.
pub struct App {
    pub client: Client,
    pub server_url: String,
    pub scroll_offset: usize,
    /// True while the user has scrolled away from the bottom.
    pub scrolled_back: bool,
    /// Spinner frame counter
    pub tick: usize,
    pub dirty: bool,
}

impl App {
    pub fn new(client: Client, server_url: String) -> Self {
        Self {
            client,
            server_url,
            scroll_offset: usize::MAX,
            scrolled_back: false,
            tick: 0,
            dirty: true,
        }
    }

    pub fn is_awaiting(&self) -> bool {
        !self.client.state().dispatch.is_idle()
    }

    pub fn pending(&self) -> usize {
        self.client.state().dispatch.pending()
    }

    pub fn apply_edit(&mut self, edit: Edit) {
        let input = self.client.input_mut();
        match edit {
            Edit::Insert(c) => input.insert_char(c),
            Edit::Backspace => input.backspace(),
            Edit::Delete => input.delete(),
            Edit::Left => input.move_left(),
            Edit::Right => input.move_right(),
            Edit::Home => input.move_home(),
            Edit::End => input.move_end(),
        }
    }

    /// Banner, a spacer, then every scrollback entry split on newlines.
    pub fn rows(&self) -> Vec<Row<'_>> {
        let scrollback = &self.client.state().scrollback;
        let mut rows = Vec::new();
        for (i, line) in scrollback.banner().iter().enumerate() {
            let kind = if i == 0 {
                RowKind::BannerTitle
            } else {
                RowKind::Banner
            };
            rows.push(Row {
                text: line.as_str(),
                kind,
            });
        }
        if !scrollback.banner().is_empty() {
            rows.push(Row {
                text: "",
                kind: RowKind::Spacer,
            });
        }
        for line in scrollback.lines() {
            for text in line.text.split('\n') {
                rows.push(Row {
                    text,
                    kind: RowKind::Line(line.style),
                });
            }
        }
        rows
    }

    /// Visual rows of the whole history at `width` columns.
    pub fn total_content_height(&self, width: usize) -> usize {
        self.rows()
            .iter()
            .map(|row| wrapped_line_height(row.text, width))
            .sum()
    }

    pub fn scroll_up(&mut self, amount: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(amount);
        self.scrolled_back = true;
    }

    pub fn scroll_down(&mut self, amount: usize, viewport_height: usize, viewport_width: usize) {
        let max_scroll = self
            .total_content_height(viewport_width)
            .saturating_sub(viewport_height);
        self.scroll_offset = self.scroll_offset.saturating_add(amount).min(max_scroll);
        if self.scroll_offset == max_scroll {
            self.scrolled_back = false;
        }
    }

    pub fn scroll_to_bottom(&mut self) {
        // Clamped in the main loop once the viewport is known
        self.scroll_offset = usize::MAX;
        self.scrolled_back = false;
    }

    /// Clamp `scroll_offset` into range for the given viewport.
    pub fn clamp_scroll(&mut self, viewport_height: usize, viewport_width: usize) {
        let max_scroll = self
            .total_content_height(viewport_width)
            .saturating_sub(viewport_height);
        self.scroll_offset = self.scroll_offset.min(max_scroll);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use webterm_core::{ExecuteReply, Mode, NormalOutcome, Scrollback, SessionId};

    fn app() -> App {
        let client = Client::with_scrollback(
            SessionId::from("session_t".to_string()),
            Mode::Normal,
            Scrollback::with_banner(vec!["title".into(), "hint".into()]),
        );
        App::new(client, "http://localhost:5000".into())
    }

    fn run(app: &mut App, command: &str, output: &str) {
        app.client.input_mut().replace(command);
        app.client.submit();
        app.client.apply_reply(Ok(ExecuteReply::Normal(NormalOutcome {
            output: Some(output.into()),
            error: None,
            return_code: Some(0),
            prompt: None,
        })));
    }

    #[test]
    fn wrapped_line_height_basics() {
        assert_eq!(wrapped_line_height("", 10), 1);
        assert_eq!(wrapped_line_height("hello", 10), 1);
        assert_eq!(wrapped_line_height("0123456789", 10), 1);
        assert_eq!(wrapped_line_height("0123456789a", 10), 2);
        assert_eq!(wrapped_line_height("abc", 0), 1);
    }

    #[test]
    fn wrapped_line_height_cjk() {
        // Each CJK char is 2 columns wide
        assert_eq!(wrapped_line_height("\u{4f60}\u{597d}\u{4e16}", 4), 2);
    }

    #[test]
    fn wrap_chars_breaks_inside_words() {
        assert_eq!(wrap_chars("aaaa bbbbbbbb", 6), ["aaaa b", "bbbbbb", "b"]);
        assert_eq!(wrap_chars("", 6), [""]);
        assert_eq!(wrap_chars("\u{4f60}\u{597d}\u{4e16}", 3), ["\u{4f60}", "\u{597d}", "\u{4e16}"]);
    }

    #[test]
    fn pinned_scroll_shows_last_wrapped_row() {
        let mut app = app();
        run(&mut app, "cat", "aaaa bbbbbbbb");
        let width = 6;
        let rows: Vec<String> = app
            .rows()
            .iter()
            .flat_map(|row| wrap_chars(row.text, width))
            .map(str::to_owned)
            .collect();
        assert_eq!(rows.len(), app.total_content_height(width));
        app.clamp_scroll(2, width);
        assert_eq!(&rows[app.scroll_offset..], ["bbbbbb", "b"]);
    }

    #[test]
    fn rows_split_multiline_output() {
        let mut app = app();
        run(&mut app, "ls", "a\nb\nc");
        let kinds: Vec<RowKind> = app.rows().iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            [
                RowKind::BannerTitle,
                RowKind::Banner,
                RowKind::Spacer,
                RowKind::Line(LineStyle::CommandExecuted),
                RowKind::Line(LineStyle::Success),
                RowKind::Line(LineStyle::Success),
                RowKind::Line(LineStyle::Success),
            ]
        );
        assert_eq!(app.total_content_height(80), 7);
    }

    #[test]
    fn clear_leaves_only_banner_rows() {
        let mut app = app();
        run(&mut app, "ls", "a");
        app.client.clear();
        assert_eq!(app.rows().len(), 3);
    }

    #[test]
    fn scroll_clamps_to_content() {
        let mut app = app();
        for i in 0..10 {
            run(&mut app, "echo", &i.to_string());
        }
        // 3 banner rows + 20 command/output rows
        app.clamp_scroll(5, 80);
        assert_eq!(app.scroll_offset, 18);
        app.scroll_up(4);
        assert!(app.scrolled_back);
        assert_eq!(app.scroll_offset, 14);
        app.scroll_down(100, 5, 80);
        assert_eq!(app.scroll_offset, 18);
        assert!(!app.scrolled_back);
    }

    #[test]
    fn edits_reach_input_line() {
        let mut app = app();
        for c in "lsx".chars() {
            app.apply_edit(Edit::Insert(c));
        }
        app.apply_edit(Edit::Backspace);
        app.apply_edit(Edit::Home);
        app.apply_edit(Edit::Delete);
        assert_eq!(app.client.input().text(), "s");
    }
}
