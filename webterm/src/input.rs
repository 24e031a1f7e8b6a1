/// Single-line edit buffer. `cursor` is a byte offset on a char boundary.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputLine {
    text: String,
    cursor: usize,
}

impl InputLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the whole contents (history recall). Cursor goes to the end.
    pub fn replace(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.len();
    }

    /// Take the contents and leave the buffer empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete character before cursor.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let prev = self.prev_boundary();
            self.text.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    /// Delete character at cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.text.len() {
            let next = self.next_boundary();
            self.text.drain(self.cursor..next);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.prev_boundary();
    }

    pub fn move_right(&mut self) {
        self.cursor = self.next_boundary();
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    fn prev_boundary(&self) -> usize {
        self.text[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.text[self.cursor..]
            .char_indices()
            .nth(1)
            .map(|(i, _)| self.cursor + i)
            .unwrap_or(self.text.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(s: &str) -> InputLine {
        let mut input = InputLine::new();
        for c in s.chars() {
            input.insert_char(c);
        }
        input
    }

    #[test]
    fn insert_and_backspace() {
        let mut input = typed("lss");
        input.backspace();
        assert_eq!(input.text(), "ls");
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn edit_in_the_middle() {
        let mut input = typed("cat fle");
        input.move_left();
        input.move_left();
        input.insert_char('i');
        assert_eq!(input.text(), "cat file");
        input.move_home();
        input.delete();
        assert_eq!(input.text(), "at file");
    }

    #[test]
    fn multibyte_chars() {
        let mut input = typed("é→x");
        input.move_left();
        input.move_left();
        input.backspace();
        assert_eq!(input.text(), "→x");
        input.move_end();
        assert_eq!(input.cursor(), "→x".len());
    }

    #[test]
    fn replace_moves_cursor_to_end() {
        let mut input = typed("partial");
        input.move_home();
        input.replace("git status");
        assert_eq!(input.text(), "git status");
        assert_eq!(input.cursor(), 10);
    }

    #[test]
    fn take_empties_buffer() {
        let mut input = typed("pwd");
        assert_eq!(input.take(), "pwd");
        assert!(input.is_empty());
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn edges_are_noops() {
        let mut input = InputLine::new();
        input.backspace();
        input.delete();
        input.move_left();
        input.move_right();
        assert_eq!(input, InputLine::new());
    }
}
