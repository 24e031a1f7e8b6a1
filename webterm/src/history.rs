/// Direction of a history recall.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Recall {
    /// ArrowUp: step towards the oldest entry.
    Older,
    /// ArrowDown: step back towards the live input line.
    Newer,
}

/// In-memory log of submitted commands plus a recall cursor.
///
/// The cursor counts back from the most recent entry: `None` means "not browsing",
/// `Some(0)` is the newest entry and larger values are older.
#[derive(Debug, Default)]
pub struct History {
    entries: Vec<String>,
    cursor: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a submitted command. Blank input is dropped. Always stops browsing.
    pub fn record(&mut self, command: &str) -> bool {
        self.cursor = None;
        let command = command.trim();
        if command.is_empty() {
            return false;
        }
        self.entries.push(command.to_string());
        true
    }

    /// Move the cursor and return the text that should replace the input line.
    ///
    /// `None` means nothing changed and the caller must leave the input alone:
    /// the log is empty, `Older` is already at the oldest entry, or `Newer` is
    /// not browsing. Stepping `Newer` past the newest entry yields an empty string.
    pub fn recall(&mut self, direction: Recall) -> Option<String> {
        if self.entries.is_empty() {
            return None;
        }
        match direction {
            Recall::Older => {
                let next = self.cursor.map_or(0, |c| c + 1);
                if next >= self.entries.len() {
                    return None;
                }
                self.cursor = Some(next);
                Some(self.entry_at(next).to_string())
            }
            Recall::Newer => match self.cursor {
                None => None,
                Some(0) => {
                    self.cursor = None;
                    Some(String::new())
                }
                Some(c) => {
                    self.cursor = Some(c - 1);
                    Some(self.entry_at(c - 1).to_string())
                }
            },
        }
    }

    fn entry_at(&self, cursor: usize) -> &str {
        &self.entries[self.entries.len() - 1 - cursor]
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
