//! Digit-only text fields.
//!
//! Every edit is computed against a copy of the text and kept only when the
//! result passes [`is_acceptable`]; a rejected edit leaves text and cursor
//! untouched.

use std::sync::LazyLock;

use regex::Regex;

/// Longest text a numeric field may hold.
pub const MAX_INPUT_LENGTH: usize = 64;

static DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]*$").unwrap());

/// Whether `text` may be stored in a numeric field.
pub fn is_acceptable(text: &str) -> bool {
    text.len() <= MAX_INPUT_LENGTH && DIGITS_RE.is_match(text)
}

/// Raw text of one numeric field plus its cursor (a byte offset; text is ASCII).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumericInput {
    text: String,
    cursor: usize,
}

impl NumericInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a field from initial text, validated like any other edit.
    pub fn with_text(text: &str) -> Option<Self> {
        is_acceptable(text).then(|| Self {
            text: text.to_string(),
            cursor: text.len(),
        })
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

    /// Insert `fragment` at the cursor. Returns whether the text changed.
    pub fn insert(&mut self, fragment: &str) -> bool {
        let mut candidate = self.text.clone();
        candidate.insert_str(self.cursor, fragment);
        self.commit(candidate, self.cursor + fragment.len())
    }

    pub fn insert_char(&mut self, c: char) -> bool {
        let mut buf = [0u8; 4];
        self.insert(c.encode_utf8(&mut buf))
    }

    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let mut candidate = self.text.clone();
        candidate.remove(self.cursor - 1);
        self.commit(candidate, self.cursor - 1)
    }

    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.text.len() {
            return false;
        }
        let mut candidate = self.text.clone();
        candidate.remove(self.cursor);
        self.commit(candidate, self.cursor)
    }

    pub fn clear(&mut self) -> bool {
        if self.text.is_empty() {
            return false;
        }
        self.commit(String::new(), 0)
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.text.len());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Store `candidate` if acceptable. Returns whether the text changed, so
    /// an accepted no-op edit reports `false`.
    fn commit(&mut self, candidate: String, cursor: usize) -> bool {
        if !is_acceptable(&candidate) {
            return false;
        }
        let changed = candidate != self.text;
        self.text = candidate;
        self.cursor = cursor;
        changed
    }
}
