use super::MAX_NAME_LEN;

/// A single edit to the pending username.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameInput {
    /// A typed character. Only alphanumerics and spaces are kept.
    Char(char),

    /// Commit the pending name
    Confirm,

    /// Drop the last character
    Erase,
}

/// The text field players type their names into.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NameBuffer {
    buf: String,
}

impl NameBuffer {
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.chars().count()
    }

    /// Append `c` if it is allowed and there is room. Returns whether it was kept.
    pub fn push(&mut self, c: char) -> bool {
        if !(c.is_alphanumeric() || c == ' ') || self.len() >= MAX_NAME_LEN {
            return false;
        }
        self.buf.push(c);
        true
    }

    pub fn pop(&mut self) -> Option<char> {
        self.buf.pop()
    }

    /// Take the trimmed contents, leaving the buffer empty. Blank buffers are left alone.
    pub fn take(&mut self) -> Option<String> {
        let name = self.buf.trim();
        if name.is_empty() {
            return None;
        }
        let name = name.to_string();
        self.buf.clear();
        Some(name)
    }
}
