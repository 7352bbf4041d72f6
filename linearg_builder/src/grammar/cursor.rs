use crate::constant::*;

/// A position in a usage string.
///
/// The cursor is `Copy`, so saving and restoring a position is simply holding onto an old value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Grammar<'g> {
    text: &'g str,
    at: usize,
}

impl<'g> Grammar<'g> {
    pub(crate) fn new(text: &'g str) -> Self {
        Self { text, at: 0 }
    }

    pub(crate) fn end(&self) -> usize {
        self.text.len()
    }

    pub(crate) fn position(&self) -> usize {
        self.at
    }

    pub(crate) fn seek(&mut self, at: usize) {
        debug_assert!(self.text.is_char_boundary(at));
        self.at = at;
    }

    pub(crate) fn span(&self, from: usize, to: usize) -> &'g str {
        &self.text[from..to]
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.text[self.at..].chars().next()
    }

    pub(crate) fn peek_second(&self) -> Option<char> {
        self.text[self.at..].chars().nth(1)
    }

    pub(crate) fn bump(&mut self) -> Option<char> {
        let next = self.peek()?;
        self.at += next.len_utf8();
        Some(next)
    }

    pub(crate) fn starts_with(&self, pattern: &str) -> bool {
        self.text[self.at..].starts_with(pattern)
    }

    pub(crate) fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    /// Take the maximal run of word characters at the cursor.
    /// A word never swallows the `...` repetition marker.
    pub(crate) fn take_word(&mut self, stop_at_delimiter: bool) -> &'g str {
        let start = self.at;

        while !self.starts_with(REPETITION) {
            match self.peek() {
                Some(VALUE_DELIMITER) if stop_at_delimiter => break,
                Some(c) if is_word(c) => {
                    self.bump();
                }
                _ => break,
            }
        }

        &self.text[start..self.at]
    }

    /// Find the offset of the delimiter that closes the group opened at `open_at`.
    pub(crate) fn group_end(&self, open_at: usize) -> usize {
        let mut depth = 0;

        for (offset, c) in self.text[open_at..].char_indices() {
            match c {
                '[' | '{' => depth += 1,
                ']' | '}' => {
                    depth -= 1;

                    if depth == 0 {
                        return open_at + offset;
                    }
                }
                _ => {}
            }
        }

        unreachable!("internal error - the group at {open_at} must have been validated");
    }

    /// Find the start of the alternative following the one that begins at `from`.
    /// Nested groups are skipped over; the search stops at `until` (the closing delimiter).
    pub(crate) fn next_alternative(&self, from: usize, until: usize) -> Option<usize> {
        let mut depth = 0;

        for (offset, c) in self.text[from..until].char_indices() {
            match c {
                '[' | '{' => depth += 1,
                ']' | '}' => depth -= 1,
                ALTERNATIVE if depth == 0 => return Some(from + offset + 1),
                _ => {}
            }
        }

        None
    }
}

fn is_word(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, '[' | ']' | '{' | '}' | ALTERNATIVE)
}

pub(crate) fn closer(open: char) -> char {
    match open {
        '[' => ']',
        '{' => '}',
        _ => unreachable!("internal error - '{open}' does not open a group"),
    }
}
