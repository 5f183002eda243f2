//! Zero-copy text windows.
//!
//! A [`Cursor`] is a view of `(origin, start, end)` over borrowed text. Slicing
//! is O(1) and never copies. All offsets are byte offsets into the origin and
//! always sit on `char` boundaries, since combinators consume whole `char`s.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A half-open range of byte offsets into the origin text (`end` exclusive).
///
/// `end >= start` always holds: both constructors check it, and so does
/// deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(try_from = "RawRange")]
pub struct InputRange {
    start: usize,
    end: usize,
}

#[derive(Deserialize)]
struct RawRange {
    start: usize,
    end: usize,
}

impl TryFrom<RawRange> for InputRange {
    type Error = String;

    fn try_from(raw: RawRange) -> Result<Self, Self::Error> {
        InputRange::try_new(raw.start, raw.end)
            .ok_or_else(|| format!("input range {}..{} ends before it starts", raw.start, raw.end))
    }
}

impl InputRange {
    /// Panics if `end < start`.
    pub fn new(start: usize, end: usize) -> Self {
        assert!(end >= start, "input range ends before it starts");
        Self { start, end }
    }

    pub fn try_new(start: usize, end: usize) -> Option<Self> {
        (end >= start).then_some(Self { start, end })
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for InputRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// An immutable window over borrowed text.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Cursor<'a> {
    origin: &'a str,
    start: usize,
    end: usize,
}

impl<'a> Cursor<'a> {
    /// A cursor spanning all of `text`.
    pub fn new(text: &'a str) -> Self {
        Self {
            origin: text,
            start: 0,
            end: text.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Absolute offset of this window within the origin text.
    pub fn offset(&self) -> usize {
        self.start
    }

    /// The full text this window was cut from.
    pub fn origin(&self) -> &'a str {
        self.origin
    }

    /// Absolute range covered by this window.
    pub fn range(&self) -> InputRange {
        InputRange::new(self.start, self.end)
    }

    pub fn as_str(&self) -> &'a str {
        &self.origin[self.start..self.end]
    }

    pub fn first_char(&self) -> Option<char> {
        self.as_str().chars().next()
    }

    /// The sub-window `[index, index + length)` relative to this window.
    ///
    /// # Panics
    ///
    /// Panics when the requested window leaves `[0, len]` or splits a `char`.
    pub fn slice(&self, index: usize, length: usize) -> Self {
        assert!(
            index <= self.len() && length <= self.len() - index,
            "cursor slice {index}+{length} out of bounds for window of length {}",
            self.len()
        );
        let start = self.start + index;
        let end = start + length;
        assert!(
            self.origin.is_char_boundary(start) && self.origin.is_char_boundary(end),
            "cursor slice {start}..{end} splits a character"
        );
        Self {
            origin: self.origin,
            start,
            end,
        }
    }

    /// The sub-window from `index` to the end of this window.
    pub fn slice_from(&self, index: usize) -> Self {
        self.slice(index, self.len().saturating_sub(index))
    }

    /// The prefix of this window of the given length.
    pub fn prefix(&self, length: usize) -> Self {
        self.slice(0, length)
    }
}

impl fmt::Debug for Cursor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cursor({}..{} {:?})", self.start, self.end, self.as_str())
    }
}

impl fmt::Display for Cursor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'a> From<&'a str> for Cursor<'a> {
    fn from(text: &'a str) -> Self {
        Self::new(text)
    }
}
