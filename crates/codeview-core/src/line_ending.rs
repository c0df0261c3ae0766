//! Line terminator helpers.
//!
//! `codeview-core` does not normalize newlines: the host buffer owns the text, so a line may
//! end in LF (`'\n'`), CRLF (`"\r\n"`) or a lone CR (`'\r'`).

/// A line terminator sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    /// Unix-style LF (`'\n'`).
    Lf,
    /// Windows-style CRLF (`"\r\n"`).
    Crlf,
    /// Classic Mac CR (`'\r'`).
    Cr,
}

impl LineEnding {
    /// Number of code units the terminator occupies.
    pub const fn len(self) -> usize {
        match self {
            Self::Lf | Self::Cr => 1,
            Self::Crlf => 2,
        }
    }

    /// The terminator as text.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::Crlf => "\r\n",
            Self::Cr => "\r",
        }
    }

    /// The terminator starting at byte offset `at` in `text`, if any.
    pub fn at(text: &str, at: usize) -> Option<Self> {
        let bytes = text.as_bytes();
        match bytes.get(at)? {
            b'\n' => Some(Self::Lf),
            b'\r' if bytes.get(at + 1) == Some(&b'\n') => Some(Self::Crlf),
            b'\r' => Some(Self::Cr),
            _ => None,
        }
    }

    /// The terminator that ends `line`, if it has one.
    pub fn ending(line: &str) -> Option<Self> {
        if line.ends_with("\r\n") {
            Some(Self::Crlf)
        } else if line.ends_with('\n') {
            Some(Self::Lf)
        } else if line.ends_with('\r') {
            Some(Self::Cr)
        } else {
            None
        }
    }

    /// Returns `true` if `text` starts with a line terminator.
    pub fn starts_line_break(text: &str) -> bool {
        Self::at(text, 0).is_some()
    }
}

/// Split `text` into lines, each keeping its terminator.
///
/// A trailing terminator (or an empty `text`) yields a final empty line, mirroring how a
/// cursor can sit on the line after the last line break.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0usize;
    let mut pos = 0usize;
    let bytes = text.as_bytes();

    while pos < bytes.len() {
        match LineEnding::at(text, pos) {
            Some(ending) => {
                pos += ending.len();
                lines.push(&text[start..pos]);
                start = pos;
            }
            None => pos += 1,
        }
    }
    lines.push(&text[start..]);
    lines
}
