//! Line/token scanner for WRL dumps.
//!
//! The dump format carries at most one construct per line, so the scanner
//! works on whole lines: each line is split on whitespace and the parser
//! moves an explicit cursor forward. Running off the end is reported as
//! `None` and turned into an error by the parser.

/// Cursor over the lines of a WRL file.
pub struct LineCursor<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> LineCursor<'a> {
    /// Create a cursor positioned on the first line of `content`.
    pub fn new(content: &'a str) -> Self {
        Self {
            lines: content.lines().collect(),
            pos: 0,
        }
    }

    /// Total number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Raw line at a 0-based index.
    pub fn line(&self, index: usize) -> Option<&'a str> {
        self.lines.get(index).copied()
    }

    /// 0-based index of the current line.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// 1-based line number of the current line, for diagnostics.
    pub fn line_number(&self) -> usize {
        self.pos + 1
    }

    /// True once the cursor has moved past the last line.
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.lines.len()
    }

    /// Tokens of the current line, or `None` past the end of input.
    pub fn tokens(&self) -> Option<Vec<&'a str>> {
        self.line(self.pos).map(tokenize)
    }

    /// Move to the next line.
    pub fn advance(&mut self) {
        if self.pos < self.lines.len() {
            self.pos += 1;
        }
    }
}

/// Split a line into whitespace-separated tokens.
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

/// Strip the list separator from a numeric token (`"0.5,"` -> `"0.5"`).
pub fn strip_list_comma(token: &str) -> &str {
    token.strip_suffix(',').unwrap_or(token)
}

/// Strip surrounding double quotes from a string token.
pub fn strip_quotes(token: &str) -> &str {
    token.trim_matches('"')
}

/// True for tokens that open a nested block or list.
pub fn is_opener(token: &str) -> bool {
    token == "{" || token == "["
}

/// The closer matching an opener token.
pub fn closer_for(opener: &str) -> Option<&'static str> {
    match opener {
        "{" => Some("}"),
        "[" => Some("]"),
        _ => None,
    }
}

/// The opener matching a closer token.
pub fn opener_for(closer: &str) -> Option<&'static str> {
    match closer {
        "}" => Some("{"),
        "]" => Some("["),
        _ => None,
    }
}

/// First string of an SFString or MFString value.
///
/// `"a b.bmp"` gives `a b.bmp`, `"a.bmp", "b.bmp"` gives `a.bmp`. Unquoted
/// values lose a trailing list comma.
pub fn first_string(value: &str) -> &str {
    let value = value.trim();
    match value.strip_prefix('"').and_then(|rest| rest.split_once('"')) {
        Some((first, _)) => first,
        None => strip_quotes(strip_list_comma(value)),
    }
}
