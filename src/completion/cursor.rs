//! Cursor-context analyzer.
//!
//! Decides whether the cursor sits inside an unclosed `{{` and, if so, which
//! dotted path has been typed since it. Offsets are byte offsets into the
//! UTF-8 buffer.

use crate::completion::render::BraceState;

/// What the text before the cursor says about variable completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorContext {
    pub brace: BraceState,
    /// Dot-separated segments since the delimiter; the last one may be empty.
    pub partial_path: Vec<String>,
    pub ends_with_dot: bool,
    /// Start of the trailing partial segment. The host replaces
    /// `replace_start..cursor` with the chosen entry.
    pub replace_start: usize,
    pub cursor: usize,
}

impl CursorContext {
    fn closed(cursor: usize) -> Self {
        Self {
            brace: BraceState::NoDelimiter,
            partial_path: Vec::new(),
            ends_with_dot: false,
            replace_start: cursor,
            cursor,
        }
    }

    pub fn has_open_delimiter(&self) -> bool {
        self.brace != BraceState::NoDelimiter
    }
}

/// Analyze `buffer` at `cursor`.
pub fn analyze(buffer: &str, cursor: usize) -> CursorContext {
    let cursor = clamp_cursor(buffer, cursor);
    let before = &buffer.as_bytes()[..cursor];

    let Some(open) = find_open_brace(before) else {
        return CursorContext::closed(cursor);
    };

    // Walk back over the rest of the `{` run to tell `{`, `{{` and `{{{` apart.
    let mut run_start = open;
    while run_start > 0 && before[run_start - 1] == b'{' {
        run_start -= 1;
    }
    // An odd number of backslashes escapes the run; `\\{{` is a literal
    // backslash followed by a live delimiter.
    let backslashes = before[..run_start]
        .iter()
        .rev()
        .take_while(|&&b| b == b'\\')
        .count();
    if backslashes % 2 == 1 {
        return CursorContext::closed(cursor);
    }
    let brace = match open - run_start {
        0 => BraceState::SingleBraceOpen,
        1 => BraceState::DoubleBraceOpen,
        _ => BraceState::TripleBraceOpen,
    };

    // `open` indexes an ASCII byte, so `open + 1` is a char boundary.
    let raw = &buffer[open + 1..cursor];
    let leading = raw.len() - raw.trim_start().len();
    let typed = raw.trim();

    let ends_with_dot = typed.ends_with('.');
    let partial_path: Vec<String> = typed.split('.').map(str::to_string).collect();
    let last_len = partial_path.last().map_or(0, String::len);

    let replace_start = if typed.is_empty() {
        cursor
    } else {
        open + 1 + leading + typed.len() - last_len
    };

    CursorContext {
        brace,
        partial_path,
        ends_with_dot,
        replace_start,
        cursor,
    }
}

/// Index of the nearest `{` before the end of `bytes` that no later `}` closes.
fn find_open_brace(bytes: &[u8]) -> Option<usize> {
    let mut unmatched_close = 0usize;
    for (i, &b) in bytes.iter().enumerate().rev() {
        match b {
            b'}' => unmatched_close += 1,
            b'{' if unmatched_close > 0 => unmatched_close -= 1,
            b'{' => return Some(i),
            _ => {}
        }
    }
    None
}

/// Out-of-range or mid-character offsets are caller bugs: assert in debug
/// builds, clamp to the nearest valid offset below in release builds.
pub(crate) fn clamp_cursor(buffer: &str, cursor: usize) -> usize {
    debug_assert!(
        buffer.is_char_boundary(cursor),
        "cursor {} is not a valid offset into a {}-byte buffer",
        cursor,
        buffer.len()
    );
    let mut cursor = cursor.min(buffer.len());
    while !buffer.is_char_boundary(cursor) {
        cursor -= 1;
    }
    cursor
}
