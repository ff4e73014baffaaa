//! Terminal display utilities for CLI output.
//!
//! Generated search strings easily run to tens of thousands of characters, so
//! the table output shows long strings collapsed at a clause boundary unless
//! the full string is requested.

use std::io::{self, IsTerminal};
use std::sync::OnceLock;
use terminal_size::terminal_size;

use crate::compose::OR_SEPARATOR;

/// Terminal information with cached size and capabilities.
#[derive(Debug, Clone)]
pub struct Terminal {
    width: usize,
    is_tty: bool,
}

static TERMINAL_INFO: OnceLock<Terminal> = OnceLock::new();

/// Get the global terminal information, initialized on first call.
pub fn terminal_info() -> &'static Terminal {
    TERMINAL_INFO.get_or_init(|| Terminal {
        width: terminal_size()
            .map(|(w, _)| w.0 as usize)
            .unwrap_or(DEFAULT_WIDTH),
        is_tty: io::stdout().is_terminal(),
    })
}

/// Default width when terminal size cannot be determined.
pub const DEFAULT_WIDTH: usize = 100;

/// Get the current terminal width in characters.
#[inline]
pub fn terminal_width() -> usize {
    terminal_info().width
}

/// Check if stdout is a terminal.
#[inline]
pub fn is_terminal() -> bool {
    terminal_info().is_tty
}

/// Truncate text to fit within the specified width using unicode-aware truncation.
///
/// # Examples
///
/// ```
/// use pairwise_pubmed::utils::truncate_with_ellipsis;
///
/// assert_eq!(truncate_with_ellipsis("Hello World", 8), "Hello...");
/// assert_eq!(truncate_with_ellipsis("Hi", 8), "Hi");
/// ```
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }

    let char_widths: Vec<(char, usize)> = text
        .chars()
        .map(|c| (c, unicode_width::UnicodeWidthChar::width(c).unwrap_or(1)))
        .collect();

    let total_width: usize = char_widths.iter().map(|(_, w)| *w).sum();
    if total_width <= max_width {
        return text.to_string();
    }

    // Leave room for the ellipsis
    let mut current_width = 0;
    let mut end_idx = 0;
    for (i, (_, w)) in char_widths.iter().enumerate() {
        if current_width + w > max_width.saturating_sub(3) {
            break;
        }
        current_width += w;
        end_idx = i + 1;
    }

    if end_idx == 0 {
        return "...".to_string();
    }

    let truncated: String = char_widths[..end_idx].iter().map(|(c, _)| *c).collect();
    format!("{}...", truncated)
}

/// Collapse a long search string for display.
///
/// Strings shorter than `threshold` characters are returned unchanged.
/// Longer strings are cut after the last complete clause that fits, followed
/// by a note of how many clauses were left out. If not even the first clause
/// fits, falls back to character truncation, except that a threshold of 0
/// always keeps the first clause whole.
pub fn collapse_query(query: &str, threshold: usize) -> String {
    let total_chars = query.chars().count();
    if total_chars < threshold {
        return query.to_string();
    }

    let clauses: Vec<&str> = query.split(OR_SEPARATOR).collect();
    let mut kept = 0;
    let mut width = 0;
    for clause in &clauses {
        let extra = clause.chars().count() + if kept > 0 { OR_SEPARATOR.len() } else { 0 };
        if width + extra > threshold {
            break;
        }
        width += extra;
        kept += 1;
    }

    if kept == 0 {
        // A zero threshold still shows the first clause
        if threshold > 0 {
            return truncate_with_ellipsis(query, threshold);
        }
        kept = 1;
    }

    let hidden = clauses.len() - kept;
    if hidden == 0 {
        return query.to_string();
    }

    format!(
        "{} OR ... ({} more clauses, {} characters in total)",
        clauses[..kept].join(OR_SEPARATOR),
        hidden,
        total_chars
    )
}

/// Format a number with thousands separators.
pub fn format_number(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
