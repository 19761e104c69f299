//! Meta-string line highlighting.

use std::sync::LazyLock;

use regex::Regex;

use crate::token::TokenStream;
use crate::transform::CodeTransformer;

static RANGE_LIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([\d,\s-]+)\}").expect("Invalid range list regex"));

/// Highlights the lines selected by a `{1,3-5}`-style range list in the
/// block's meta string. Line numbers are 1-indexed; numbers past the end of
/// the block are ignored. An unparsable meta string leaves the block
/// untouched.
pub struct MetaHighlight;

impl CodeTransformer for MetaHighlight {
    fn name(&self) -> &'static str {
        "meta-highlight"
    }

    fn apply(&self, stream: &mut TokenStream) {
        let Some(caps) = RANGE_LIST.captures(&stream.meta) else {
            return;
        };
        let Some(selected) = parse_range_list(&caps[1]) else {
            return;
        };

        for n in selected {
            if let Some(line) = stream.lines.get_mut(n - 1) {
                line.classes.push("highlighted".to_string());
            }
        }
    }
}

/// Parse a comma-separated list of line numbers and inclusive ranges.
/// Returns `None` for anything malformed (empty entry, zero, inverted range).
fn parse_range_list(list: &str) -> Option<Vec<usize>> {
    let mut selected = Vec::new();

    for part in list.split(',') {
        let part = part.trim();
        match part.split_once('-') {
            Some((start, end)) => {
                let start: usize = start.trim().parse().ok()?;
                let end: usize = end.trim().parse().ok()?;
                if start == 0 || end < start {
                    return None;
                }
                selected.extend(start..=end);
            }
            None => {
                let n: usize = part.parse().ok()?;
                if n == 0 {
                    return None;
                }
                selected.push(n);
            }
        }
    }

    Some(selected)
}
