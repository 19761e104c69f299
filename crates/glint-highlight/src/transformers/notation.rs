//! Inline comment notation markers (`[!code ...]`).
//!
//! A marker is a trailing comment on the line it annotates, written in any
//! common comment style, e.g. `// [!code ++]`, `# [!code focus]`, or
//! `<!-- [!code highlight] -->`. Each transformer recognizes its own
//! commands and strips the marker it consumed from the token stream; a
//! marker nobody recognizes stays exactly as written.

use std::sync::LazyLock;

use regex::Regex;

use crate::token::{TokenLine, TokenStream};
use crate::transform::CodeTransformer;

static MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*(?://|#|--|;{1,2}|%{1,2}|/\*|<!--)\s*\[!code ([\w+-]+)\]\s*(?:\*/|-->)?\s*$")
        .expect("Invalid notation marker regex")
});

/// Trailing marker on a line: byte offset where the comment starts in the
/// concatenated line text, and the command word inside the brackets.
fn marker_command(line: &TokenLine) -> Option<(usize, String)> {
    let text = line.text();
    let caps = MARKER.captures(&text)?;
    let start = caps.get(0).expect("whole match").start();
    Some((start, caps[1].to_string()))
}

/// Marks added and removed lines (`[!code ++]` / `[!code --]`).
pub struct NotationDiff;

impl CodeTransformer for NotationDiff {
    fn name(&self) -> &'static str {
        "notation-diff"
    }

    fn apply(&self, stream: &mut TokenStream) {
        let mut any = false;

        for line in &mut stream.lines {
            let Some((start, command)) = marker_command(line) else {
                continue;
            };
            let class = match command.as_str() {
                "++" => "add",
                "--" => "remove",
                _ => continue,
            };

            line.truncate_text(start);
            line.classes.push("diff".to_string());
            line.classes.push(class.to_string());
            any = true;
        }

        if any {
            stream.classes.push("has-diff".to_string());
        }
    }
}

/// Highlights individual lines (`[!code highlight]`, alias `[!code hl]`).
pub struct NotationHighlight;

impl CodeTransformer for NotationHighlight {
    fn name(&self) -> &'static str {
        "notation-highlight"
    }

    fn apply(&self, stream: &mut TokenStream) {
        for line in &mut stream.lines {
            let Some((start, command)) = marker_command(line) else {
                continue;
            };
            if command != "highlight" && command != "hl" {
                continue;
            }

            line.truncate_text(start);
            line.classes.push("highlighted".to_string());
        }
    }
}

/// Focuses lines (`[!code focus]`); everything else is dimmed by the
/// block's stylesheet when `has-focused-lines` is present.
pub struct NotationFocus;

impl CodeTransformer for NotationFocus {
    fn name(&self) -> &'static str {
        "notation-focus"
    }

    fn apply(&self, stream: &mut TokenStream) {
        let mut any = false;

        for line in &mut stream.lines {
            let Some((start, command)) = marker_command(line) else {
                continue;
            };
            if command != "focus" {
                continue;
            }

            line.truncate_text(start);
            line.classes.push("focused".to_string());
            any = true;
        }

        if any {
            stream.classes.push("has-focused-lines".to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Token;
    use pretty_assertions::assert_eq;
    use syntect::highlighting::{Color, FontStyle, Style};

    fn plain() -> Style {
        Style {
            foreground: Color::BLACK,
            background: Color::WHITE,
            font_style: FontStyle::empty(),
        }
    }

    fn line(text: &str) -> TokenLine {
        TokenLine {
            tokens: vec![Token {
                text: text.to_string(),
                light: plain(),
                dark: plain(),
            }],
            classes: vec![],
        }
    }

    fn stream(lines: &[&str]) -> TokenStream {
        TokenStream::new("rust", "", lines.iter().map(|t| line(t)).collect())
    }

    #[test]
    fn diff_markers_classify_and_strip() {
        let mut stream = stream(&[
            "let kept = 1;",
            "let added = 2; // [!code ++]",
            "let removed = 3; // [!code --]",
        ]);

        NotationDiff.apply(&mut stream);

        assert_eq!(stream.lines[0].text(), "let kept = 1;");
        assert_eq!(stream.lines[0].classes, Vec::<String>::new());
        assert_eq!(stream.lines[1].text(), "let added = 2;");
        assert_eq!(stream.lines[1].classes, vec!["diff", "add"]);
        assert_eq!(stream.lines[2].text(), "let removed = 3;");
        assert_eq!(stream.lines[2].classes, vec!["diff", "remove"]);
        assert_eq!(stream.classes, vec!["has-diff"]);
    }

    #[test]
    fn diff_ignores_other_commands() {
        let mut stream = stream(&["let x = 1; // [!code highlight]"]);

        NotationDiff.apply(&mut stream);

        assert_eq!(stream.lines[0].text(), "let x = 1; // [!code highlight]");
        assert!(stream.classes.is_empty());
    }

    #[test]
    fn highlight_accepts_both_spellings() {
        let mut stream = stream(&[
            "first(); // [!code highlight]",
            "second(); // [!code hl]",
        ]);

        NotationHighlight.apply(&mut stream);

        assert_eq!(stream.lines[0].text(), "first();");
        assert_eq!(stream.lines[0].classes, vec!["highlighted"]);
        assert_eq!(stream.lines[1].text(), "second();");
        assert_eq!(stream.lines[1].classes, vec!["highlighted"]);
    }

    #[test]
    fn focus_marks_block_and_line() {
        let mut stream = stream(&["a(); # [!code focus]", "b();"]);

        NotationFocus.apply(&mut stream);

        assert_eq!(stream.lines[0].text(), "a();");
        assert_eq!(stream.lines[0].classes, vec!["focused"]);
        assert!(stream.lines[1].classes.is_empty());
        assert_eq!(stream.classes, vec!["has-focused-lines"]);
    }

    #[test]
    fn recognizes_common_comment_styles() {
        for text in [
            "code // [!code focus]",
            "code # [!code focus]",
            "code -- [!code focus]",
            "code ; [!code focus]",
            "code % [!code focus]",
            "code /* [!code focus] */",
            "code <!-- [!code focus] -->",
        ] {
            let mut stream = stream(&[text]);

            NotationFocus.apply(&mut stream);

            assert_eq!(stream.lines[0].text(), "code", "input: {text:?}");
        }
    }

    #[test]
    fn unrecognized_marker_stays_as_written() {
        let source = "let x = 1; // [!code explode]";
        let mut stream = stream(&[source]);

        NotationDiff.apply(&mut stream);
        NotationHighlight.apply(&mut stream);
        NotationFocus.apply(&mut stream);

        assert_eq!(stream.lines[0].text(), source);
        assert!(stream.lines[0].classes.is_empty());
        assert!(stream.classes.is_empty());
    }

    #[test]
    fn marker_spans_split_tokens() {
        // Highlighting usually splits the comment into its own tokens; the
        // marker must still be found and stripped across token boundaries.
        let mut stream = TokenStream::new(
            "rust",
            "",
            vec![TokenLine {
                tokens: vec![
                    Token {
                        text: "let x = 1;".to_string(),
                        light: plain(),
                        dark: plain(),
                    },
                    Token {
                        text: " // [!code ++]".to_string(),
                        light: plain(),
                        dark: plain(),
                    },
                ],
                classes: vec![],
            }],
        );

        NotationDiff.apply(&mut stream);

        assert_eq!(stream.lines[0].text(), "let x = 1;");
        assert_eq!(stream.lines[0].tokens.len(), 1);
    }
}
