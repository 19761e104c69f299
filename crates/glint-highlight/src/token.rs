//! Token stream model shared by the renderer and transformers.

use syntect::highlighting::Style;

/// One styled span of source text, carrying a style per display mode.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text: String,
    pub light: Style,
    pub dark: Style,
}

/// One line of a highlighted code block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TokenLine {
    pub tokens: Vec<Token>,
    /// Classes attached to the rendered line element.
    pub classes: Vec<String>,
}

impl TokenLine {
    /// Concatenated source text of the line.
    pub fn text(&self) -> String {
        self.tokens.iter().map(|t| t.text.as_str()).collect()
    }

    /// Drop everything at and after `byte_len` of the concatenated text,
    /// splitting a token if the boundary falls inside one. Offsets past the
    /// end are a no-op.
    pub fn truncate_text(&mut self, byte_len: usize) {
        let mut kept = 0;
        let mut end = self.tokens.len();

        for (i, token) in self.tokens.iter_mut().enumerate() {
            if kept + token.text.len() <= byte_len {
                kept += token.text.len();
                continue;
            }
            token.text.truncate(byte_len - kept);
            end = if token.text.is_empty() { i } else { i + 1 };
            break;
        }

        self.tokens.truncate(end);
    }
}

/// The mutable token stream a transformer chain operates on.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenStream {
    /// Language token from the code fence.
    pub language: String,

    /// Meta string from the code fence (everything after the language token).
    pub meta: String,

    pub lines: Vec<TokenLine>,

    /// Classes attached to the rendered block element.
    pub classes: Vec<String>,
}

impl TokenStream {
    pub fn new(language: impl Into<String>, meta: impl Into<String>, lines: Vec<TokenLine>) -> Self {
        Self {
            language: language.into(),
            meta: meta.into(),
            lines,
            classes: Vec::new(),
        }
    }
}

/// Zip two per-theme highlightings of the same line into one token stream.
///
/// The two segmentations may split the text differently (theme scope
/// selectors differ), so tokens are split at the union of their boundaries;
/// each merged token then has exactly one style per theme. The concatenated
/// text is preserved byte for byte.
pub fn merge_styled_line(light: &[(Style, &str)], dark: &[(Style, &str)]) -> TokenLine {
    debug_assert_eq!(
        light.iter().map(|(_, t)| t.len()).sum::<usize>(),
        dark.iter().map(|(_, t)| t.len()).sum::<usize>(),
    );

    let mut tokens = Vec::new();
    let (mut li, mut di) = (0, 0);
    let (mut loff, mut doff) = (0, 0);

    while li < light.len() && di < dark.len() {
        let (light_style, light_text) = light[li];
        let (dark_style, dark_text) = dark[di];

        let take = (light_text.len() - loff).min(dark_text.len() - doff);
        if take > 0 {
            tokens.push(Token {
                text: light_text[loff..loff + take].to_string(),
                light: light_style,
                dark: dark_style,
            });
        }

        loff += take;
        doff += take;
        if loff == light_text.len() {
            li += 1;
            loff = 0;
        }
        if doff == dark_text.len() {
            di += 1;
            doff = 0;
        }
    }

    TokenLine {
        tokens,
        classes: Vec::new(),
    }
}
