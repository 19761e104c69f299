//! Code block rendering with the configured pipeline.

use syntect::easy::HighlightLines;
use syntect::highlighting::{Color, FontStyle, Theme};
use syntect::util::LinesWithEndings;

use crate::catalog::Catalog;
use crate::config::{ConfigError, HighlightConfig};
use crate::token::{merge_styled_line, Token, TokenLine, TokenStream};

/// Errors raised while rendering a single code block.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("highlighting failed: {0}")]
    Highlight(#[from] syntect::Error),
}

/// Applies a built [`HighlightConfig`] to individual code blocks.
///
/// Immutable after construction; one instance is shared by reference across
/// however many workers render pages.
pub struct Renderer {
    config: HighlightConfig,
    catalog: Catalog,
    light: Theme,
    dark: Theme,
}

impl Renderer {
    /// Resolve both themes out of the catalog up front, with the same
    /// fail-fast contract as the configuration build.
    pub fn new(config: HighlightConfig, catalog: Catalog) -> Result<Self, ConfigError> {
        let light = catalog.require_theme(&config.themes.light)?.clone();
        let dark = catalog.require_theme(&config.themes.dark)?.clone();

        Ok(Self {
            config,
            catalog,
            light,
            dark,
        })
    }

    pub fn config(&self) -> &HighlightConfig {
        &self.config
    }

    /// Render one fenced code block to HTML.
    ///
    /// `language` is the fence's language token (unknown languages fall back
    /// to plain text); `meta` is everything after it on the fence line. The
    /// light foreground is emitted inline, the dark foreground in a
    /// `--glint-dark` custom property the dark stylesheet switches to.
    pub fn render(&self, source: &str, language: &str, meta: &str) -> Result<String, RenderError> {
        let mut stream = self.tokenize(source, language, meta)?;
        self.config.transformers.apply(&mut stream);
        Ok(emit_html(&stream))
    }

    fn tokenize(&self, source: &str, language: &str, meta: &str) -> Result<TokenStream, RenderError> {
        let syntaxes = self.catalog.syntaxes();
        let syntax = syntaxes.find_syntax_by_token(language).unwrap_or_else(|| {
            tracing::debug!("no grammar for language \"{}\", rendering as plain text", language);
            syntaxes.find_syntax_plain_text()
        });

        let mut light = HighlightLines::new(syntax, &self.light);
        let mut dark = HighlightLines::new(syntax, &self.dark);

        let mut lines = Vec::new();
        for raw in LinesWithEndings::from(source) {
            let light_spans = light.highlight_line(raw, syntaxes)?;
            let dark_spans = dark.highlight_line(raw, syntaxes)?;

            let mut line = merge_styled_line(&light_spans, &dark_spans);
            trim_line_ending(&mut line);
            lines.push(line);
        }

        Ok(TokenStream::new(language, meta, lines))
    }
}

/// Drop the line terminator the grammar saw (`\n` or `\r\n`) so it never
/// lands inside the line element.
fn trim_line_ending(line: &mut TokenLine) {
    while let Some(last) = line.tokens.last_mut() {
        while matches!(last.text.chars().last(), Some('\n' | '\r')) {
            last.text.pop();
        }
        if last.text.is_empty() {
            line.tokens.pop();
        } else {
            break;
        }
    }
}

fn emit_html(stream: &TokenStream) -> String {
    let mut pre_classes = String::from("glint");
    for class in &stream.classes {
        pre_classes.push(' ');
        pre_classes.push_str(class);
    }

    let mut out = String::new();
    out.push_str("<pre class=\"");
    out.push_str(&escape_attr(&pre_classes));
    out.push_str("\" data-language=\"");
    out.push_str(&escape_attr(&stream.language));
    out.push_str("\"><code>");

    for (i, line) in stream.lines.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }

        let mut classes = String::from("line");
        for class in &line.classes {
            classes.push(' ');
            classes.push_str(class);
        }

        out.push_str("<span class=\"");
        out.push_str(&escape_attr(&classes));
        out.push_str("\">");
        for token in &line.tokens {
            out.push_str("<span style=\"");
            out.push_str(&token_style(token));
            out.push_str("\">");
            out.push_str(&escape_text(&token.text));
            out.push_str("</span>");
        }
        out.push_str("</span>");
    }

    out.push_str("</code></pre>");
    out
}

fn token_style(token: &Token) -> String {
    let mut style = format!(
        "color:{};--glint-dark:{}",
        hex(token.light.foreground),
        hex(token.dark.foreground)
    );

    if token.light.font_style.contains(FontStyle::BOLD) {
        style.push_str(";font-weight:bold");
    }
    if token.light.font_style.contains(FontStyle::ITALIC) {
        style.push_str(";font-style:italic");
    }
    if token.light.font_style.contains(FontStyle::UNDERLINE) {
        style.push_str(";text-decoration:underline");
    }

    style
}

fn hex(color: Color) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(text: &str) -> String {
    escape_text(text).replace('"', "&quot;")
}
