//! Pre-render plugin pipeline.
//!
//! Plugins run over a page's markdown before the surrounding generator's
//! default content transforms. The highlight plugin replaces fenced code
//! blocks with rendered HTML and passes everything else through verbatim.

use std::ops::Range;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use rayon::prelude::*;

use glint_highlight::Renderer;

/// A pass over a page's markdown, run before the default content transforms.
pub trait PrerenderPlugin: Send + Sync {
    fn name(&self) -> &'static str;

    /// Transform the document. Must not fail: a plugin that cannot process
    /// part of a page leaves that part as it found it.
    fn process(&self, markdown: &str) -> String;
}

/// Replaces fenced code blocks with highlighted HTML.
pub struct HighlightPlugin {
    renderer: Renderer,
}

impl HighlightPlugin {
    pub fn new(renderer: Renderer) -> Self {
        Self { renderer }
    }
}

impl PrerenderPlugin for HighlightPlugin {
    fn name(&self) -> &'static str {
        "highlight"
    }

    fn process(&self, markdown: &str) -> String {
        rewrite_code_blocks(markdown, &self.renderer)
    }
}

struct FencedBlock {
    language: String,
    meta: String,
    span: Range<usize>,
    code: String,
}

/// Splice rendered HTML over every fenced code block, leaving the rest of
/// the source untouched. Indented code blocks and blocks that fail to
/// render pass through as written.
fn rewrite_code_blocks(source: &str, renderer: &Renderer) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;

    let mut out = String::with_capacity(source.len());
    let mut cursor = 0;
    let mut block: Option<FencedBlock> = None;

    for (event, range) in Parser::new_ext(source, options).into_offset_iter() {
        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                // Fence info string: language token, then the meta string.
                let info = info.trim();
                let (language, meta) = match info.split_once(char::is_whitespace) {
                    Some((language, meta)) => (language.to_string(), meta.trim().to_string()),
                    None => (info.to_string(), String::new()),
                };
                block = Some(FencedBlock {
                    language,
                    meta,
                    span: range,
                    code: String::new(),
                });
            }

            Event::Text(text) => {
                if let Some(block) = block.as_mut() {
                    block.code.push_str(&text);
                }
            }

            Event::End(TagEnd::CodeBlock) => {
                let Some(block) = block.take() else {
                    continue;
                };

                out.push_str(&source[cursor..block.span.start]);
                match renderer.render(&block.code, &block.language, &block.meta) {
                    Ok(html) => out.push_str(&html),
                    Err(e) => {
                        tracing::warn!("leaving code block unrendered: {}", e);
                        out.push_str(&source[block.span.clone()]);
                    }
                }
                cursor = block.span.end;
            }

            _ => {}
        }
    }

    out.push_str(&source[cursor..]);
    out
}

/// Ordered pre-render plugin list, shared by reference across render
/// workers.
#[derive(Default)]
pub struct PluginList {
    plugins: Vec<Box<dyn PrerenderPlugin>>,
}

impl PluginList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin ahead of the generator's default content
    /// transforms. Plugins run in registration order.
    pub fn register_before_default(&mut self, plugin: Box<dyn PrerenderPlugin>) {
        tracing::debug!("registered pre-render plugin \"{}\"", plugin.name());
        self.plugins.push(plugin);
    }

    /// Plugin names, in run order.
    pub fn names(&self) -> Vec<&'static str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    /// Fold one page through every plugin, in order.
    pub fn run(&self, markdown: &str) -> String {
        self.plugins
            .iter()
            .fold(markdown.to_string(), |doc, plugin| plugin.process(&doc))
    }

    /// Render many pages in parallel.
    pub fn run_all(&self, pages: &[String]) -> Vec<String> {
        pages.par_iter().map(|page| self.run(page)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_highlight::{Catalog, HighlightConfig, ThemePair};
    use pretty_assertions::assert_eq;

    fn highlight_plugin() -> HighlightPlugin {
        let catalog = Catalog::bundled();
        let config =
            HighlightConfig::build(ThemePair::new("Solarized (light)", "base16-ocean.dark"), &catalog)
                .unwrap();
        HighlightPlugin::new(Renderer::new(config, catalog).unwrap())
    }

    #[test]
    fn replaces_fenced_blocks_and_keeps_prose() {
        let source = "# Title\n\nSome prose.\n\n```rust {1}\nlet x = 1;\nlet y = 2; // [!code focus]\n```\n\nAfter text.\n";

        let out = highlight_plugin().process(source);

        assert!(out.contains("# Title"));
        assert!(out.contains("Some prose."));
        assert!(out.contains("After text."));
        assert!(out.contains("<pre class=\"glint has-focused-lines\" data-language=\"rust\">"));
        assert!(out.contains("<span class=\"line highlighted\">"));
        assert!(out.contains("<span class=\"line focused\">"));
        assert!(!out.contains("```"));
        assert!(!out.contains("[!code"));
    }

    #[test]
    fn handles_multiple_blocks_in_one_page() {
        let source = "```rust\nlet a = 1;\n```\n\nbetween\n\n```txt\nplain\n```\n";

        let out = highlight_plugin().process(source);

        assert_eq!(out.matches("<pre class=\"glint\"").count(), 2);
        assert!(out.contains("between"));
    }

    #[test]
    fn indented_blocks_pass_through() {
        let source = "para\n\n    indented code\n\nmore\n";

        let out = highlight_plugin().process(source);

        assert_eq!(out, source);
    }

    #[test]
    fn page_without_code_is_unchanged() {
        let source = "# Nothing to do\n\nJust *markdown*.\n";

        let out = highlight_plugin().process(source);

        assert_eq!(out, source);
    }

    #[test]
    fn plugins_run_in_registration_order() {
        struct Tag(&'static str);

        impl PrerenderPlugin for Tag {
            fn name(&self) -> &'static str {
                self.0
            }
            fn process(&self, markdown: &str) -> String {
                format!("{}[{}]", markdown, self.0)
            }
        }

        let mut plugins = PluginList::new();
        plugins.register_before_default(Box::new(Tag("first")));
        plugins.register_before_default(Box::new(Tag("second")));

        assert_eq!(plugins.names(), vec!["first", "second"]);
        assert_eq!(plugins.run("doc"), "doc[first][second]");
    }

    #[test]
    fn run_all_matches_sequential_runs() {
        let mut plugins = PluginList::new();
        plugins.register_before_default(Box::new(highlight_plugin()));

        let pages = vec![
            "```rust\nlet a = 1;\n```\n".to_string(),
            "no code here\n".to_string(),
        ];

        let parallel = plugins.run_all(&pages);
        let sequential: Vec<_> = pages.iter().map(|p| plugins.run(p)).collect();

        assert_eq!(parallel, sequential);
    }
}
