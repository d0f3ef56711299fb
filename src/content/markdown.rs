//! Markdown rendering with syntax highlighting

use anyhow::Result;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use serde::Serialize;
use std::collections::HashMap;
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

/// Highlighting theme used when a prism theme has no close match
const DEFAULT_THEME: &str = "base16-ocean.dark";

/// A heading collected while rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    pub id: String,
    pub depth: u32,
    pub text: String,
}

/// Rendered HTML plus the document outline
#[derive(Debug, Clone, Default, Serialize)]
pub struct Rendered {
    pub html: String,
    pub toc: Vec<TocEntry>,
}

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    line_numbers: bool,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::with_options(DEFAULT_THEME, false)
    }

    /// Create with custom settings
    pub fn with_options(theme: &str, line_numbers: bool) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
            line_numbers,
        }
    }

    /// Create from a prism theme stylesheet name
    pub fn for_prism_theme(prism_theme: &str, line_numbers: bool) -> Self {
        Self::with_options(highlight_theme_for(prism_theme), line_numbers)
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> Result<Rendered> {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut code_block: Option<(Option<String>, String)> = None;

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(lang) if !lang.is_empty() => {
                            // Info strings may carry extra words: ```js [file.js]
                            lang.split_whitespace()
                                .next()
                                .filter(|token| is_language_token(token))
                                .map(str::to_string)
                        }
                        _ => None,
                    };
                    code_block = Some((lang, String::new()));
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((lang, code)) = code_block.take() {
                        let highlighted = self.highlight_code(&code, lang.as_deref());
                        events.push(Event::Html(CowStr::from(highlighted)));
                    }
                }
                Event::Text(text) if code_block.is_some() => {
                    if let Some((_, code)) = code_block.as_mut() {
                        code.push_str(&text);
                    }
                }
                _ => events.push(event),
            }
        }

        let toc = assign_heading_ids(&mut events);

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(Rendered {
            html: html_output,
            toc,
        })
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.get(DEFAULT_THEME));

        let highlighted = theme.and_then(|theme| {
            highlighted_html_for_string(code, &self.syntax_set, syntax, theme).ok()
        });

        match highlighted {
            Some(html) if self.line_numbers => add_line_numbers(&html, lang),
            Some(html) => format!(
                r#"<div class="nuxt-content-highlight language-{}">{}</div>"#,
                lang, html
            ),
            None => format!(
                r#"<pre class="language-{}"><code>{}</code></pre>"#,
                lang,
                html_escape(code)
            ),
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a prism stylesheet (e.g. `prism-themes/themes/prism-material-oceanic.css`)
/// to the closest built-in syntect theme
pub fn highlight_theme_for(prism_theme: &str) -> &'static str {
    let name = prism_theme
        .rsplit('/')
        .next()
        .unwrap_or(prism_theme)
        .trim_end_matches(".css")
        .trim_start_matches("prism-")
        .to_ascii_lowercase();

    match name.as_str() {
        n if n.contains("solarized") && n.contains("light") => "Solarized (light)",
        n if n.contains("solarized") => "Solarized (dark)",
        n if n.contains("ghcolors") || n.contains("github") || n == "prism" => "InspiredGitHub",
        n if n.contains("eighties") || n.contains("tomorrow") => "base16-eighties.dark",
        n if n.contains("mocha") || n.contains("okaidia") || n.contains("monokai") => {
            "base16-mocha.dark"
        }
        n if n.contains("coy") || n.contains("light") => "base16-ocean.light",
        _ => DEFAULT_THEME,
    }
}

/// Give every heading without an explicit id a slug id and collect the outline
fn assign_heading_ids(events: &mut [Event]) -> Vec<TocEntry> {
    let mut toc = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();

    for i in 0..events.len() {
        let Event::Start(Tag::Heading { level, .. }) = &events[i] else {
            continue;
        };
        let depth = *level as u32;

        let mut text = String::new();
        for event in &events[i + 1..] {
            match event {
                Event::End(TagEnd::Heading(_)) => break,
                Event::Text(t) | Event::Code(t) => text.push_str(t),
                _ => {}
            }
        }

        if let Event::Start(Tag::Heading { id, .. }) = &mut events[i] {
            let anchor = match id {
                Some(existing) => existing.to_string(),
                None => {
                    let base = slug::slugify(&text);
                    let count = seen.entry(base.clone()).or_insert(0);
                    let anchor = if *count == 0 {
                        base
                    } else {
                        format!("{}-{}", base, count)
                    };
                    *count += 1;
                    *id = Some(CowStr::from(anchor.clone()));
                    anchor
                }
            };

            toc.push(TocEntry {
                id: anchor,
                depth,
                text: text.trim().to_string(),
            });
        }
    }

    toc
}

/// Fence languages end up in a class attribute, so only plain names are kept
fn is_language_token(token: &str) -> bool {
    token
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '-'))
}

/// Add line numbers to highlighted code
fn add_line_numbers(code: &str, lang: &str) -> String {
    let lines: Vec<&str> = code.lines().collect();

    let gutter = (1..=lines.len())
        .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code">{}</td></tr></table></figure>"#,
        lang,
        gutter,
        lines.join("\n")
    )
}

/// Simple HTML escaping
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let rendered = renderer.render("# Hello World\n\nThis is a test.").unwrap();
        assert!(rendered.html.contains(r#"<h1 id="hello-world">Hello World</h1>"#));
        assert!(rendered.html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_render_code_block() {
        let renderer = MarkdownRenderer::new();
        let rendered = renderer.render("```rust\nfn main() {}\n```").unwrap();
        assert!(rendered.html.contains("language-rust"));
        assert!(rendered.html.contains("<pre"));
        assert!(!rendered.html.contains("<code class"));
    }

    #[test]
    fn test_code_fence_language_stays_in_attribute() {
        let md = "```x\"onmouseover=\"alert(1)\nlet a = 1;\n```";
        for line_numbers in [false, true] {
            let renderer = MarkdownRenderer::with_options(DEFAULT_THEME, line_numbers);
            let rendered = renderer.render(md).unwrap();
            assert!(!rendered.html.contains("onmouseover"));
            assert!(!rendered.html.contains("language-x"));
        }

        let rendered = MarkdownRenderer::new().render("```c++\nint a;\n```").unwrap();
        assert!(rendered.html.contains("language-c++"));
    }

    #[test]
    fn test_toc_and_duplicate_ids() {
        let renderer = MarkdownRenderer::new();
        let md = "## Setup\n\ntext\n\n### Install `nuxt`\n\n## Setup\n\n## Custom {#mine}\n";
        let rendered = renderer.render(md).unwrap();

        let ids: Vec<_> = rendered.toc.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["setup", "install-nuxt", "setup-1", "mine"]);
        assert_eq!(rendered.toc[1].depth, 3);
        assert_eq!(rendered.toc[1].text, "Install nuxt");
        assert!(rendered.html.contains(r#"<h2 id="setup-1">"#));
    }

    #[test]
    fn test_highlight_theme_for_prism() {
        assert_eq!(
            highlight_theme_for("prism-themes/themes/prism-material-oceanic.css"),
            "base16-ocean.dark"
        );
        assert_eq!(
            highlight_theme_for("prism-themes/themes/prism-solarized-dark-atom.css"),
            "Solarized (dark)"
        );
        assert_eq!(highlight_theme_for("prism-ghcolors.css"), "InspiredGitHub");
    }
}
