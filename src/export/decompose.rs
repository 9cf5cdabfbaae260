//! Artifact decomposition
//!
//! Splits one monolithic generated HTML document into markup, stylesheet,
//! and script constituents plus a manifest, ready for packaging. Pure over
//! an explicit parsed-document value: no I/O, no shared state, same output
//! for the same input.

use std::sync::OnceLock;

use regex::Regex;

use crate::util::slugify;

/// Relative path the markup references for extracted styles
pub const STYLESHEET_PATH: &str = "css/styles.css";
/// Relative path the markup references for extracted scripts
pub const SCRIPT_PATH: &str = "js/scripts.js";

const CSS_HEADER: &str = "/* \n * Custom Styles\n * Extracted from generated landing page\n */\n\n";
const JS_HEADER: &str = "// Custom Scripts\n\n";
const DOCTYPE: &str = "<!DOCTYPE html>";

/// Decomposed, downloadable representation of an artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectBundle {
    /// Filesystem-safe project slug, never empty
    pub slug: String,
    /// Mutated markup with a leading doctype and external css/js references
    pub index_html: String,
    /// Concatenated inline style content under a fixed header comment
    pub stylesheet: String,
    /// Concatenated qualifying inline script content under a fixed header
    pub script: String,
    /// Human-readable project instructions
    pub readme: String,
}

/// One top-level piece of the scanned document
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Verbatim markup between style/script elements
    Text(String),
    /// An inline `<style>` element
    Style { body: String },
    /// A `<script>` element, kept whole so excluded ones re-emit verbatim
    Script {
        raw: String,
        attrs: String,
        body: String,
    },
}

/// Explicit parsed value the decomposer operates on
#[derive(Debug, Clone, PartialEq, Eq)]
struct ParsedDocument {
    segments: Vec<Segment>,
}

fn element_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)<style\b[^>]*>(.*?)</style\s*>|<script\b([^>]*)>(.*?)</script\s*>")
            .expect("Invalid element regex")
    })
}

fn src_attr_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)(^|\s)src\s*=").expect("Invalid src regex"))
}

fn type_attr_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)type\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>]+))"#)
            .expect("Invalid type regex")
    })
}

impl ParsedDocument {
    fn parse(html: &str) -> Self {
        let mut segments = Vec::new();
        let mut cursor = 0;

        for caps in element_regex().captures_iter(html) {
            let whole = caps.get(0).expect("match always has group 0");
            if whole.start() > cursor {
                segments.push(Segment::Text(html[cursor..whole.start()].to_string()));
            }
            if let Some(style_body) = caps.get(1) {
                segments.push(Segment::Style {
                    body: style_body.as_str().to_string(),
                });
            } else {
                segments.push(Segment::Script {
                    raw: whole.as_str().to_string(),
                    attrs: caps.get(2).map(|m| m.as_str()).unwrap_or("").to_string(),
                    body: caps.get(3).map(|m| m.as_str()).unwrap_or("").to_string(),
                });
            }
            cursor = whole.end();
        }

        if cursor < html.len() {
            segments.push(Segment::Text(html[cursor..].to_string()));
        }

        Self { segments }
    }
}

/// A script stays in the markup when it points at an external source or is
/// an import-map/module block; only plain inline scripts are extracted.
fn script_is_extractable(attrs: &str) -> bool {
    if src_attr_regex().is_match(attrs) {
        return false;
    }
    if let Some(caps) = type_attr_regex().captures(attrs) {
        let value = caps
            .get(1)
            .or_else(|| caps.get(2))
            .or_else(|| caps.get(3))
            .map(|m| m.as_str().to_ascii_lowercase())
            .unwrap_or_default();
        if value.contains("importmap") || value.contains("module") {
            return false;
        }
    }
    true
}

/// Insert `snippet` immediately before the first case-insensitive occurrence
/// of the closing tag, or append it when the tag is missing.
fn insert_before_close(markup: &mut String, close_tag_re: &Regex, snippet: &str) {
    match close_tag_re.find(markup) {
        Some(m) => markup.insert_str(m.start(), snippet),
        None => markup.push_str(snippet),
    }
}

fn head_close_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)</head\s*>").expect("Invalid head regex"))
}

fn body_close_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)</body\s*>").expect("Invalid body regex"))
}

fn build_readme(project_name: &str) -> String {
    format!(
        r#"# {project_name}

Generated by Pageforge

## Project Structure
- index.html: Main entry point
- css/styles.css: Custom styles (Tailwind is loaded via CDN)
- js/scripts.js: Custom interactivity
- assets/: Place your images here

## Customization
To edit the content, open index.html in any code editor.
To change styles, you can add standard CSS to css/styles.css or add Tailwind classes in index.html.
"#
    )
}

/// Decompose a generated HTML document into a [`ProjectBundle`]
///
/// Inline styles and qualifying inline scripts are pulled into standalone
/// files, replaced by external references appended to the head and body.
/// An input with no style/script tags still yields header-only css/js files.
pub fn decompose(html: &str, project_name_hint: &str) -> ProjectBundle {
    let slug = slugify(project_name_hint);
    let doc = ParsedDocument::parse(html);

    let mut stylesheet = String::from(CSS_HEADER);
    let mut script = String::from(JS_HEADER);
    let mut markup = String::with_capacity(html.len());

    for segment in &doc.segments {
        match segment {
            Segment::Text(text) => markup.push_str(text),
            Segment::Style { body } => {
                stylesheet.push_str(body);
                stylesheet.push_str("\n\n");
            }
            Segment::Script { raw, attrs, body } => {
                if script_is_extractable(attrs) {
                    script.push_str(body);
                    script.push_str("\n\n");
                } else {
                    markup.push_str(raw);
                }
            }
        }
    }

    insert_before_close(
        &mut markup,
        head_close_regex(),
        &format!("<link rel=\"stylesheet\" href=\"{}\">\n", STYLESHEET_PATH),
    );
    insert_before_close(
        &mut markup,
        body_close_regex(),
        &format!("<script src=\"{}\"></script>\n", SCRIPT_PATH),
    );

    let has_doctype = markup
        .trim_start()
        .get(..DOCTYPE.len())
        .map(|prefix| prefix.eq_ignore_ascii_case(DOCTYPE))
        .unwrap_or(false);
    let index_html = if has_doctype {
        markup
    } else {
        format!("{}\n{}", DOCTYPE, markup)
    };

    let readme = build_readme(if project_name_hint.trim().is_empty() {
        &slug
    } else {
        project_name_hint
    });

    ProjectBundle {
        slug,
        index_html,
        stylesheet,
        script,
        readme,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::DEFAULT_SLUG;

    const SAMPLE: &str = r#"<html>
<head>
<title>Demo</title>
<style>body { margin: 0; }</style>
<script src="https://cdn.tailwindcss.com"></script>
</head>
<body>
<h1>Hello</h1>
<style>h1 { color: red; }</style>
<script type="importmap">{"imports":{}}</script>
<script type="module">import x from './x.js';</script>
<script>console.log("inline");</script>
</body>
</html>"#;

    #[test]
    fn test_collects_styles_in_document_order() {
        let bundle = decompose(SAMPLE, "Demo Page");
        assert!(bundle.stylesheet.starts_with("/* "));
        let margin = bundle.stylesheet.find("body { margin: 0; }").unwrap();
        let color = bundle.stylesheet.find("h1 { color: red; }").unwrap();
        assert!(margin < color);
        assert!(!bundle.index_html.contains("margin: 0"));
        assert!(!bundle.index_html.contains("<style>"));
    }

    #[test]
    fn test_extracts_only_plain_inline_scripts() {
        let bundle = decompose(SAMPLE, "Demo Page");
        assert!(bundle.script.contains("console.log(\"inline\");"));
        assert!(!bundle.script.contains("cdn.tailwindcss.com"));
        assert!(!bundle.script.contains("importmap"));
        assert!(!bundle.script.contains("import x"));

        // Excluded scripts survive in the markup untouched
        assert!(bundle
            .index_html
            .contains("<script src=\"https://cdn.tailwindcss.com\"></script>"));
        assert!(bundle.index_html.contains("type=\"importmap\""));
        assert!(bundle.index_html.contains("type=\"module\""));
        assert!(!bundle.index_html.contains("console.log(\"inline\");"));
    }

    #[test]
    fn test_appends_external_references() {
        let bundle = decompose(SAMPLE, "Demo Page");
        let link_pos = bundle
            .index_html
            .find("<link rel=\"stylesheet\" href=\"css/styles.css\">")
            .unwrap();
        let head_close = bundle.index_html.find("</head>").unwrap();
        assert!(link_pos < head_close);

        let script_pos = bundle
            .index_html
            .find("<script src=\"js/scripts.js\"></script>")
            .unwrap();
        let body_close = bundle.index_html.find("</body>").unwrap();
        assert!(script_pos < body_close);
    }

    #[test]
    fn test_leading_doctype() {
        let bundle = decompose(SAMPLE, "Demo Page");
        assert!(bundle.index_html.starts_with("<!DOCTYPE html>"));

        // An input that already declares a doctype keeps exactly one
        let with_doctype = format!("<!DOCTYPE html>\n{}", SAMPLE);
        let bundle = decompose(&with_doctype, "Demo Page");
        assert_eq!(bundle.index_html.matches("<!DOCTYPE html>").count(), 1);
    }

    #[test]
    fn test_no_style_or_script_still_yields_headers() {
        let bundle = decompose("<html><head></head><body><p>hi</p></body></html>", "Plain");
        assert_eq!(bundle.stylesheet, CSS_HEADER);
        assert_eq!(bundle.script, JS_HEADER);
        assert!(bundle.index_html.contains("css/styles.css"));
        assert!(bundle.index_html.contains("js/scripts.js"));
    }

    #[test]
    fn test_missing_anchors_appends_references() {
        let bundle = decompose("<p>fragment only</p>", "Fragment");
        assert!(bundle.index_html.contains("css/styles.css"));
        assert!(bundle.index_html.contains("js/scripts.js"));
    }

    #[test]
    fn test_symbol_only_hint_falls_back() {
        let bundle = decompose("<html></html>", "***");
        assert_eq!(bundle.slug, DEFAULT_SLUG);
    }

    #[test]
    fn test_slug_and_readme_name() {
        let bundle = decompose("<html></html>", "My Cool App!");
        assert_eq!(bundle.slug, "my-cool-app");
        assert!(bundle.readme.contains("# My Cool App!"));
    }

    #[test]
    fn test_determinism() {
        let a = decompose(SAMPLE, "Demo Page");
        let b = decompose(SAMPLE, "Demo Page");
        assert_eq!(a, b);
    }

    #[test]
    fn test_reconstitution_recovers_inline_content() {
        let bundle = decompose(SAMPLE, "Demo Page");

        // Strip the external references and re-inline the extracted content
        let reinlined = bundle
            .index_html
            .replace("<link rel=\"stylesheet\" href=\"css/styles.css\">\n", "")
            .replace("<script src=\"js/scripts.js\"></script>\n", "");

        let css_payload = bundle.stylesheet.trim_start_matches(CSS_HEADER);
        let js_payload = bundle.script.trim_start_matches(JS_HEADER);

        // Every inline constituent of the original is recoverable from the
        // bundle; the mutated markup holds everything else
        for piece in ["body { margin: 0; }", "h1 { color: red; }"] {
            assert!(SAMPLE.contains(piece));
            assert!(css_payload.contains(piece));
        }
        assert!(js_payload.contains("console.log(\"inline\");"));
        for kept in ["cdn.tailwindcss.com", "importmap", "import x"] {
            assert!(reinlined.contains(kept));
        }
    }
}
