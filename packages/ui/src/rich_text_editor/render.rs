use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};

/// Render Markdown to HTML for the preview pane and course descriptions.
///
/// Raw HTML in the source is shown as text, never injected. Link and image
/// targets outside http(s), mailto and relative paths are dropped.
pub fn render_markdown(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(source, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        other => other,
    });

    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

fn safe_url(url: CowStr<'_>) -> CowStr<'_> {
    if is_safe_url(&url) {
        url
    } else {
        CowStr::Borrowed("#")
    }
}

/// Whether a link target may be emitted as-is.
fn is_safe_url(url: &str) -> bool {
    let url = url.trim();
    let head_end = url.find(['/', '?', '#']).unwrap_or(url.len());
    let Some(colon) = url[..head_end].find(':') else {
        // no scheme: relative
        return true;
    };
    let scheme = url[..colon].to_ascii_lowercase();
    matches!(scheme.as_str(), "http" | "https" | "mailto")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_basic_markdown() {
        let html = render_markdown("# Intro\n\n**bold** and _it_\n\n- a\n- b\n");
        assert!(html.contains("<h1>Intro</h1>"));
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<em>it</em>"));
        assert!(html.contains("<li>a</li>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = render_markdown("hello <script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_script_links_are_neutralised() {
        let html = render_markdown(
            "[x](javascript:alert(1)) [y](JavaScript:alert(2)) ![z](data:text/html;base64,AA) [w]( vbscript:x)",
        );
        let lower = html.to_ascii_lowercase();
        assert!(!lower.contains("javascript:"));
        assert!(!lower.contains("data:"));
        assert!(!lower.contains("vbscript:"));
        assert!(html.contains(r##"href="#""##));
    }

    #[test]
    fn test_ordinary_links_survive() {
        let html = render_markdown(
            "[a](https://example.org/x?y=1) [b](/courses/3) [c](notes.md#top) [d](mailto:t@x.edu)",
        );
        assert!(html.contains(r#"href="https://example.org/x?y=1""#));
        assert!(html.contains(r#"href="/courses/3""#));
        assert!(html.contains(r#"href="notes.md#top""#));
        assert!(html.contains(r#"href="mailto:t@x.edu""#));
    }

    #[test]
    fn test_is_safe_url() {
        assert!(is_safe_url("http://a"));
        assert!(is_safe_url("page?q=a:b"));
        assert!(!is_safe_url("javascript:void(0)"));
        assert!(!is_safe_url("  JAVASCRIPT:x"));
    }
}
