/// Per-response rendering state shared by every furniture call.
///
/// A fresh context is created for each top-level response; nothing here
/// outlives the request.
#[derive(Debug, Clone)]
pub struct RenderContext {
    show_banner: bool,
    opened: bool,
    closed: bool,
}

impl RenderContext {
    /// Context for a page that shows the banner.
    pub fn new() -> Self {
        Self {
            show_banner: true,
            opened: false,
            closed: false,
        }
    }

    /// Context for a page rendered without the banner.
    pub fn without_banner() -> Self {
        Self {
            show_banner: false,
            ..Self::new()
        }
    }

    fn take_banner(&mut self) -> bool {
        std::mem::replace(&mut self.show_banner, false)
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared header and footer markup.
#[derive(Debug, Clone)]
pub struct PageFrame {
    title: String,
}

impl PageFrame {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    /// Document head and, the first time around, the banner.
    pub fn header(&self, ctx: &mut RenderContext) -> String {
        let mut html = String::new();
        if !ctx.opened {
            ctx.opened = true;
            html.push_str(&format!(
                r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <link rel="stylesheet" href="/assets/styles.css">
</head>
<body>
"#,
                title = escape_html(&self.title),
            ));
        }
        if ctx.take_banner() {
            html.push_str(&format!(
                r#"<div class="banner">
    <a href="/" class="banner-title">{title}</a>
    <span class="version">v{version}</span>
</div>
"#,
                title = escape_html(&self.title),
                version = env!("CARGO_PKG_VERSION"),
            ));
        }
        html
    }

    /// Footer, closing the document once.
    pub fn footer(&self, ctx: &mut RenderContext) -> String {
        if ctx.closed {
            return String::new();
        }
        ctx.closed = true;
        format!(
            r#"<div class="footer">
    <span>{title} v{version}</span>
</div>
</body>
</html>
"#,
            title = escape_html(&self.title),
            version = env!("CARGO_PKG_VERSION"),
        )
    }
}

/// Escape text for HTML element content and attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_rendered_once() {
        let frame = PageFrame::new("CoMo Live!");
        let mut ctx = RenderContext::new();

        let first = frame.header(&mut ctx);
        assert!(first.contains("<!DOCTYPE html>"));
        assert!(first.contains("class=\"banner\""));
        assert!(!ctx.take_banner());

        let second = frame.header(&mut ctx);
        assert!(second.is_empty());
    }

    #[test]
    fn test_header_without_banner() {
        let frame = PageFrame::new("CoMo Live!");
        let mut ctx = RenderContext::without_banner();
        let html = frame.header(&mut ctx);
        assert!(html.contains("<title>CoMo Live!</title>"));
        assert!(!html.contains("class=\"banner\""));
    }

    #[test]
    fn test_contexts_are_independent() {
        let frame = PageFrame::new("t");
        let mut a = RenderContext::new();
        frame.header(&mut a);
        let mut b = RenderContext::new();
        assert!(frame.header(&mut b).contains("class=\"banner\""));
    }

    #[test]
    fn test_footer_closes_once() {
        let frame = PageFrame::new("t");
        let mut ctx = RenderContext::new();
        assert!(frame.footer(&mut ctx).ends_with("</html>\n"));
        assert!(frame.footer(&mut ctx).is_empty());
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<b>"), "&lt;b&gt;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html("\"q\""), "&quot;q&quot;");
    }
}
