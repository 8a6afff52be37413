use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

const STYLES: &str = r#"
:root {
    --bg-primary: #ffffff;
    --bg-secondary: #f4f6f8;
    --text-primary: #1f2933;
    --text-secondary: #616e7c;
    --accent: #2f5d8a;
    --error: #b42318;
    --border: #d9dee3;
}

* {
    box-sizing: border-box;
}

body {
    margin: 0;
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    background: var(--bg-primary);
    color: var(--text-primary);
    line-height: 1.5;
}

.banner {
    display: flex;
    align-items: baseline;
    gap: 12px;
    padding: 12px 20px;
    background: var(--accent);
}

.banner-title {
    color: #ffffff;
    font-size: 1.4rem;
    font-weight: 600;
    text-decoration: none;
}

.banner .version {
    color: #c9d6e3;
    font-size: 0.8rem;
}

/* Two-column layout */
.fence {
    width: 100%;
    border-collapse: collapse;
}

.leftcontent {
    width: 640px;
    padding: 10px;
    vertical-align: top;
}

.rightcontent {
    padding: 10px;
    vertical-align: top;
    background: var(--bg-secondary);
}

/* Node information */
.sysinfo {
    margin-bottom: 10px;
    padding: 10px;
    border: 1px solid var(--border);
}

.sysinfo h3 {
    margin: 0 0 6px 0;
    font-size: 1rem;
}

.sysinfo-table th {
    padding-right: 12px;
    text-align: left;
    color: var(--text-secondary);
    font-weight: normal;
}

.module-list {
    margin: 6px 0 0 0;
    padding-left: 18px;
}

.module-list .module {
    font-weight: 600;
}

.module-list .filter {
    color: var(--text-secondary);
    font-family: monospace;
}

.unavailable,
.empty-state {
    color: var(--text-secondary);
}

.frame-error {
    margin: 8px 0;
    padding: 8px;
    border: 1px solid var(--error);
    color: var(--error);
}

.footer {
    padding: 12px 20px;
    border-top: 1px solid var(--border);
    color: var(--text-secondary);
    font-size: 0.8rem;
}
"#;

/// Stylesheet used by the page furniture.
pub async fn styles_css() -> Response {
    (StatusCode::OK, [(header::CONTENT_TYPE, "text/css")], STYLES).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_styles_content_type() {
        let response = styles_css().await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/css"
        );
    }
}
