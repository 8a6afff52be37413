use chrono::{DateTime, Utc};
use comolive_core::NodeConfig;

use super::furniture::escape_html;

/// Node information panel shown above the main visualization.
pub fn render_panel(node_id: &str, node: Option<&NodeConfig>) -> String {
    let Some(node) = node else {
        return format!(
            r#"<div class="sysinfo">
    <h3>{id}</h3>
    <p class="unavailable">Node information is not available.</p>
</div>
"#,
            id = escape_html(node_id)
        );
    };

    let info = node.info();
    let mut rows = String::new();
    for (label, value) in [
        ("Name", info.name.clone()),
        ("Location", info.location.clone()),
        ("Interface", info.interface.clone()),
        ("Comment", info.comment.clone()),
        ("Running since", info.start_time.map(format_epoch)),
    ] {
        if let Some(value) = value {
            rows.push_str(&format!(
                "        <tr><th>{}</th><td>{}</td></tr>\n",
                label,
                escape_html(&value)
            ));
        }
    }

    let mut modules = String::new();
    for (module, filter) in node.modules() {
        modules.push_str(&format!(
            "        <li><span class=\"module\">{}</span> <span class=\"filter\">{}</span></li>\n",
            escape_html(module),
            escape_html(filter)
        ));
    }
    if modules.is_empty() {
        modules.push_str("        <li class=\"empty-state\">No modules loaded</li>\n");
    }

    format!(
        r#"<div class="sysinfo">
    <h3>{id}</h3>
    <table class="sysinfo-table">
{rows}    </table>
    <ul class="module-list">
{modules}    </ul>
</div>
"#,
        id = escape_html(node.id()),
    )
}

fn format_epoch(secs: i64) -> String {
    DateTime::<Utc>::from_timestamp(secs, 0)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| secs.to_string())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use comolive_core::config::NodeSettings;
    use comolive_core::NodeInfo;

    use super::*;

    #[test]
    fn test_panel_lists_modules() {
        let info = NodeInfo {
            name: Some("lab <1>".to_string()),
            start_time: Some(0),
            ..NodeInfo::default()
        };
        let filters = BTreeMap::from([("ports".to_string(), "tcp or udp".to_string())]);
        let node = NodeConfig::new("n1:9", info, filters, &NodeSettings::default());

        let html = render_panel("n1:9", Some(&node));
        assert!(html.contains("<h3>n1:9</h3>"));
        assert!(html.contains("lab &lt;1&gt;"));
        assert!(html.contains("1970-01-01 00:00:00 UTC"));
        assert!(html.contains("<span class=\"module\">ports</span> <span class=\"filter\">tcp or udp</span>"));
        assert!(!html.contains("Location"));
    }

    #[test]
    fn test_panel_for_unavailable_node() {
        let html = render_panel("<n1>", None);
        assert!(html.contains("&lt;n1&gt;"));
        assert!(html.contains("not available"));
    }
}
