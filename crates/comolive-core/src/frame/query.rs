use std::fmt::{self, Display};

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped in query values.
///
/// `=`, `:` and `/` stay literal so forwarded `urlargs=key=value` pairs and
/// `host:port` node identifiers remain readable by the query endpoint.
const QUERY_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'\'')
    .add(b'+')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`');

/// Key used to forward parameters to the page a frame links back to.
const URLARGS: &str = "urlargs";

/// Ordered query string builder, serialized once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryBuilder {
    endpoint: String,
    pairs: Vec<(&'static str, String)>,
}

impl QueryBuilder {
    /// Start a query against an endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            pairs: Vec::new(),
        }
    }

    /// Append a parameter.
    pub fn param(mut self, key: &'static str, value: impl Display) -> Self {
        self.pairs.push((key, value.to_string()));
        self
    }

    /// Append a forwarded `urlargs=key=value` parameter.
    pub fn urlarg(mut self, key: &str, value: impl Display) -> Self {
        self.pairs.push((URLARGS, format!("{}={}", key, value)));
        self
    }
}

impl Display for QueryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.endpoint)?;
        for (i, (key, value)) in self.pairs.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{}{}={}", sep, key, utf8_percent_encode(value, QUERY_VALUE))?;
        }
        Ok(())
    }
}

/// Escape a raw query string so it can sit in a double-quoted attribute.
///
/// Only `"`, `<` and `>` are touched; anything else is forwarded as-is.
pub fn attribute_safe(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '"' => out.push_str("%22"),
            '<' => out.push_str("%3C"),
            '>' => out.push_str("%3E"),
            c => out.push(c),
        }
    }
    out
}
