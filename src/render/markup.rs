//! Escaping-safe HTML fragment builder

use url::Url;

/// Escape text for use between tags
pub fn escape_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape text for use inside a double-quoted attribute value
pub fn escape_attr(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Return the URL if it is safe to put in `href`/`src`.
///
/// Absolute URLs must use http, https, mailto or tel. Site-relative paths
/// (`/assets/resume.pdf`) are accepted; protocol-relative `//host` is not.
pub fn safe_url(input: &str) -> Option<&str> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.starts_with('/') && !trimmed.starts_with("//") {
        return Some(trimmed);
    }
    match Url::parse(trimmed) {
        Ok(url) if matches!(url.scheme(), "http" | "https" | "mailto" | "tel") => Some(trimmed),
        _ => None,
    }
}

/// An HTML fragment plus the hrefs of the anchors it contains, in order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup {
    html: String,
    links: Vec<String>,
}

impl Markup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append trusted template markup verbatim
    pub fn raw(&mut self, html: &str) -> &mut Self {
        self.html.push_str(html);
        self
    }

    /// Append untrusted text, escaped
    pub fn text(&mut self, text: &str) -> &mut Self {
        self.html.push_str(&escape_text(text));
        self
    }

    /// Append ` name="value"` with the value escaped
    pub fn attr(&mut self, name: &str, value: &str) -> &mut Self {
        self.html.push(' ');
        self.html.push_str(name);
        self.html.push_str("=\"");
        self.html.push_str(&escape_attr(value));
        self.html.push('"');
        self
    }

    /// Append a URL attribute; unsafe URLs become `#`
    pub fn url_attr(&mut self, name: &str, url: &str) -> &mut Self {
        let value = safe_url(url).unwrap_or("#");
        self.attr(name, value)
    }

    /// Open an anchor tag and record its destination.
    ///
    /// The caller writes the content and the closing `</a>`.
    pub fn open_link(&mut self, href: &str, class: &str, external: bool) -> &mut Self {
        let href = safe_url(href).unwrap_or("#").to_string();
        self.html.push_str("<a");
        self.attr("href", &href);
        if external {
            self.raw(r#" target="_blank" rel="noopener noreferrer""#);
        }
        if !class.is_empty() {
            self.attr("class", class);
        }
        self.html.push('>');
        self.links.push(href);
        self
    }

    /// Append another fragment, links included
    pub fn append(&mut self, other: Markup) -> &mut Self {
        self.html.push_str(&other.html);
        self.links.extend(other.links);
        self
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn links(&self) -> &[String] {
        &self.links
    }

    pub fn into_parts(self) -> (String, Vec<String>) {
        (self.html, self.links)
    }
}
