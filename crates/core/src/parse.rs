//! HTML parsing.
//!
//! This module provides the [`Document`] type, a thin wrapper over a
//! `scraper` document used to pull out the title and the concatenated text
//! nodes of a page.
//!
//! # Example
//!
//! ```rust
//! use cipin_core::parse::Document;
//!
//! let html = "<html><head><title>标题</title></head><body><p>你好</p></body></html>";
//! let doc = Document::parse(html);
//! assert_eq!(doc.title(), Some("标题".to_string()));
//! assert!(doc.text_content().contains("你好"));
//! ```

use scraper::{Html, Selector};

use crate::preprocess;

/// Represents a parsed HTML document.
///
/// Parsing never fails: malformed markup is recovered by the HTML5 parser,
/// and anything that is not markup at all becomes a text node.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string without preprocessing.
    ///
    /// Text inside `script` and `style` elements is kept. Use
    /// [`Document::parse_with_preprocessing`] to drop it.
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// Parses HTML after removing scripts, styles and comments.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cipin_core::parse::Document;
    ///
    /// let html = "<body><script>track()</script><p>正文</p></body>";
    /// let doc = Document::parse_with_preprocessing(html);
    /// assert_eq!(doc.text_content(), "正文");
    /// ```
    pub fn parse_with_preprocessing(html: &str) -> Self {
        let cleaned = preprocess::preprocess_html(html);
        Self::parse(&cleaned)
    }

    /// Gets the title of the document.
    ///
    /// Returns the trimmed content of the first `<title>` element, if any.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        self.html
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|title| !title.is_empty())
    }

    /// Gets all text content from the document.
    ///
    /// Returns the concatenation of every text node in document order.
    pub fn text_content(&self) -> String {
        self.html.root_element().text().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r#"
        <!DOCTYPE html>
        <html lang="zh">
        <head>
            <meta charset="UTF-8">
            <title> 测试页面 </title>
            <style>p { margin: 0 }</style>
        </head>
        <body>
            <h1>标题</h1>
            <p class="content">第一段</p>
            <script>console.log("脚本")</script>
            <p class="content">第二段</p>
        </body>
        </html>
    "#;

    #[test]
    fn test_parse_document_title() {
        let doc = Document::parse(SAMPLE_HTML);
        assert_eq!(doc.title(), Some("测试页面".to_string()));
    }

    #[test]
    fn test_missing_title() {
        let doc = Document::parse("<p>无题</p>");
        assert_eq!(doc.title(), None);
    }

    #[test]
    fn test_text_content() {
        let doc = Document::parse(SAMPLE_HTML);
        let text = doc.text_content();

        assert!(text.contains("标题"));
        assert!(text.contains("第一段"));
        assert!(text.contains("第二段"));
    }

    #[test]
    fn test_text_content_with_preprocessing() {
        let doc = Document::parse_with_preprocessing(SAMPLE_HTML);
        let text = doc.text_content();

        assert!(text.contains("第一段"));
        assert!(!text.contains("脚本"));
        assert!(!text.contains("margin"));
    }

    #[test]
    fn test_parse_malformed_markup() {
        let doc = Document::parse("<div><p>未闭合<span>标签");
        assert!(doc.text_content().contains("未闭合"));
    }
}
