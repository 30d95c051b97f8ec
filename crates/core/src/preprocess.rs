use std::sync::LazyLock;

use regex::Regex;

static COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());

/// Remove elements whose contents are never visible text, plus comments.
///
/// Drops `script`, `style`, `noscript` and `template` elements with their
/// contents. If the rewriter rejects the input the original HTML is returned
/// and the later regex pass is left to clean up.
pub fn preprocess_html(html: &str) -> String {
    let stripped = remove_unwanted_tags(html);
    remove_comments(&stripped)
}

fn remove_unwanted_tags(html: &str) -> String {
    let mut output = Vec::with_capacity(html.len());
    let mut rewriter = lol_html::HtmlRewriter::new(
        lol_html::Settings {
            element_content_handlers: vec![
                lol_html::element!("script", |el| {
                    el.remove();
                    Ok(())
                }),
                lol_html::element!("style", |el| {
                    el.remove();
                    Ok(())
                }),
                lol_html::element!("noscript", |el| {
                    el.remove();
                    Ok(())
                }),
                lol_html::element!("template", |el| {
                    el.remove();
                    Ok(())
                }),
            ],
            ..Default::default()
        },
        |c: &[u8]| output.extend_from_slice(c),
    );

    if rewriter.write(html.as_bytes()).is_err() || rewriter.end().is_err() {
        tracing::debug!("html rewriter failed, keeping original markup");
        return html.to_string();
    }

    String::from_utf8_lossy(&output).into_owned()
}

fn remove_comments(html: &str) -> String {
    COMMENT_RE.replace_all(html, "").into_owned()
}
