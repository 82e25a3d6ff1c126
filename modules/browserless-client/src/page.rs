use scraper::{Html, Selector};

use crate::error::{BrowserlessError, Result};

/// A fully-rendered page, held as raw HTML.
///
/// Parsing happens inside [`locate`](Self::locate) because `scraper::Html`
/// is not `Send` and must not be held across await points.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    html: String,
}

impl RenderedPage {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    /// The document title, if present.
    pub fn title(&self) -> Option<String> {
        let document = Html::parse_document(&self.html);
        let selector = Selector::parse("title").expect("static selector");
        document
            .select(&selector)
            .next()
            .map(|el| element_text(&el))
            .filter(|t| !t.is_empty())
    }

    /// Return the visible text of every element matched by a CSS selector,
    /// in document order.
    ///
    /// A selector that does not parse is a structural failure
    /// ([`BrowserlessError::Locator`]); a valid selector matching nothing
    /// is `Ok` with an empty vec.
    pub fn locate(&self, locator: &str) -> Result<Vec<String>> {
        let selector =
            Selector::parse(locator).map_err(|e| BrowserlessError::Locator(e.to_string()))?;

        let document = Html::parse_document(&self.html);
        Ok(document.select(&selector).map(|el| element_text(&el)).collect())
    }
}

fn element_text(element: &scraper::ElementRef<'_>) -> String {
    let text: String = element.text().collect::<Vec<_>>().join(" ");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><head><title>Demo Comic</title></head><body>
        <ul class="episodes">
          <li><a class="ep">Chapter 1</a></li>
          <li><a class="ep">Chapter 2</a></li>
          <li><a class="ep">Chapter 10.5</a></li>
        </ul>
        </body></html>
    "#;

    #[test]
    fn locate_returns_fragments_in_document_order() {
        let page = RenderedPage::new(PAGE);
        let fragments = page.locate("a.ep").unwrap();
        assert_eq!(fragments, vec!["Chapter 1", "Chapter 2", "Chapter 10.5"]);
    }

    #[test]
    fn locate_with_no_matches_is_empty_not_an_error() {
        let page = RenderedPage::new(PAGE);
        let fragments = page.locate("a.missing").unwrap();
        assert!(fragments.is_empty());
    }

    #[test]
    fn invalid_selector_is_a_locator_error() {
        let page = RenderedPage::new(PAGE);
        let err = page.locate("a[").unwrap_err();
        assert!(matches!(err, BrowserlessError::Locator(_)));
    }

    #[test]
    fn title_is_extracted() {
        let page = RenderedPage::new(PAGE);
        assert_eq!(page.title().as_deref(), Some("Demo Comic"));
    }

    #[test]
    fn nested_markup_text_is_flattened() {
        let page = RenderedPage::new("<div class='x'><span>Ep.</span> <b>42</b></div>");
        let fragments = page.locate("div.x").unwrap();
        assert_eq!(fragments, vec!["Ep. 42"]);
    }
}
