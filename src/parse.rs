use crate::TextBy;

use anyhow::Result;
use dom_smoothie::{Article, CandidateSelectMode, Config, Readability, TextMode};
use log::trace;
use scraper::{Html, Selector as ScraperSelector};

/// Converts a fetched documentation page into description text.
///
/// The returned text uses real newlines; escaping them for the seed file is
/// left to the caller.
pub trait TextConverter {
    /// Converts `html` belonging to the topic `page_name` into text.
    ///
    /// # Errors
    ///
    /// Returns an error if the page cannot be converted.
    fn format_to_text(&self, html: &str, page_name: &str) -> Result<String>;
}

impl<F> TextConverter for F
where
    F: Fn(&str, &str) -> Result<String>,
{
    fn format_to_text(&self, html: &str, page_name: &str) -> Result<String> {
        self(html, page_name)
    }
}

/// Default converter backed by fast_html2md or dom_smoothie.
#[derive(Debug, Default)]
pub struct HtmlConverter {
    /// The method to use for text extraction.
    pub text_by: TextBy,
    /// An optional CSS selector to limit the HTML subset from which content is extracted.
    pub selector: Option<ScraperSelector>,
}

impl HtmlConverter {
    pub fn new(text_by: TextBy, selector: Option<ScraperSelector>) -> Self {
        Self { text_by, selector }
    }
}

impl TextConverter for HtmlConverter {
    fn format_to_text(&self, html: &str, page_name: &str) -> Result<String> {
        trace!("Converting {page_name} with {:?}", self.text_by);
        let text = extract_text(html, &self.text_by, &self.selector)?;
        Ok(escape_sql_literal(text.trim()))
    }
}

/// Extracts the text content from the given HTML.
///
/// # Arguments
///
/// * `html` - A string slice that holds the HTML content of the page.
/// * `text_by` - The method to use for text extraction (dom_smoothie or fast_html2md).
/// * `selector` - An optional CSS selector to limit the HTML subset from which content is extracted.
///
/// # Errors
///
/// This function will return an error if readability extraction fails on the
/// HTML content.
pub fn extract_text(
    html: &str,
    text_by: &TextBy,
    selector: &Option<ScraperSelector>,
) -> Result<String> {
    let selected_html = if let Some(sel) = selector {
        let document = Html::parse_document(html);
        let elements = document.select(sel);
        let selected_content: Vec<String> = elements.map(|el| el.html()).collect();
        &selected_content.join("\n")
    } else {
        html
    };

    match text_by {
        TextBy::DomSmoothie => {
            let config = Config {
                text_mode: TextMode::Markdown,
                candidate_select_mode: CandidateSelectMode::DomSmoothie,
                ..Default::default()
            };

            let mut readability = Readability::new(selected_html, None, Some(config))?;
            let article: Article = readability.parse()?;

            Ok(article.text_content.to_string())
        }
        TextBy::FastHtml2Md => Ok(html2md::parse_html(selected_html, false)),
    }
}

/// Makes text safe to place between single quotes in a MariaDB string literal.
pub fn escape_sql_literal(text: &str) -> String {
    text.replace('\\', "\\\\").replace('\'', "\\'")
}
