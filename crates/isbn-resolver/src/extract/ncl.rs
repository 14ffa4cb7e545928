//! National Central Library metadata search pages.
//!
//! Two documents are involved: the landing page, which carries the
//! per-session `INFO` token and the form action, and the result page
//! returned by submitting that form.

use super::{candidate, element_text, ExtractionRule};
use crate::error::Absent;
use crate::types::BookRecord;
use scraper::{Html, Selector};

const TOKEN_SELECTOR: &str = r#"input[name="INFO"]"#;
const FORM_SELECTOR: &str = r#"form[name="KM"]"#;
const ROW_SELECTOR: &str = ".sumtab .sumtr1";
const TITLE_SELECTOR: &str = ".sumtd2000 a";
const AUTHOR_SELECTOR: &str = ".sumtd2001";

/// Dynamic values harvested from one landing page fetch.
///
/// Valid only for the session opened by that fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTokens {
    /// Value of the hidden `INFO` field.
    pub info_value: String,
    /// Raw `action` attribute of the search form, possibly relative.
    pub action: String,
}

/// Pull the session token and form action out of the landing page.
pub fn extract_session_tokens(document: &str) -> Result<SessionTokens, Absent> {
    let html = Html::parse_document(document);

    let info_value = first_attr(&html, TOKEN_SELECTOR, "value")
        .ok_or_else(|| Absent::Markup("INFO field not found".to_string()))?;
    let action = first_attr(&html, FORM_SELECTOR, "action")
        .ok_or_else(|| Absent::Markup("search form action not found".to_string()))?;

    Ok(SessionTokens { info_value, action })
}

fn first_attr(html: &Html, selector: &str, attr: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    html.select(&sel)
        .next()
        .and_then(|el| el.value().attr(attr))
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Reads the first row of the search result table.
#[derive(Debug, Clone, Copy, Default)]
pub struct NclResultRule;

impl ExtractionRule for NclResultRule {
    fn extract(&self, document: &str, isbn: &str) -> Option<BookRecord> {
        let html = Html::parse_document(document);
        let row_sel = Selector::parse(ROW_SELECTOR).ok()?;
        let title_sel = Selector::parse(TITLE_SELECTOR).ok()?;
        let author_sel = Selector::parse(AUTHOR_SELECTOR).ok()?;

        let mut rows = html.select(&row_sel);
        let Some(row) = rows.next() else {
            tracing::debug!("no result rows in NCL response");
            return None;
        };
        tracing::debug!("NCL returned {} result rows", rows.count() + 1);

        let anchors: Vec<_> = row.select(&title_sel).collect();
        let title = anchors
            .first()
            .and_then(|a| a.value().attr("title"))
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| {
                anchors
                    .iter()
                    .map(element_text)
                    .collect::<String>()
                    .trim()
                    .to_string()
            });

        let author = row
            .select(&author_sel)
            .map(|cell| element_text(&cell))
            .collect::<String>()
            .replacen('#', "", 1)
            .trim()
            .to_string();

        candidate(isbn, title, author)
    }
}
