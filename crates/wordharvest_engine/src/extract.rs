use scraper::{Html, Selector};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub title: Option<String>,
    pub text: String,
    pub paragraphs: usize,
}

pub trait TextExtractor: Send + Sync {
    fn extract(&self, html: &str) -> ExtractedText;
}

/// Joins the text of every `<p>` inside `<body>` with single spaces.
/// Navigation, tables and infoboxes are left out.
#[derive(Debug, Default, Clone, Copy)]
pub struct ParagraphExtractor;

impl TextExtractor for ParagraphExtractor {
    fn extract(&self, html: &str) -> ExtractedText {
        let doc = Html::parse_document(html);

        let title = Selector::parse("title")
            .ok()
            .and_then(|sel| {
                doc.select(&sel)
                    .next()
                    .map(|t| t.text().collect::<String>().trim().to_string())
            })
            .filter(|t| !t.is_empty());

        let paragraphs: Vec<String> = Selector::parse("body p")
            .map(|sel| {
                doc.select(&sel)
                    .map(|p| p.text().collect::<String>())
                    .collect()
            })
            .unwrap_or_default();

        ExtractedText {
            title,
            text: paragraphs.join(" "),
            paragraphs: paragraphs.len(),
        }
    }
}
