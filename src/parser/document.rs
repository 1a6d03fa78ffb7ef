use std::fmt;

use regex::Regex;
use scraper::{ElementRef, Html};

use super::indicators::Indicator;

pub const NOT_FOUND: &str = "Not found";

/// Value read for one indicator. Numbers stay as text so the page's
/// punctuation survives into the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted {
    Value(String),
    NotFound,
}

impl Extracted {
    pub fn as_str(&self) -> &str {
        match self {
            Extracted::Value(v) => v,
            Extracted::NotFound => NOT_FOUND,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Extracted::Value(_))
    }
}

impl fmt::Display for Extracted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed bulletin page.
pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(content: &str) -> Self {
        Self {
            html: Html::parse_document(content),
        }
    }

    /// Text nodes in document order, each paired with its enclosing element.
    fn text_nodes(&self) -> impl Iterator<Item = (&str, Option<ElementRef<'_>>)> {
        self.html.tree.root().descendants().filter_map(|node| {
            let text = node.value().as_text()?;
            Some((&**text, node.parent().and_then(ElementRef::wrap)))
        })
    }

    /// Number printed after `"<label>:"`, bound to the first text node that
    /// contains the anchor. Dots become commas.
    pub fn extract(&self, label: &str) -> Extracted {
        match self.number_after(label) {
            Some(number) => Extracted::Value(number),
            None => Extracted::NotFound,
        }
    }

    pub fn extract_all(&self) -> [Extracted; 8] {
        Indicator::ALL.map(|indicator| self.extract(indicator.label()))
    }

    fn number_after(&self, label: &str) -> Option<String> {
        let anchor = format!("{label}:");
        let (_, parent) = self
            .text_nodes()
            .find(|(text, _)| text.contains(anchor.as_str()))?;
        let text: String = parent?.text().collect();

        let re = Regex::new(&format!(r"{}\s*([\d.,]+)", regex::escape(&anchor))).ok()?;
        let number = re.captures(&text)?.get(1)?.as_str();
        Some(number.replace('.', ","))
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Document {
        let html = std::fs::read_to_string("tests/fixtures/balanco.html").unwrap();
        Document::parse(&html)
    }

    fn doc(html: &str) -> Document {
        Document::parse(html)
    }

    #[test]
    fn bulletin_all_indicators() {
        let values = fixture().extract_all();
        let got: Vec<&str> = values.iter().map(|v| v.as_str()).collect();
        assert_eq!(
            got,
            vec!["467", "55,813", "581,638", "2,339,508", "806", "72", "163", "82,666"]
        );
    }

    #[test]
    fn dots_become_commas() {
        let d = doc("<p>Óbitos confirmados: 1.234</p>");
        assert_eq!(d.extract("Óbitos confirmados"), Extracted::Value("1,234".into()));
    }

    #[test]
    fn missing_label_is_not_found() {
        let d = doc("<p>Nada a declarar</p>");
        for indicator in Indicator::ALL {
            assert_eq!(d.extract(indicator.label()), Extracted::NotFound);
        }
    }

    #[test]
    fn first_occurrence_wins() {
        let d = doc("<p>Óbitos confirmados: 10</p><p>Óbitos confirmados: 20</p>");
        assert_eq!(d.extract("Óbitos confirmados"), Extracted::Value("10".into()));
    }

    #[test]
    fn first_occurrence_without_number_is_not_found() {
        // The later, well-formed occurrence is never consulted.
        let d = doc("<p>Feridos: sem registro</p><p>Feridos: 12</p>");
        assert_eq!(d.extract("Feridos"), Extracted::NotFound);
    }

    #[test]
    fn label_without_colon_is_ignored() {
        let d = doc("<p>Feridos 12</p>");
        assert_eq!(d.extract("Feridos"), Extracted::NotFound);
    }

    #[test]
    fn reads_text_of_enclosing_element() {
        let d = doc("<li>Desalojados: <b>ignored</b></li><li>Afetados:&nbsp;2.339.508 pessoas</li>");
        assert_eq!(d.extract("Afetados"), Extracted::Value("2,339,508".into()));
        assert_eq!(d.extract("Desalojados"), Extracted::NotFound);
    }

    #[test]
    fn bold_label_isolated_from_number() {
        // Enclosing element of the label text is <strong>, which holds no digits.
        let d = doc("<p><strong>Desaparecidos:</strong> 72</p>");
        assert_eq!(d.extract("Desaparecidos"), Extracted::NotFound);
    }

    #[test]
    fn labels_sharing_a_paragraph() {
        let d = doc("<p>Afetados: 1.000<br>Feridos: 5</p>");
        assert_eq!(d.extract("Afetados"), Extracted::Value("1,000".into()));
        assert_eq!(d.extract("Feridos"), Extracted::Value("5".into()));
    }

    #[test]
    fn case_sensitive_labels() {
        let d = doc("<p>Municípios afetados: 467</p>");
        assert_eq!(d.extract("Afetados"), Extracted::NotFound);
        assert_eq!(d.extract("Municípios afetados"), Extracted::Value("467".into()));
    }

    #[test]
    fn garbage_input_never_panics() {
        let d = doc("\u{fffd}<p <<>> ::: ,.</div><td");
        assert!(d.extract_all().iter().all(|v| !v.is_found()));
    }
}
