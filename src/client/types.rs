use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const MAX_PUBLISHERS: usize = 3;
const MAX_SUBJECTS: usize = 15;

/// A search result from the catalog.
///
/// Only the fields the application reads are typed; everything else the
/// catalog returns is carried through `extra` so favorites keep the full
/// record.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Book {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_i: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_publish_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_pages_median: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Book {
    pub fn new(key: &str, title: &str) -> Self {
        Self {
            key: key.to_string(),
            title: title.to_string(),
            ..Default::default()
        }
    }

    /// Minimal record built from a work's detail page.
    pub fn from_work(work_id: &str, details: &WorkDetails) -> Self {
        Self {
            key: details.key.clone().unwrap_or_else(|| normalize_work_id(work_id)),
            title: details.title.clone().unwrap_or_default(),
            cover_i: details.cover_id(),
            subject: details.subjects.clone(),
            ..Default::default()
        }
    }

    pub fn authors_display(&self) -> String {
        match &self.author_name {
            Some(names) if !names.is_empty() => names.join(", "),
            _ => "Unknown".to_string(),
        }
    }

    pub fn publish_year_display(&self) -> String {
        self.first_publish_year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "Unknown".to_string())
    }

    pub fn publishers_display(&self) -> Option<String> {
        self.publisher
            .as_ref()
            .filter(|p| !p.is_empty())
            .map(|p| p.iter().take(MAX_PUBLISHERS).cloned().collect::<Vec<_>>().join(", "))
    }

    pub fn primary_isbn(&self) -> Option<&str> {
        self.isbn.as_ref().and_then(|i| i.first()).map(String::as_str)
    }

    pub fn subjects_preview(&self) -> &[String] {
        match &self.subject {
            Some(s) => &s[..s.len().min(MAX_SUBJECTS)],
            None => &[],
        }
    }
}

/// Work description, published either as plain text or `{ "value": .. }`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum Description {
    Text(String),
    Typed {
        #[serde(default)]
        value: Option<String>,
    },
}

/// Detail record of a single work.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct WorkDetails {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<Description>,
    #[serde(default)]
    pub covers: Option<Vec<i64>>,
    #[serde(default)]
    pub subjects: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WorkDetails {
    pub fn description_text(&self) -> Option<&str> {
        let text = match self.description.as_ref()? {
            Description::Text(text) => Some(text.as_str()),
            Description::Typed { value } => value.as_deref(),
        };
        text.filter(|t| !t.is_empty())
    }

    // The catalog uses -1 for a removed cover
    pub fn cover_id(&self) -> Option<i64> {
        self.covers.as_ref()?.iter().copied().find(|id| *id > 0)
    }
}

/// Accept both `OL45883W` and `/works/OL45883W`.
pub fn normalize_work_id(work_id: &str) -> String {
    let trimmed = work_id.trim();
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/works/{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_book_keeps_unknown_fields() {
        let raw = json!({
            "key": "/works/OL1W",
            "title": "Foo",
            "author_name": ["A", "B"],
            "cover_i": 123,
            "edition_count": 7,
            "ia": ["foo00"]
        });

        let book: Book = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(book.cover_i, Some(123));
        assert_eq!(book.extra.get("edition_count"), Some(&json!(7)));

        assert_eq!(serde_json::to_value(&book).unwrap(), raw);
    }

    #[test]
    fn test_display_helpers() {
        let mut book = Book::new("/works/OL1W", "Foo");
        assert_eq!(book.authors_display(), "Unknown");
        assert_eq!(book.publish_year_display(), "Unknown");
        assert_eq!(book.publishers_display(), None);
        assert_eq!(book.primary_isbn(), None);
        assert!(book.subjects_preview().is_empty());

        book.author_name = Some(vec!["Ann".into(), "Bo".into()]);
        book.first_publish_year = Some(1999);
        book.publisher = Some(vec!["P1".into(), "P2".into(), "P3".into(), "P4".into()]);
        book.isbn = Some(vec!["9780000000001".into(), "9780000000002".into()]);
        book.subject = Some((0..20).map(|i| format!("s{}", i)).collect());

        assert_eq!(book.authors_display(), "Ann, Bo");
        assert_eq!(book.publish_year_display(), "1999");
        assert_eq!(book.publishers_display().as_deref(), Some("P1, P2, P3"));
        assert_eq!(book.primary_isbn(), Some("9780000000001"));
        assert_eq!(book.subjects_preview().len(), 15);
    }

    #[test]
    fn test_description_forms() {
        let plain: WorkDetails = serde_json::from_value(json!({"description": "A tale."})).unwrap();
        assert_eq!(plain.description_text(), Some("A tale."));

        let typed: WorkDetails = serde_json::from_value(json!({
            "description": {"type": "/type/text", "value": "Typed tale."}
        }))
        .unwrap();
        assert_eq!(typed.description_text(), Some("Typed tale."));

        let bare: WorkDetails = serde_json::from_value(json!({"description": {"type": "/type/text"}})).unwrap();
        assert_eq!(bare.description_text(), None);

        let missing: WorkDetails = serde_json::from_value(json!({"title": "x"})).unwrap();
        assert_eq!(missing.description_text(), None);
    }

    #[test]
    fn test_book_from_work() {
        let details: WorkDetails = serde_json::from_value(json!({
            "key": "/works/OL1W",
            "title": "Foo",
            "covers": [-1, 42]
        }))
        .unwrap();

        let book = Book::from_work("OL1W", &details);
        assert_eq!(book.key, "/works/OL1W");
        assert_eq!(book.title, "Foo");
        assert_eq!(book.cover_i, Some(42));
    }

    #[test]
    fn test_normalize_work_id() {
        assert_eq!(normalize_work_id("OL1W"), "/works/OL1W");
        assert_eq!(normalize_work_id("/works/OL1W"), "/works/OL1W");
        assert_eq!(normalize_work_id(" OL1W "), "/works/OL1W");
    }
}
