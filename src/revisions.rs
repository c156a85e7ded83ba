use crate::{Error, Mediawiki};
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::{error, warn};

/// Outcome of looking up the latest revision of one article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetch {
    Found(String),
    NotFound,
    TimedOut,
}

pub trait Revisions {
    fn fetch_article(&self, title: &str) -> Fetch;
}

#[derive(Deserialize)]
struct QueryResponse {
    query: Query,
}
#[derive(Deserialize)]
struct Query {
    #[serde(default)]
    pages: BTreeMap<String, Page>,
}
#[derive(Deserialize)]
struct Page {
    revisions: Option<Vec<Revision>>,
}
#[derive(Deserialize)]
struct Revision {
    slots: Option<Slots>,
    #[serde(rename = "*")]
    content: Option<String>,
}
#[derive(Deserialize)]
struct Slots {
    main: Option<Slot>,
}
#[derive(Deserialize)]
struct Slot {
    #[serde(rename = "*")]
    content: Option<String>,
}

impl Revision {
    fn wikitext(self) -> Option<String> {
        let main = self.slots.and_then(|s| s.main).and_then(|m| m.content);
        main.filter(|s| !s.is_empty())
            .or_else(|| self.content.filter(|s| !s.is_empty()))
    }
}

impl QueryResponse {
    fn wikitext(self) -> Option<String> {
        self.query.pages.into_values().find_map(|page| {
            page.revisions?.into_iter().next()?.wikitext()
        })
    }
}

impl Mediawiki {
    /// Raw wikitext of the latest revision, `None` when the page is missing or deleted.
    pub fn latest_wikitext(&self, title: &str) -> Result<Option<String>, Error> {
        let json = self
            .request()
            .arg("action", "query")
            .arg("prop", "revisions")
            .arg("rvprop", "content")
            .arg("titles", title)
            .get()?;
        let response: QueryResponse = serde_json::from_value(json)?;
        Ok(response.wikitext())
    }
}

impl Revisions for Mediawiki {
    fn fetch_article(&self, title: &str) -> Fetch {
        match self.latest_wikitext(title) {
            Ok(Some(text)) => Fetch::Found(text),
            Ok(None) => Fetch::NotFound,
            Err(e) if e.is_timeout() => {
                warn!("Error fetching \"{}\": Request timed out", title);
                Fetch::TimedOut
            }
            Err(e) => {
                error!("Error fetching \"{}\": {}", title, e);
                Fetch::NotFound
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(json: serde_json::Value) -> Option<String> {
        serde_json::from_value::<QueryResponse>(json).unwrap().wikitext()
    }

    #[test]
    fn main_slot_preferred() {
        let json = json!({"query": {"pages": {"12": {"revisions": [
            {"slots": {"main": {"*": "slot text"}}, "*": "legacy text"}
        ]}}}});
        assert_eq!(decode(json).as_deref(), Some("slot text"));
    }

    #[test]
    fn legacy_content_fallback() {
        let json = json!({"query": {"pages": {"12": {"revisions": [{"*": "legacy text"}]}}}});
        assert_eq!(decode(json).as_deref(), Some("legacy text"));
        let json = json!({"query": {"pages": {"12": {"revisions": [
            {"slots": {"main": {"*": ""}}, "*": "legacy text"}
        ]}}}});
        assert_eq!(decode(json).as_deref(), Some("legacy text"));
    }

    #[test]
    fn missing_page_has_no_text() {
        let json = json!({"query": {"pages": {"-1": {"ns": 0, "title": "Nope", "missing": ""}}}});
        assert_eq!(decode(json), None);
    }

    #[test]
    fn first_page_with_content_wins() {
        let json = json!({"query": {"pages": {
            "1": {"revisions": [{"slots": {}}]},
            "2": {"revisions": [{"*": "second"}]}
        }}});
        assert_eq!(decode(json).as_deref(), Some("second"));
    }

    #[test]
    fn response_without_query_is_an_error() {
        assert!(serde_json::from_value::<QueryResponse>(json!({"batchcomplete": ""})).is_err());
    }
}
