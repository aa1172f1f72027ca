//! Request construction and tagging for the catalog backend.
//!
//! Requests are performed by the Zellij host, which echoes a string map back with
//! the result. Folio stores a [`RequestTag`] in that map so a result can be matched
//! to the request that produced it, and stale results can be recognised.

use std::collections::BTreeMap;

const CONTEXT_KIND: &str = "folio_request";
const CONTEXT_SEQ: &str = "folio_seq";

/// Default backend base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Location of the catalog backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base_url: String,
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl Endpoint {
    /// Creates an endpoint, trimming trailing slashes from the base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the list endpoint with the query's non-empty parameters.
    ///
    /// # Examples
    ///
    /// ```
    /// use folio::api::{BookQuery, Endpoint};
    ///
    /// let endpoint = Endpoint::new("http://localhost:5000/");
    /// let query = BookQuery { query: "lord of".into(), year: Some(1950), ..BookQuery::default() };
    /// assert_eq!(endpoint.books_url(&query), "http://localhost:5000/books?q=lord%20of&year=1950");
    /// ```
    #[must_use]
    pub fn books_url(&self, query: &BookQuery) -> String {
        let params = query.params();
        if params.is_empty() {
            return format!("{}/books", self.base_url);
        }

        let encoded: Vec<String> = params
            .iter()
            .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
            .collect();
        format!("{}/books?{}", self.base_url, encoded.join("&"))
    }

    /// URL of the single-record endpoint.
    #[must_use]
    pub fn book_url(&self, id: &str) -> String {
        format!("{}/books/{}", self.base_url, urlencoding::encode(id))
    }
}

/// Parameters of a catalog list request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookQuery {
    /// Free-text search over title and author.
    pub query: String,
    /// Exact genre.
    pub genre: Option<String>,
    /// Minimum publication year.
    pub year: Option<i64>,
    /// Exact category (`type`).
    pub kind: Option<String>,
}

impl BookQuery {
    /// Non-empty parameters in wire order `q`, `genre`, `year`, `type`.
    #[must_use]
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if !self.query.is_empty() {
            params.push(("q", self.query.clone()));
        }
        if let Some(genre) = self.genre.as_ref().filter(|g| !g.is_empty()) {
            params.push(("genre", genre.clone()));
        }
        if let Some(year) = self.year {
            params.push(("year", year.to_string()));
        }
        if let Some(kind) = self.kind.as_ref().filter(|k| !k.is_empty()) {
            params.push(("type", kind.clone()));
        }
        params
    }
}

/// Which endpoint a request targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// `GET /books`
    List,
    /// `GET /books/{id}`
    Detail,
}

impl RequestKind {
    const fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Detail => "detail",
        }
    }
}

/// Identity of an in-flight request: its kind and a monotonic sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTag {
    pub kind: RequestKind,
    pub seq: u64,
}

impl RequestTag {
    #[must_use]
    pub const fn new(kind: RequestKind, seq: u64) -> Self {
        Self { kind, seq }
    }

    /// Encodes the tag into the context map echoed back by the host.
    #[must_use]
    pub fn to_context(self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (CONTEXT_KIND.to_string(), self.kind.as_str().to_string()),
            (CONTEXT_SEQ.to_string(), self.seq.to_string()),
        ])
    }

    /// Decodes a tag from a context map, `None` if the result is not one of ours.
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        let kind = match context.get(CONTEXT_KIND)?.as_str() {
            "list" => RequestKind::List,
            "detail" => RequestKind::Detail,
            _ => return None,
        };
        let seq = context.get(CONTEXT_SEQ)?.parse().ok()?;
        Some(Self { kind, seq })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_query_has_no_parameters() {
        let endpoint = Endpoint::default();
        assert_eq!(endpoint.books_url(&BookQuery::default()), "http://localhost:5000/books");
    }

    #[test]
    fn all_parameters_are_encoded_in_order() {
        let endpoint = Endpoint::new("https://books.example");
        let query = BookQuery {
            query: "dune & co".into(),
            genre: Some("Science Fiction".into()),
            year: Some(1960),
            kind: Some("novel".into()),
        };
        assert_eq!(
            endpoint.books_url(&query),
            "https://books.example/books?q=dune%20%26%20co&genre=Science%20Fiction&year=1960&type=novel"
        );
    }

    #[test]
    fn empty_strings_are_omitted() {
        let query = BookQuery {
            genre: Some(String::new()),
            kind: Some(String::new()),
            ..BookQuery::default()
        };
        assert!(query.params().is_empty());
    }

    #[test]
    fn detail_url_escapes_the_id() {
        let endpoint = Endpoint::default();
        assert_eq!(endpoint.book_url("a/b"), "http://localhost:5000/books/a%2Fb");
    }

    #[test]
    fn tags_survive_the_context_map() {
        let tag = RequestTag::new(RequestKind::Detail, 17);
        assert_eq!(RequestTag::from_context(&tag.to_context()), Some(tag));
    }

    #[test]
    fn foreign_context_is_not_a_tag() {
        let context = BTreeMap::from([("other".to_string(), "1".to_string())]);
        assert_eq!(RequestTag::from_context(&context), None);
    }
}
