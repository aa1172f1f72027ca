//! Book domain model.
//!
//! A [`Book`] is one record of the remote catalog. Only the identity is meaningful
//! to the plugin; every other field is optional and renders as a placeholder when
//! absent. Decoding is deliberately lenient: the backend stores documents without a
//! schema, so a field of an unexpected JSON type decodes to `None` rather than
//! rejecting the whole record.

use crate::domain::error::{FolioError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Placeholder shown for a missing title.
pub const UNTITLED: &str = "Untitled";

/// Placeholder shown for a missing author.
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// A single record of the book catalog.
///
/// # Fields
///
/// - `id`: Backend identifier (`id` or Mongo-style `_id`), used for detail lookups
/// - `title`, `author`, `genre`: Free text
/// - `kind`: Category, serialized as `type`
/// - `year`: Publication year
/// - `rating`: Average rating on a 0-5 scale
/// - `price`: Display text of the price, kept as the backend sent it
/// - `description`, `image_url`, `isbn`: Free text
/// - `pages`, `reviews`: Counts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Book {
    #[serde(default, deserialize_with = "lenient::identifier")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub genre: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "lenient::text")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub year: Option<i64>,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub price: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub pages: Option<u64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub isbn: Option<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub reviews: Option<u64>,
}

impl Book {
    /// Decodes one catalog record from a JSON value.
    ///
    /// The identifier may arrive as `id` or Mongo-style `_id`; when both are present
    /// `_id` wins. Field-level problems never reject a record, they only leave the
    /// field empty.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::Decode`] when the value is not a JSON object.
    ///
    /// # Examples
    ///
    /// ```
    /// use folio::Book;
    ///
    /// let value = serde_json::json!({"_id": {"$oid": "42"}, "title": "Dune", "year": "1965"});
    /// let book = Book::decode(value)?;
    /// assert_eq!(book.id.as_deref(), Some("42"));
    /// assert_eq!(book.year, Some(1965));
    /// # Ok::<(), folio::FolioError>(())
    /// ```
    pub fn decode(value: Value) -> Result<Self> {
        let Value::Object(mut fields) = value else {
            return Err(FolioError::Decode("expected a book object".to_string()));
        };

        if let Some(mongo_id) = fields.remove("_id").filter(|v| !v.is_null()) {
            fields.insert("id".to_string(), mongo_id);
        }

        serde_json::from_value(Value::Object(fields)).map_err(|e| FolioError::Decode(e.to_string()))
    }

    /// Like [`decode`](Self::decode), but logs and skips entries that fail.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match Self::decode(value) {
            Ok(book) => Some(book),
            Err(e) => {
                tracing::warn!(error = %e, "skipping undecodable catalog entry");
                None
            }
        }
    }

    /// Title text, or the empty string when absent.
    #[must_use]
    pub fn title_text(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    /// Author text, or the empty string when absent.
    #[must_use]
    pub fn author_text(&self) -> &str {
        self.author.as_deref().unwrap_or_default()
    }

    /// Title for display, falling back to [`UNTITLED`].
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title.as_deref().filter(|t| !t.is_empty()).unwrap_or(UNTITLED)
    }

    /// Author for display, falling back to [`UNKNOWN_AUTHOR`].
    #[must_use]
    pub fn display_author(&self) -> &str {
        self.author.as_deref().filter(|a| !a.is_empty()).unwrap_or(UNKNOWN_AUTHOR)
    }

    /// Publication year with missing values treated as 0.
    #[must_use]
    pub fn year_or_zero(&self) -> i64 {
        self.year.unwrap_or(0)
    }

    /// Rating clamped to the 0-5 scale, if present.
    #[must_use]
    pub fn clamped_rating(&self) -> Option<f64> {
        self.rating
            .filter(|r| r.is_finite())
            .map(|r| r.clamp(0.0, 5.0))
    }

    /// Rating text for display, `"N/A"` when absent.
    #[must_use]
    pub fn rating_label(&self) -> String {
        self.clamped_rating()
            .map_or_else(|| "N/A".to_string(), |r| format!("{r:.1}"))
    }

    /// Store search link built from the title and author.
    ///
    /// # Examples
    ///
    /// ```
    /// use folio::Book;
    ///
    /// let book = Book { title: Some("Dune".into()), author: Some("Frank Herbert".into()), ..Book::default() };
    /// assert_eq!(book.store_link(), "https://www.amazon.com/s?k=Dune%20Frank%20Herbert");
    /// ```
    #[must_use]
    pub fn store_link(&self) -> String {
        format!(
            "https://www.amazon.com/s?k={}%20{}",
            urlencoding::encode(self.title_text()),
            urlencoding::encode(self.author_text())
        )
    }
}

/// Field decoders that accept any JSON shape and never fail on a well-formed value.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
    }

    pub fn identifier<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) if !s.is_empty() => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Object(map) => map.get("$oid").and_then(Value::as_str).map(String::from),
            _ => None,
        })
    }

    pub fn integer<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
        Ok(integer_value(Value::deserialize(d)?))
    }

    pub fn decimal<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
        .filter(|v| v.is_finite()))
    }

    pub fn count<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u64>, D::Error> {
        Ok(integer_value(Value::deserialize(d)?).and_then(|v| u64::try_from(v).ok()))
    }

    fn integer_value(value: Value) -> Option<i64> {
        match value {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(truncate)),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn truncate(v: f64) -> i64 {
        v.trunc() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn decodes_a_complete_record() {
        let book = Book::from_value(json!({
            "_id": "65f1",
            "title": "Dune",
            "author": "Frank Herbert",
            "genre": "Science Fiction",
            "type": "novel",
            "year": 1965,
            "rating": 4.5,
            "price": "$9.99",
            "pages": 412,
            "isbn": "9780441013593",
            "reviews": 1200
        }))
        .unwrap();

        assert_eq!(book.id.as_deref(), Some("65f1"));
        assert_eq!(book.kind.as_deref(), Some("novel"));
        assert_eq!(book.year, Some(1965));
        assert_eq!(book.rating, Some(4.5));
        assert_eq!(book.price.as_deref(), Some("$9.99"));
        assert_eq!(book.pages, Some(412));
        assert_eq!(book.reviews, Some(1200));
    }

    #[test]
    fn wrong_field_types_degrade_to_none() {
        let book = Book::from_value(json!({
            "id": 7,
            "title": ["not", "text"],
            "year": "nineteen sixty-five",
            "rating": {"avg": 4},
            "pages": -3,
            "price": 12.5
        }))
        .unwrap();

        assert_eq!(book.id.as_deref(), Some("7"));
        assert_eq!(book.title, None);
        assert_eq!(book.year, None);
        assert_eq!(book.rating, None);
        assert_eq!(book.pages, None);
        assert_eq!(book.price.as_deref(), Some("12.5"));
    }

    #[test]
    fn absent_fields_render_as_placeholders() {
        let book = Book::from_value(json!({})).unwrap();
        assert_eq!(book.display_title(), UNTITLED);
        assert_eq!(book.display_author(), UNKNOWN_AUTHOR);
        assert_eq!(book.rating_label(), "N/A");
        assert_eq!(book.year_or_zero(), 0);
    }

    #[test]
    fn mongo_id_wins_over_plain_id() {
        let book = Book::from_value(json!({"_id": "65f1", "id": 17, "title": "Dune"})).unwrap();
        assert_eq!(book.id.as_deref(), Some("65f1"));
        assert_eq!(book.title.as_deref(), Some("Dune"));

        let book = Book::from_value(json!({"_id": null, "id": 17})).unwrap();
        assert_eq!(book.id.as_deref(), Some("17"));
    }

    #[test]
    fn non_object_entries_are_skipped() {
        assert!(Book::from_value(json!("Dune")).is_none());
        assert!(Book::from_value(json!(null)).is_none());
    }

    #[test]
    fn rating_is_clamped_to_five_stars() {
        let book = Book { rating: Some(7.2), ..Book::default() };
        assert_eq!(book.clamped_rating(), Some(5.0));
        assert_eq!(book.rating_label(), "5.0");
    }
}
