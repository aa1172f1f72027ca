//! Decoding of catalog backend responses.

use crate::domain::error::{FolioError, Result};
use crate::domain::Book;
use serde_json::Value;

fn check_status(status: u16) -> Result<()> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(FolioError::Http { status })
    }
}

fn parse(body: &[u8]) -> Result<Value> {
    serde_json::from_slice(body).map_err(|e| FolioError::Decode(e.to_string()))
}

/// Decodes a `GET /books` response into the records it contains.
///
/// Entries that are not JSON objects are skipped; field-level problems only blank
/// the affected field.
///
/// # Errors
///
/// - [`FolioError::Http`] for a non-2xx status
/// - [`FolioError::Decode`] when the body is not a JSON array
pub fn decode_books(status: u16, body: &[u8]) -> Result<Vec<Book>> {
    check_status(status)?;

    match parse(body)? {
        Value::Array(entries) => {
            let total = entries.len();
            let books: Vec<Book> = entries.into_iter().filter_map(Book::from_value).collect();
            tracing::debug!(total, decoded = books.len(), "decoded book list");
            Ok(books)
        }
        other => Err(FolioError::Decode(format!(
            "expected a JSON array of books, got {}",
            json_kind(&other)
        ))),
    }
}

/// Decodes a `GET /books/{id}` response.
///
/// # Errors
///
/// - [`FolioError::Http`] for a non-2xx status (including 404 for unknown ids)
/// - [`FolioError::Decode`] when the body is not a JSON object
pub fn decode_book(status: u16, body: &[u8]) -> Result<Book> {
    check_status(status)?;

    let value = parse(body)?;
    if !value.is_object() {
        return Err(FolioError::Decode(format!(
            "expected a book object, got {}",
            json_kind(&value)
        )));
    }
    Book::decode(value)
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
