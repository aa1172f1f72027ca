//! Distinct attribute values derived from the fetched collection.
//!
//! Used to populate the category bar (book `type`) and the genre choices of the
//! advanced filters panel.

use crate::domain::Book;

/// Distinct non-empty categories in first-seen order.
#[must_use]
pub fn distinct_categories(books: &[Book]) -> Vec<String> {
    distinct(books.iter().filter_map(|b| b.kind.as_deref()))
}

/// Distinct non-empty genres in first-seen order.
#[must_use]
pub fn distinct_genres(books: &[Book]) -> Vec<String> {
    distinct(books.iter().filter_map(|b| b.genre.as_deref()))
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for value in values.filter(|v| !v.is_empty()) {
        if !seen.iter().any(|s| s == value) {
            seen.push(value.to_string());
        }
    }
    seen
}

/// Display label for a category: first letter uppercased, rest unchanged.
///
/// # Examples
///
/// ```
/// use folio::catalog::categories::category_label;
///
/// assert_eq!(category_label("fiction"), "Fiction");
/// assert_eq!(category_label("ébook"), "Ébook");
/// ```
#[must_use]
pub fn category_label(kind: &str) -> String {
    let mut chars = kind.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn of_kind(kind: Option<&str>) -> Book {
        Book { kind: kind.map(String::from), ..Book::default() }
    }

    #[test]
    fn categories_keep_first_seen_order_without_duplicates() {
        let books = vec![
            of_kind(Some("novel")),
            of_kind(None),
            of_kind(Some("comic")),
            of_kind(Some("novel")),
            of_kind(Some("")),
        ];
        assert_eq!(distinct_categories(&books), vec!["novel", "comic"]);
    }

    #[test]
    fn genres_are_collected_independently() {
        let books = vec![
            Book { genre: Some("Fantasy".into()), kind: Some("novel".into()), ..Book::default() },
            Book { genre: Some("Horror".into()), ..Book::default() },
        ];
        assert_eq!(distinct_genres(&books), vec!["Fantasy", "Horror"]);
    }

    #[test]
    fn empty_label_stays_empty() {
        assert_eq!(category_label(""), "");
    }
}
