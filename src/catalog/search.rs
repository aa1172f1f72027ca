//! Linear substring search over titles and authors.

use crate::domain::Book;

/// Returns `true` if the book's title or author contains `needle`.
///
/// `needle` must already be lowercased. Missing fields count as empty strings and
/// therefore never match a non-empty needle.
#[must_use]
pub fn matches(book: &Book, needle: &str) -> bool {
    book.title_text().to_lowercase().contains(needle)
        || book.author_text().to_lowercase().contains(needle)
}

/// Returns the books whose title or author contains `query`, case-insensitively.
///
/// Input order is preserved. An empty query is not a meaningful call: callers that
/// have no query skip the search step entirely.
///
/// # Examples
///
/// ```
/// use folio::Book;
/// use folio::catalog::search::linear_search;
///
/// let books = vec![
///     Book { title: Some("Dune".into()), ..Book::default() },
///     Book { title: Some("Foundation".into()), author: Some("Asimov".into()), ..Book::default() },
/// ];
/// let found = linear_search(&books, "dune");
/// assert_eq!(found.len(), 1);
/// ```
#[must_use]
pub fn linear_search(books: &[Book], query: &str) -> Vec<Book> {
    let needle = query.to_lowercase();
    books.iter().filter(|b| matches(b, &needle)).cloned().collect()
}

/// Character ranges of every case-insensitive occurrence of `query` in `text`.
///
/// Ranges are `(start, end)` character indices with an exclusive end, suitable for
/// highlight rendering. Overlapping occurrences are not reported.
#[must_use]
pub fn match_ranges(text: &str, query: &str) -> Vec<(usize, usize)> {
    let needle: Vec<char> = query.to_lowercase().chars().collect();
    if needle.is_empty() {
        return vec![];
    }

    // Lowercasing can change the char count for a few scripts; highlights are
    // skipped there rather than drawn at the wrong offsets.
    let haystack: Vec<char> = text.to_lowercase().chars().collect();
    if haystack.len() != text.chars().count() {
        return vec![];
    }

    let mut ranges = Vec::new();
    let mut i = 0;
    while i + needle.len() <= haystack.len() {
        if haystack[i..i + needle.len()] == needle[..] {
            ranges.push((i, i + needle.len()));
            i += needle.len();
        } else {
            i += 1;
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn book(title: Option<&str>, author: Option<&str>) -> Book {
        Book {
            title: title.map(String::from),
            author: author.map(String::from),
            ..Book::default()
        }
    }

    #[test]
    fn dune_matches_title_and_excludes_foundation() {
        let books = vec![book(Some("Dune"), None), book(Some("Foundation"), Some("Asimov"))];
        let found = linear_search(&books, "dune");
        assert_eq!(found, vec![book(Some("Dune"), None)]);
    }

    #[test]
    fn author_matches_count() {
        let books = vec![book(Some("Foundation"), Some("Isaac Asimov"))];
        assert_eq!(linear_search(&books, "ASIM").len(), 1);
    }

    #[test]
    fn missing_fields_never_match() {
        let books = vec![book(None, None)];
        assert!(linear_search(&books, "a").is_empty());
    }

    #[test]
    fn preserves_input_order() {
        let books = vec![
            book(Some("The Hobbit"), None),
            book(Some("Other"), None),
            book(Some("The Road"), None),
        ];
        let found = linear_search(&books, "the");
        assert_eq!(found[0].title_text(), "The Hobbit");
        assert_eq!(found[1].title_text(), "The Road");
    }

    #[test]
    fn match_ranges_are_character_indices() {
        assert_eq!(match_ranges("Dune Messiah: dune", "DUNE"), vec![(0, 4), (14, 18)]);
        assert_eq!(match_ranges("Éclat", "cl"), vec![(1, 3)]);
        assert!(match_ranges("Dune", "").is_empty());
    }
}
