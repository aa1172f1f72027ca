//! Filter predicates and the ordered filter queue.
//!
//! A [`Predicate`] selects a subset of books by one attribute and preserves the
//! input order. A [`FilterQueue`] folds its predicates over a collection from left
//! to right, so the result is the intersection of every predicate's accepted set.

use super::search;
use crate::domain::Book;

/// A single attribute filter over the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Title or author contains the query (case-insensitive).
    Search(String),
    /// Category (`type`) equals the value exactly.
    Category(String),
    /// Genre equals the value exactly.
    Genre(String),
    /// Publication year is at least the value; missing years count as 0.
    MinYear(i64),
}

impl Predicate {
    /// Applies this predicate, returning the accepted books in input order.
    #[must_use]
    pub fn apply(&self, books: Vec<Book>) -> Vec<Book> {
        match self {
            Self::Search(query) => {
                let needle = query.to_lowercase();
                books.into_iter().filter(|b| search::matches(b, &needle)).collect()
            }
            Self::Category(kind) => books
                .into_iter()
                .filter(|b| b.kind.as_deref() == Some(kind.as_str()))
                .collect(),
            Self::Genre(genre) => books
                .into_iter()
                .filter(|b| b.genre.as_deref() == Some(genre.as_str()))
                .collect(),
            Self::MinYear(year) => books
                .into_iter()
                .filter(|b| b.year_or_zero() >= *year)
                .collect(),
        }
    }
}

/// Ordered sequence of predicates applied one after another.
///
/// An empty queue is the identity transform. The queue is meant to be cleared and
/// repopulated as a whole whenever the selections change, so that predicates from
/// earlier interactions never accumulate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterQueue {
    predicates: Vec<Predicate>,
}

impl FilterQueue {
    #[must_use]
    pub const fn new() -> Self {
        Self { predicates: Vec::new() }
    }

    /// Appends a predicate to the end of the queue.
    pub fn add(&mut self, predicate: Predicate) {
        self.predicates.push(predicate);
    }

    /// Removes every predicate.
    pub fn clear(&mut self) {
        self.predicates.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    /// Folds the queue over `books` left to right and returns the surviving books.
    ///
    /// # Examples
    ///
    /// ```
    /// use folio::Book;
    /// use folio::catalog::{FilterQueue, Predicate};
    ///
    /// let books = vec![
    ///     Book { genre: Some("Fantasy".into()), year: Some(1954), ..Book::default() },
    ///     Book { genre: Some("Fantasy".into()), year: Some(1996), ..Book::default() },
    /// ];
    /// let mut queue = FilterQueue::new();
    /// queue.add(Predicate::Genre("Fantasy".into()));
    /// queue.add(Predicate::MinYear(1990));
    /// assert_eq!(queue.apply(&books).len(), 1);
    /// ```
    #[must_use]
    pub fn apply(&self, books: &[Book]) -> Vec<Book> {
        let _span = tracing::debug_span!("filter_queue_apply",
            input = books.len(),
            predicates = self.predicates.len()
        ).entered();

        let result = self
            .predicates
            .iter()
            .fold(books.to_vec(), |acc, predicate| predicate.apply(acc));

        tracing::debug!(output = result.len(), "filter queue applied");
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn book(id: &str, genre: &str, kind: &str, year: Option<i64>) -> Book {
        Book {
            id: Some(id.to_string()),
            genre: Some(genre.to_string()),
            kind: Some(kind.to_string()),
            year,
            ..Book::default()
        }
    }

    fn sample() -> Vec<Book> {
        vec![
            book("1", "Fantasy", "novel", Some(1954)),
            book("2", "Science Fiction", "novel", Some(1965)),
            book("3", "Fantasy", "comic", Some(2001)),
            book("4", "Fantasy", "novel", None),
        ]
    }

    fn ids(books: &[Book]) -> Vec<&str> {
        books.iter().filter_map(|b| b.id.as_deref()).collect()
    }

    #[test]
    fn empty_queue_is_identity() {
        let queue = FilterQueue::new();
        assert_eq!(queue.apply(&sample()), sample());
    }

    #[test]
    fn composition_order_does_not_change_the_result() {
        let mut genre_first = FilterQueue::new();
        genre_first.add(Predicate::Genre("Fantasy".into()));
        genre_first.add(Predicate::MinYear(1960));

        let mut year_first = FilterQueue::new();
        year_first.add(Predicate::MinYear(1960));
        year_first.add(Predicate::Genre("Fantasy".into()));

        assert_eq!(genre_first.apply(&sample()), year_first.apply(&sample()));
        assert_eq!(ids(&genre_first.apply(&sample())), vec!["3"]);
    }

    #[test]
    fn missing_year_counts_as_zero() {
        let mut queue = FilterQueue::new();
        queue.add(Predicate::MinYear(1));
        assert!(!ids(&queue.apply(&sample())).contains(&"4"));
    }

    #[test]
    fn category_match_is_exact() {
        let mut queue = FilterQueue::new();
        queue.add(Predicate::Category("Novel".into()));
        assert!(queue.apply(&sample()).is_empty());

        queue.clear();
        queue.add(Predicate::Category("novel".into()));
        assert_eq!(ids(&queue.apply(&sample())), vec!["1", "2", "4"]);
    }

    #[test]
    fn clear_drops_stale_predicates() {
        let mut queue = FilterQueue::new();
        queue.add(Predicate::Genre("Horror".into()));
        assert!(queue.apply(&sample()).is_empty());

        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.apply(&sample()).len(), 4);
    }
}
