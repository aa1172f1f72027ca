//! Stable ordering of the catalog by a chosen field.
//!
//! Title and author use a top-down merge sort on lowercased keys. Equal keys keep
//! the left element first, so records that compare equal stay in their input order.
//! Year uses a descending stable sort with missing years treated as 0. `Recent` is
//! not a computed order: it means "the order the backend returned".

use crate::domain::Book;

/// Field the catalog view is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Original fetch order.
    #[default]
    Recent,
    /// Title, case-insensitive ascending.
    Title,
    /// Author, case-insensitive ascending.
    Author,
    /// Publication year, newest first.
    Year,
}

impl SortKey {
    /// Next key in the cycle `Recent → Title → Author → Year → Recent`.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Recent => Self::Title,
            Self::Title => Self::Author,
            Self::Author => Self::Year,
            Self::Year => Self::Recent,
        }
    }

    /// Label shown in the header.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Recent => "Recent",
            Self::Title => "Title",
            Self::Author => "Author",
            Self::Year => "Year",
        }
    }
}

/// Returns `books` ordered by `key`.
///
/// For [`SortKey::Recent`] the input is returned unchanged; callers pass the
/// collection in fetch order.
///
/// # Examples
///
/// ```
/// use folio::Book;
/// use folio::catalog::{sort_books, SortKey};
///
/// let books = vec![
///     Book { title: Some("b".into()), ..Book::default() },
///     Book { title: Some("A".into()), ..Book::default() },
/// ];
/// let sorted = sort_books(books, SortKey::Title);
/// assert_eq!(sorted[0].title.as_deref(), Some("A"));
/// ```
#[must_use]
pub fn sort_books(books: Vec<Book>, key: SortKey) -> Vec<Book> {
    let _span = tracing::debug_span!("sort_books", count = books.len(), key = ?key).entered();

    match key {
        SortKey::Recent => books,
        SortKey::Title => merge_sort(books, &|b: &Book| b.title_text().to_lowercase()),
        SortKey::Author => merge_sort(books, &|b: &Book| b.author_text().to_lowercase()),
        SortKey::Year => sort_by_year_desc(books),
    }
}

/// Stable merge sort by an extracted string key.
fn merge_sort<F>(mut books: Vec<Book>, key: &F) -> Vec<Book>
where
    F: Fn(&Book) -> String,
{
    if books.len() <= 1 {
        return books;
    }

    let right = books.split_off(books.len() / 2);
    let left = merge_sort(books, key);
    let right = merge_sort(right, key);
    merge(left, right, key)
}

fn merge<F>(left: Vec<Book>, right: Vec<Book>, key: &F) -> Vec<Book>
where
    F: Fn(&Book) -> String,
{
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        let take_left = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => key(l) <= key(r),
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };

        let next = if take_left { left.next() } else { right.next() };
        merged.extend(next);
    }

    merged
}

fn sort_by_year_desc(mut books: Vec<Book>) -> Vec<Book> {
    books.sort_by(|a, b| b.year_or_zero().cmp(&a.year_or_zero()));
    books
}
