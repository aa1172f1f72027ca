//! Catalog view pipeline: search, filter queue, sort.
//!
//! ```text
//! fetched books → FilterQueue (Search, Category, Genre, MinYear) → sort_books → view
//! ```
//!
//! Every step is a pure function from a collection to a new collection, so the
//! view can be rebuilt from the fetched books at any time.
//!
//! # Modules
//!
//! - [`filter`]: Attribute predicates and the ordered filter queue
//! - [`search`]: Case-insensitive substring matching over title/author
//! - [`sort`]: Stable ordering by title, author, or year
//! - [`categories`]: Distinct categories and genres for the filter controls

pub mod categories;
pub mod filter;
pub mod search;
pub mod sort;

pub use filter::{FilterQueue, Predicate};
pub use search::linear_search;
pub use sort::{sort_books, SortKey};
