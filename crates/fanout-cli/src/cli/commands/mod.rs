//! CLI command handlers. Each command is in its own file.

mod sort;
mod words;

pub use sort::{run_sort, SortArgs};
pub use words::{run_words, WordsArgs};
