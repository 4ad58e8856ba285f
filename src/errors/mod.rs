pub mod types;
pub mod matcher;
pub use types::{AdapterError, Category, Categorized};
pub use matcher::{Categories, ErrorTypes, Matcher, Nothing, When};
