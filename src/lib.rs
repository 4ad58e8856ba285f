//! Wrap a callable so that *expected* failures come back as values.
//!
//! Supervisors of many concurrent tasks tend to log and drop whatever error a
//! task ends with. Routine failures (a peer hanging up, a parse of bad input)
//! are better handed back to the caller. [`ErrorAdapter`] does exactly that:
//!
//! ```
//! use catchwrap::{ErrorAdapter, ErrorTypes, Outcome};
//! use std::num::ParseIntError;
//!
//! let parse = ErrorAdapter::new(
//!     ErrorTypes::new().with::<ParseIntError>().unwrap(),
//!     |s: &str| -> anyhow::Result<i64> { Ok(s.parse::<i64>()?) },
//! );
//! assert!(matches!(parse.call(("12",)), Ok(Outcome::Returned(12))));
//! assert!(matches!(parse.call(("xx",)), Ok(Outcome::Captured(_))));
//! ```
pub mod adapter;
pub mod config;
pub mod errors;
pub mod monitoring;
pub use adapter::{AsyncTarget, ErrorAdapter, Outcome, Target, wrap_errors};
pub use config::{LogConfig, SinkKind};
pub use errors::{AdapterError, Categories, Categorized, Category, ErrorTypes, Matcher, Nothing, When};
pub use monitoring::{DiagLog, Supervisor, SupervisorStats};
