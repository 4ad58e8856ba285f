pub mod diag;
pub mod supervisor;
pub use diag::{DiagLog, Sink, logger_installed};
pub use supervisor::{Supervisor, SupervisorStats};
