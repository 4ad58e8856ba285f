use crate::config::{LogConfig, SinkKind};
use crate::errors::AdapterError;
use log::LevelFilter;
use std::{
    fmt, io::{self, Write},
    sync::{Mutex, OnceLock},
};
pub const DEFAULT_TARGET: &str = "catchwrap";
static GLOBAL: OnceLock<DiagLog> = OnceLock::new();
/// Where diagnostic text ends up.
pub enum Sink {
    /// The `log` facade, under the given target.
    Structured { target: String },
    /// A raw byte stream, stderr unless overridden.
    Stream(Mutex<Box<dyn Write + Send>>),
}
/// Best-effort diagnostic logger for failures nobody else handled.
///
/// Nothing in the adapter calls this; it is for call sites (and the
/// supervisor) that decide to report an unmatched failure.
pub struct DiagLog {
    sink: Sink,
}
/// True once a logger has been installed and enabled at some level.
pub fn logger_installed() -> bool {
    log::max_level() != LevelFilter::Off
}
impl DiagLog {
    pub fn new() -> Self {
        if logger_installed() {
            Self::structured(DEFAULT_TARGET)
        } else {
            Self::stderr()
        }
    }
    pub fn structured(target: impl Into<String>) -> Self {
        Self {
            sink: Sink::Structured {
                target: target.into(),
            },
        }
    }
    pub fn stderr() -> Self {
        Self::stream(io::stderr())
    }
    pub fn stream(writer: impl Write + Send + 'static) -> Self {
        Self {
            sink: Sink::Stream(Mutex::new(Box::new(writer))),
        }
    }
    pub fn from_config(config: &LogConfig) -> Result<Self, AdapterError> {
        config.validate()?;
        Ok(
            match config.sink {
                SinkKind::Auto if logger_installed() => Self::structured(&config.target),
                SinkKind::Auto | SinkKind::Stderr => Self::stderr(),
                SinkKind::Structured => Self::structured(&config.target),
            },
        )
    }
    /// The process-wide logger. The sink is chosen on first use and never
    /// changes afterwards, so install any `log` backend before calling this.
    pub fn global() -> &'static DiagLog {
        GLOBAL.get_or_init(DiagLog::new)
    }
    pub fn is_structured(&self) -> bool {
        matches!(self.sink, Sink::Structured { .. })
    }
    pub fn log_message(&self, text: &str) {
        match &self.sink {
            Sink::Structured { target } => log::warn!(target: target.as_str(), "{}", text),
            Sink::Stream(stream) => self.write_stream(stream, format_args!("{}\n", text)),
        }
    }
    /// Like [`log_message`](Self::log_message), followed by the failure's
    /// `Debug` rendering (for `anyhow::Error`: cause chain and backtrace).
    pub fn log_failure(&self, text: &str, failure: &dyn fmt::Debug) {
        match &self.sink {
            Sink::Structured { target } => {
                log::error!(target: target.as_str(), "{}\n{:?}", text, failure)
            }
            Sink::Stream(stream) => {
                self.write_stream(stream, format_args!("{}\n{:?}\n", text, failure))
            }
        }
    }
    fn write_stream(&self, stream: &Mutex<Box<dyn Write + Send>>, args: fmt::Arguments<'_>) {
        let mut stream = stream.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let _ = stream.write_fmt(args);
        let _ = stream.flush();
    }
}
impl Default for DiagLog {
    fn default() -> Self {
        Self::new()
    }
}
impl fmt::Debug for DiagLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.sink {
            Sink::Structured { target } => write!(f, "DiagLog(structured: {})", target),
            Sink::Stream(_) => f.write_str("DiagLog(stream)"),
        }
    }
}
