use anyhow::{Context, Result};
use catchwrap::{
    Categories, Categorized, Category, DiagLog, ErrorAdapter, LogConfig, Outcome, Supervisor,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::{fmt, sync::Arc};
#[derive(Parser, Debug)]
#[command(
    name = "catchwrap",
    author,
    version,
    about = "Run callables whose expected failures come back as values",
    long_about = r#"
Catchwrap wraps a callable together with a set of "expected" error categories.
Calls that fail with one of those categories return the error as a value; any
other failure propagates unchanged.

EXAMPLES:
  catchwrap divide 10 2                            # prints 5
  catchwrap divide 10 0 --catch divide-by-zero     # prints the captured error
  catchwrap divide 10 x --catch divide-by-zero     # fails: parse error not caught
  catchwrap swarm --tasks 20 --catch divide-by-zero
    "#
)]
struct Opt {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}
#[derive(Subcommand, Debug)]
enum Commands {
    Divide {
        #[arg(value_name = "NUMERATOR", allow_hyphen_values = true)]
        numerator: String,
        #[arg(value_name = "DENOMINATOR", allow_hyphen_values = true)]
        denominator: String,
        #[arg(
            short,
            long = "catch",
            value_enum,
            help = "Error category to return as a value (repeatable)"
        )]
        catch: Vec<CalcKind>,
    },
    Swarm {
        #[arg(short, long, default_value_t = 12, help = "Number of supervised tasks")]
        tasks: u32,
        #[arg(
            short,
            long = "catch",
            value_enum,
            help = "Error category to return as a value (repeatable)"
        )]
        catch: Vec<CalcKind>,
    },
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
enum CalcKind {
    DivideByZero,
    Parse,
    Overflow,
}
impl Category for CalcKind {}
#[derive(Debug, Clone, PartialEq, Eq)]
enum CalcError {
    DivideByZero { numerator: i64 },
    Parse { input: String },
    Overflow,
}
impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalcError::DivideByZero { numerator } => write!(f, "cannot divide {} by zero", numerator),
            CalcError::Parse { input } => write!(f, "not an integer: {:?}", input),
            CalcError::Overflow => f.write_str("integer overflow"),
        }
    }
}
impl std::error::Error for CalcError {}
impl Categorized for CalcError {
    type Category = CalcKind;
    fn category(&self) -> CalcKind {
        match self {
            CalcError::DivideByZero { .. } => CalcKind::DivideByZero,
            CalcError::Parse { .. } => CalcKind::Parse,
            CalcError::Overflow => CalcKind::Overflow,
        }
    }
}
fn parse_operand(input: &str) -> Result<i64, CalcError> {
    input.trim().parse().map_err(|_| CalcError::Parse {
        input: input.to_string(),
    })
}
fn divide(numerator: &str, denominator: &str) -> Result<i64, CalcError> {
    let a = parse_operand(numerator)?;
    let b = parse_operand(denominator)?;
    if b == 0 {
        return Err(CalcError::DivideByZero { numerator: a });
    }
    a.checked_div(b).ok_or(CalcError::Overflow)
}
fn main() -> Result<()> {
    let opt = Opt::parse();
    let log_config = LogConfig {
        verbosity: opt.verbose.min(3),
        ..LogConfig::default()
    };
    log_config.init_logger()?;
    match opt.command {
        Commands::Divide { numerator, denominator, catch } => {
            handle_divide(&numerator, &denominator, catch)?;
        }
        Commands::Swarm { tasks, catch } => {
            let diag = DiagLog::from_config(&log_config)?;
            handle_swarm(tasks, catch, diag)?;
        }
    }
    Ok(())
}
fn handle_divide(numerator: &str, denominator: &str, catch: Vec<CalcKind>) -> Result<()> {
    let adapter = ErrorAdapter::new(Categories::new(catch)?, divide);
    match adapter.call((numerator, denominator))? {
        Outcome::Returned(value) => println!("{}", value),
        Outcome::Captured(error) => {
            println!("captured {:?}: {}", error.category(), error)
        }
    }
    Ok(())
}
#[derive(Debug, Default, PartialEq, Eq)]
struct SwarmReport {
    returned: u32,
    captured: u32,
    discarded: u32,
}
/// Operands for task `i`: every fourth divides by zero, every seventh has a
/// malformed denominator.
fn swarm_operands(i: u32) -> (String, String) {
    let numerator = (i64::from(i) + 1) * 10;
    let denominator = if i % 7 == 6 { format!("{}?", i) } else { (i % 4).to_string() };
    (numerator.to_string(), denominator)
}
async fn run_swarm(tasks: u32, catch: Vec<CalcKind>, diag: DiagLog) -> Result<SwarmReport> {
    let adapter = Arc::new(ErrorAdapter::new(Categories::new(catch)?, divide));
    let supervisor = Supervisor::new(Arc::new(diag));
    let handles: Vec<_> = (0..tasks)
        .map(|i| {
            let adapter = Arc::clone(&adapter);
            supervisor
                .spawn(
                    format!("divide-{}", i),
                    async move {
                        let (a, b) = swarm_operands(i);
                        tokio::task::yield_now().await;
                        Ok::<_, anyhow::Error>(adapter.call((a.as_str(), b.as_str()))?)
                    },
                )
        })
        .collect();
    let mut report = SwarmReport::default();
    for handle in handles {
        match handle.await.context("supervisor task vanished")? {
            Some(Outcome::Returned(_)) => report.returned += 1,
            Some(Outcome::Captured(_)) => report.captured += 1,
            None => report.discarded += 1,
        }
    }
    Ok(report)
}
fn handle_swarm(tasks: u32, catch: Vec<CalcKind>, diag: DiagLog) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
    let report = runtime.block_on(run_swarm(tasks, catch, diag))?;
    println!("Swarm of {} task(s):", tasks);
    println!("==================");
    println!("  returned:  {}", report.returned);
    println!("  captured:  {}", report.captured);
    println!("  discarded: {} (logged by the supervisor)", report.discarded);
    Ok(())
}
