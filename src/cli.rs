//! Command-line argument parsing.

use std::env;
use std::path::PathBuf;

/// Default API port.
#[cfg(feature = "api")]
pub const DEFAULT_PORT: u16 = 3000;

/// A scripted ledger operation, applied in command-line order.
///
/// Amounts stay as raw text so they pass through the same boundary parsing as
/// interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// `--sell <kWh>`
    Sell(String),
    /// `--buy <points>`
    Buy(String),
}

#[derive(Debug)]
pub struct CliOptions {
    pub scenario: Option<PathBuf>,
    pub preset: Option<String>,
    pub operations: Vec<Operation>,
    pub export: Option<PathBuf>,
    pub json: bool,
    pub help: bool,
    #[cfg(feature = "api")]
    pub serve: bool,
    #[cfg(feature = "api")]
    pub port: u16,
    #[cfg(feature = "tui")]
    pub tui: bool,
}

pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(args)
}

pub fn parse_args_from(args: Vec<String>) -> Result<CliOptions, String> {
    let mut i = 0usize;
    let mut opts = CliOptions {
        scenario: None,
        preset: None,
        operations: Vec::new(),
        export: None,
        json: false,
        help: false,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: DEFAULT_PORT,
        #[cfg(feature = "tui")]
        tui: false,
    };

    while i < args.len() {
        match args[i].as_str() {
            "--scenario" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --scenario (expected a TOML file path)",
                )?;
                if opts.scenario.replace(PathBuf::from(path)).is_some() {
                    return Err("--scenario provided more than once".to_string());
                }
            }
            "--preset" => {
                i += 1;
                let name =
                    args.next_or_err(i, "missing value for --preset (expected a preset name)")?;
                if opts.preset.replace(name.to_string()).is_some() {
                    return Err("--preset provided more than once".to_string());
                }
            }
            "--sell" => {
                i += 1;
                let kwh = args.next_or_err(i, "missing value for --sell (expected kWh)")?;
                opts.operations.push(Operation::Sell(kwh.to_string()));
            }
            "--buy" => {
                i += 1;
                let points = args.next_or_err(i, "missing value for --buy (expected points)")?;
                opts.operations.push(Operation::Buy(points.to_string()));
            }
            "--export" => {
                i += 1;
                let path =
                    args.next_or_err(i, "missing value for --export (expected a file path)")?;
                if opts.export.replace(PathBuf::from(path)).is_some() {
                    return Err("--export provided more than once".to_string());
                }
            }
            "--json" => opts.json = true,
            #[cfg(feature = "api")]
            "--serve" => opts.serve = true,
            #[cfg(feature = "api")]
            "--port" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --port (expected a u16)")?;
                opts.port = raw
                    .parse()
                    .map_err(|_| format!("--port value \"{raw}\" is not a valid u16"))?;
            }
            #[cfg(feature = "tui")]
            "--tui" => opts.tui = true,
            "--help" | "-h" => opts.help = true,
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if opts.scenario.is_some() && opts.preset.is_some() {
        return Err(
            "arguments `--scenario` and `--preset` are mutually exclusive; choose one source"
                .to_string(),
        );
    }

    Ok(opts)
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("energy-credits — energy-credit ledger for a microgrid dashboard");
    eprintln!();
    eprintln!("Usage: energy-credits [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>   Load seed balances/history from a TOML file");
    eprintln!("  --preset <name>     Use a built-in preset (demo, empty)");
    eprintln!("  --sell <kWh>        Sell stored energy for points (repeatable)");
    eprintln!("  --buy <points>      Spend points on stored energy (repeatable)");
    eprintln!("  --export <path>     Write transaction history to CSV");
    eprintln!("  --json              Print the final snapshot as JSON");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve             Start the REST API after scripted operations");
        eprintln!("  --port <u16>        API server port (default: {DEFAULT_PORT})");
    }
    #[cfg(feature = "tui")]
    {
        eprintln!("  --tui               Open the interactive terminal dashboard");
    }
    eprintln!("  --help              Show this help message");
    eprintln!();
    eprintln!("Operations run in the order given. If no --scenario or --preset is given,");
    eprintln!("the demo preset is used.");
}
