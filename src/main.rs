//! Energy-credit ledger entry point: CLI wiring and config-driven session construction.

use std::process;

use energy_credits::cli::{self, CliOptions, Operation};
use energy_credits::config::SessionConfig;
use energy_credits::logging;
use energy_credits::session::Session;

/// `--scenario` takes priority, then `--preset`, then the demo default.
fn load_config(opts: &CliOptions) -> SessionConfig {
    let loaded = if let Some(ref path) = opts.scenario {
        SessionConfig::from_toml_file(path)
    } else if let Some(ref name) = opts.preset {
        SessionConfig::from_preset(name)
    } else {
        Ok(SessionConfig::demo())
    };

    let config = loaded.unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    config
}

/// Applies scripted operations in order. Rejections are reported and skipped.
fn apply_operations(session: &mut Session, operations: &[Operation], quiet: bool) {
    for op in operations {
        let (name, raw, result) = match op {
            Operation::Sell(raw) => ("sell", raw, session.sell_input(raw)),
            Operation::Buy(raw) => ("buy", raw, session.buy_input(raw)),
        };
        match result {
            Ok(tx) if !quiet => println!("{tx}"),
            Ok(_) => {}
            Err(e) => eprintln!("rejected: {name} {raw}: {e}"),
        }
    }
}

fn main() {
    let opts = cli::parse_args().unwrap_or_else(|e| {
        eprintln!("error: {e}");
        eprintln!();
        cli::print_usage();
        process::exit(1);
    });

    if opts.help {
        cli::print_usage();
        return;
    }

    // The dashboard owns the terminal, so logs stay off unless RUST_LOG asks.
    #[cfg(feature = "tui")]
    let default_directive = if opts.tui { "off" } else { "info" };
    #[cfg(not(feature = "tui"))]
    let default_directive = "info";
    logging::init(default_directive);

    let config = load_config(&opts);
    let state = config.build_state().unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });
    let mut session = Session::with_system_clock(state);

    apply_operations(&mut session, &opts.operations, opts.json);

    let snapshot = session.snapshot();
    if opts.json {
        match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: failed to encode snapshot: {e}");
                process::exit(1);
            }
        }
    } else {
        println!("{snapshot}");
    }

    if let Some(ref path) = opts.export {
        if let Err(e) = session.export_history(path) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("History written to {}", path.display());
    }

    #[cfg(feature = "tui")]
    if opts.tui {
        let export_path = opts
            .export
            .clone()
            .unwrap_or_else(|| config.export.file_name.clone().into());
        if let Err(e) = energy_credits::tui::run(session, export_path) {
            eprintln!("error: TUI crashed: {e}");
            process::exit(1);
        }
        return;
    }

    #[cfg(feature = "api")]
    if opts.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(energy_credits::api::AppState::new(
            session,
            config.export.file_name.clone(),
        ));
        let addr = SocketAddr::from(([0, 0, 0, 0], opts.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        if let Err(e) = rt.block_on(energy_credits::api::serve(state, addr)) {
            eprintln!("error: API server failed: {e}");
            process::exit(1);
        }
    }
}
