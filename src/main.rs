//! itemstore - A Minimal In-Process Item Catalog
//!
//! This is the main entry point for the `itemstore` binary.
//! It builds the configuration, sets up logging, constructs the store and
//! either runs a single command from the arguments or an interactive
//! session on stdin/stdout.

use anyhow::Context;
use itemstore::commands::RequestHandler;
use itemstore::config::{parse_args, Config, Invocation};
use itemstore::protocol::parse_tokens;
use itemstore::session::run_session;
use itemstore::storage;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn print_help() {
    println!(
        r#"
itemstore - A Minimal In-Process Item Catalog

USAGE:
    itemstore [OPTIONS] [COMMAND [ARGS...]]

OPTIONS:
    -m, --max-items <N>      Capacity of the bounded store (default: 100)
    -b, --backend <KIND>     bounded, vec or map (default: bounded)
    -l, --log-level <LEVEL>  debug, info, warn or error (default: info)
    -d, --debug              Log everything down to debug
        --list-limit <N>     Records returned by LIST without a limit (default: 50)
    -v, --version            Print version information
    -h, --help               Print this help message

Without a COMMAND, commands are read line by line from stdin.

COMMANDS:
{}

EXAMPLES:
    itemstore create "blue widget" tools
    printf 'CREATE a\nCREATE b\nDELETE 1\nLIST\n' | itemstore --backend map
"#,
        itemstore::commands::usage()
            .iter()
            .map(|line| format!("    {}", line))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Sets up the tracing subscriber. `RUST_LOG` wins over the configured level.
/// Logs go to stderr so that stdout only carries replies.
fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.effective_log_level().as_str()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Parse command-line arguments
    let invocation = match parse_args(std::env::args().skip(1)) {
        Ok(invocation) => invocation,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Run 'itemstore --help' for usage.");
            std::process::exit(1);
        }
    };

    let (config, command) = match invocation {
        Invocation::Help => {
            print_help();
            return Ok(());
        }
        Invocation::Version => {
            println!("itemstore version {}", itemstore::VERSION);
            return Ok(());
        }
        Invocation::Run { config, command } => (config, command),
    };

    init_logging(&config);

    // Create the store, owned by the handler from here on
    let store = storage::open(config.backend, config.max_items)
        .context("failed to initialize store")?;
    info!(
        backend = %config.backend,
        max_items = config.max_items,
        "Store initialized"
    );
    let mut handler = RequestHandler::new(store).with_list_limit(config.list_limit);

    if !command.is_empty() {
        let request = parse_tokens(&command).context("invalid command")?;
        let response = handler.execute(request);
        println!("{}", response);
        if response.is_error() {
            std::process::exit(1);
        }
        return Ok(());
    }

    let stats = run_session(tokio::io::stdin(), tokio::io::stdout(), &mut handler)
        .await
        .context("session failed")?;
    debug!(
        commands = stats.commands_processed,
        bytes_read = stats.bytes_read,
        bytes_written = stats.bytes_written,
        "Session statistics"
    );

    Ok(())
}
