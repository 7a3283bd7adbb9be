use std::ffi::OsString;
use std::process;

use clap::Parser;
use hexbound_ffi::BACKTRACE_ENV;
use hexbound_utils::{debug, init_logging_with, LogConfig, LogFormat, LogLevel};

mod caller;

use caller::Report;

/// Parse hexadecimal tokens through the hexbound C interface.
#[derive(Parser, Debug)]
#[command(name = "hexbound")]
#[command(version)]
#[command(
    about = "Parse hexadecimal tokens through the hexbound C interface and report structured errors",
    long_about = None
)]
struct Cli
{
    /// Tokens to parse (digits 0-9a-f, optional 0x prefix). Put tokens that
    /// start with '-' after `--`
    #[arg(required = true)]
    inputs: Vec<OsString>,

    /// Log level (overrides RUST_LOG)
    #[arg(long)]
    log_level: Option<LogLevel>,

    /// Log format: pretty or json (overrides HEXBOUND_LOG_FORMAT)
    #[arg(long)]
    log_format: Option<LogFormat>,

    /// Do not capture backtraces for errors
    #[arg(long, default_value_t = false)]
    no_backtrace: bool,
}

fn main()
{
    let cli = Cli::parse();

    // Set before any error object exists; the library reads it at capture time
    if cli.no_backtrace {
        std::env::set_var(BACKTRACE_ENV, "off");
    }

    let config = LogConfig::from_env()
        .with_level(cli.log_level)
        .with_format(cli.log_format);
    let _guard = match init_logging_with(&config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>>
{
    for input in &cli.inputs {
        debug!(input = ?input, "parsing");
        println!("input: {}", input.to_string_lossy());

        let report = caller::parse(input.as_encoded_bytes())?;
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &Report)
{
    match report {
        Report::Value(value) => println!("value: {value} (0x{value:x})"),
        Report::Failure {
            status,
            message,
            backtrace,
        } => {
            println!("error code: {status}");
            println!("message: {message}");
            if !backtrace.is_empty() {
                println!("backtrace:");
                print!("{backtrace}");
            }
        }
    }
}
