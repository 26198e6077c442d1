use std::process;

use modulith::{
    cli::{Args, Command},
    error::{ErrorSeverity, ModulithError},
};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
const LOG_ENV: &str = "MODULITH_LOG";

fn main() {
    let args = Args::parse_args();

    init_logging(&args);

    let command = Command::from_args(args);
    let exit_code = run_command(command);

    process::exit(exit_code);
}

/// Log to stderr; `MODULITH_LOG` overrides the level implied by -q / -v
fn init_logging(args: &Args) {
    let default_level = if args.quiet {
        "error"
    } else if args.verbose {
        "info"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Run the command and map the outcome to an exit code
fn run_command(command: Command) -> i32 {
    match command.execute() {
        Ok(()) => 0,
        Err(err) => {
            match &err {
                // The report already lists every violation
                ModulithError::Violations(violations) => {
                    eprintln!("\n{} architecture violation(s) found", violations.len());
                }
                _ => eprintln!("\nError: {}", err.user_message()),
            }

            let exit_code = match err.severity() {
                ErrorSeverity::Warning => 0,
                ErrorSeverity::Error => 1,
                ErrorSeverity::Critical => 2,
            };

            if exit_code > 0 {
                tracing::debug!(exit_code, severity = %err.severity(), "exiting");
            }

            exit_code
        }
    }
}
