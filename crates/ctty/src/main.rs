use std::env;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use ctty_core::{controlling_tty_device, controlling_tty_path, platform, resolve_controlling_tty_device, ProcessId};
use ctty_utils::{debug, init_logging, init_logging_with_level, LogFormat, LogLevel, LoggingError, LoggingGuard};

/// Print the controlling terminal of this process, as the kernel sees it.
#[derive(Parser, Debug)]
#[command(name = "ctty")]
#[command(version)]
#[command(about = "Print the controlling terminal device of this process (FreeBSD, macOS)", long_about = None)]
struct Cli
{
    #[command(subcommand)]
    command: Commands,

    /// Log level (overrides RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    /// Log format: pretty or json (overrides CTTY_LOG_FORMAT)
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,
}

#[derive(Subcommand, Debug)]
enum Commands
{
    /// Print the controlling terminal's device id
    Device
    {
        /// Print 0 instead of failing when there is no terminal or the lookup fails
        #[arg(long, default_value_t = false)]
        legacy: bool,
    },
    /// Print the controlling terminal's /dev path
    Path,
    /// Show platform, record layout and lookup results
    Info,
}

fn main() -> ExitCode
{
    let cli = Cli::parse();

    // Held until the end of main so the log file is flushed
    let _guard = match init_cli_logging(&cli) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run_command(&cli.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Flags win over the environment. Without either, only warnings are shown
/// so stderr stays quiet.
fn init_cli_logging(cli: &Cli) -> Result<LoggingGuard, LoggingError>
{
    let rust_log_set = env::var_os("RUST_LOG").is_some();
    if cli.log_level.is_none() && cli.log_format.is_none() && rust_log_set {
        return init_logging();
    }

    let level = cli.log_level.or((!rust_log_set).then_some(LogLevel::Warn));
    let format = match cli.log_format {
        Some(format) => format,
        None => LogFormat::from_env()?,
    };
    init_logging_with_level(level, format)
}

fn run_command(command: &Commands) -> Result<ExitCode, Box<dyn std::error::Error>>
{
    debug!(?command, layout = platform::layout_name(), "running command");

    match command {
        Commands::Device { legacy: true } => {
            println!("{}", resolve_controlling_tty_device());
            Ok(ExitCode::SUCCESS)
        }
        Commands::Device { legacy: false } => match controlling_tty_device()? {
            Some(dev) => {
                println!("{dev}");
                Ok(ExitCode::SUCCESS)
            }
            None => {
                println!("none");
                Ok(ExitCode::FAILURE)
            }
        },
        Commands::Path => match controlling_tty_path()? {
            Some(path) => {
                println!("{}", path.display());
                Ok(ExitCode::SUCCESS)
            }
            None => {
                println!("none");
                Ok(ExitCode::FAILURE)
            }
        },
        Commands::Info => {
            print_info();
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn print_info()
{
    println!("platform:    {}", env::consts::OS);
    println!("layout:      {}", platform::layout_name());
    match platform::record_size() {
        Some(size) => println!("record size: {size} bytes"),
        None => println!("record size: n/a"),
    }
    println!("pid:         {}", ProcessId::current());

    match controlling_tty_device() {
        Ok(Some(dev)) => println!("device:      {dev} (0x{:x})", dev.as_raw()),
        Ok(None) => println!("device:      none"),
        Err(e) => println!("device:      error: {e}"),
    }
    match controlling_tty_path() {
        Ok(Some(path)) => println!("path:        {}", path.display()),
        Ok(None) => println!("path:        none"),
        Err(e) => println!("path:        error: {e}"),
    }
}

#[cfg(test)]
mod tests
{
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid()
    {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_legacy_flag()
    {
        let cli = Cli::try_parse_from(["ctty", "device", "--legacy"]).unwrap();
        assert!(matches!(cli.command, Commands::Device { legacy: true }));
    }

    #[test]
    fn test_parses_global_log_options()
    {
        let cli = Cli::try_parse_from(["ctty", "info", "--log-level", "debug", "--log-format", "json"]).unwrap();
        assert_eq!(cli.log_level, Some(LogLevel::Debug));
        assert_eq!(cli.log_format, Some(LogFormat::Json));
    }

    #[test]
    fn test_rejects_unknown_log_level()
    {
        assert!(Cli::try_parse_from(["ctty", "path", "--log-level", "loud"]).is_err());
    }
}
