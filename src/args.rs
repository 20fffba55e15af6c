//! Command-line argument parsing.
//!
//! Hand-rolled to keep the binary small. Every option that takes a value reads
//! the next argument verbatim, so negative coordinates (`--lon -74.006`) work.

use chrono::NaiveDate;

use crate::prayer::{AsrMethod, CalculationMethod};

/// Options for a normal run. `None` means "use the configuration value".
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RunOptions {
    pub date: Option<NaiveDate>,
    pub method: Option<CalculationMethod>,
    pub asr: Option<AsrMethod>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub timezone: Option<String>,
    pub config_dir: Option<String>,
    pub json: bool,
    pub debug_enabled: bool,
}

/// What the binary should do.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Calculate and print prayer times
    Run(RunOptions),
    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to invalid arguments and exit with failure
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

impl ParsedArgs {
    /// Parse arguments, skipping the program name.
    ///
    /// Help and version flags win over everything else. An unknown flag, a
    /// missing value or an unparsable value yields
    /// [`CliAction::ShowHelpDueToError`] after logging the reason.
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args_vec: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        if args_vec.iter().any(|arg| arg == "--help" || arg == "-h") {
            return ParsedArgs {
                action: CliAction::ShowHelp,
            };
        }
        if args_vec.iter().any(|arg| arg == "--version" || arg == "-V") {
            return ParsedArgs {
                action: CliAction::ShowVersion,
            };
        }

        let action = match parse_run_options(&args_vec) {
            Ok(options) => CliAction::Run(options),
            Err(message) => {
                log_warning!("{}", message);
                CliAction::ShowHelpDueToError
            }
        };

        ParsedArgs { action }
    }
}

fn parse_run_options(args: &[String]) -> Result<RunOptions, String> {
    let mut options = RunOptions::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        let arg = arg.as_str();
        let mut value = |name: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("Missing value for {name}"))
        };

        match arg {
            "--date" | "-d" => {
                let raw = value(arg)?;
                let date = NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                    .map_err(|_| format!("Invalid date '{raw}'. Expected YYYY-MM-DD"))?;
                options.date = Some(date);
            }
            "--method" | "-m" => options.method = Some(value(arg)?.parse()?),
            "--asr" | "-a" => options.asr = Some(value(arg)?.parse()?),
            "--lat" | "--latitude" => options.latitude = Some(parse_degrees(&value(arg)?)?),
            "--lon" | "--longitude" => options.longitude = Some(parse_degrees(&value(arg)?)?),
            "--timezone" | "-t" => options.timezone = Some(value(arg)?),
            "--config" | "-c" => options.config_dir = Some(value(arg)?),
            "--json" | "-j" => options.json = true,
            "--debug" | "-D" => options.debug_enabled = true,
            other => return Err(format!("Unknown argument: {other}")),
        }
    }

    Ok(options)
}

fn parse_degrees(raw: &str) -> Result<f64, String> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("Invalid coordinate '{raw}'"))
}

/// Displays version information using the logger.
pub fn display_version_info() {
    log_version!();
    log_pipe!();
    log_decorated!(env!("CARGO_PKG_DESCRIPTION"));
    log_end!();
}

/// Displays the help message using the logger.
pub fn display_help() {
    log_version!();
    log_block_start!(env!("CARGO_PKG_DESCRIPTION"));
    log_block_start!("Usage:");
    log_indented!("miqat [OPTIONS]");
    log_block_start!("Options:");
    log_indented!("-d, --date <YYYY-MM-DD>  Date to calculate (default: today)");
    log_indented!("-m, --method <name>      isna, mwl, egypt, karachi, makkah, tehran, jafari");
    log_indented!("-a, --asr <name>         standard or hanafi");
    log_indented!("    --lat <degrees>      Latitude, degrees north");
    log_indented!("    --lon <degrees>      Longitude, degrees east");
    log_indented!("-t, --timezone <name>    IANA timezone, e.g. America/New_York");
    log_indented!("-c, --config <dir>       Use custom configuration directory");
    log_indented!("-j, --json               Print JSON instead of the table");
    log_indented!("-D, --debug              Show solar diagnostics");
    log_indented!("-h, --help               Print help information");
    log_indented!("-V, --version            Print version information");
    log_end!();
}
