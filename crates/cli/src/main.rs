// Bingo CLI - fill a copy of a mask sheet with randomly drawn items
// Configuration: $BINGO_CONFIG, ./params.json, or ~/.config/bingo/config.json

mod exit_codes;

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use bingo_cli::generate::{generate_bingo, GridRequest, RunError, RunErrorKind, RunOptions};
use bingo_config::{Config, ConfigError, CONFIG_ENV, LOCAL_CONFIG_FILE};
use bingo_engine::EngineError;
use bingo_sheets_client::{resolve_access_token, SheetsClient, SheetsError};

use exit_codes::{
    config_exit_code, engine_exit_code, sheets_exit_code, EXIT_SUCCESS, EXIT_USAGE,
};

#[derive(Parser)]
#[command(name = "bingo")]
#[command(about = "Generate a bingo grid in Google Sheets from a mask and an item repository")]
#[command(long_version = long_version())]
#[command(version)]
#[command(after_help = "\
Examples:
  bingo --repo Items --mask 123456789 --name 'Week 12'
  BINGO_CONFIG=~/bingo.json bingo --repo Items --mask 0 --name Round-2
  RUST_LOG=debug bingo --repo Items --mask 0 --name Test")]
struct Cli {
    /// Name of the sheet holding the item repository (one column per category)
    #[arg(long, value_name = "SHEET")]
    repo: String,

    /// Sheet id (gid) of the mask sheet to duplicate
    #[arg(long, value_name = "ID", value_parser = clap::value_parser!(i64).range(0..))]
    mask: i64,

    /// Name of the new sheet that receives the grid
    #[arg(long, value_name = "NAME")]
    name: String,
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_COMMIT_HASH"), ")",
        "\nengine:  bingo-engine ", env!("CARGO_PKG_VERSION"),
        "\ntarget:  ", env!("TARGET"),
    )
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version come through here too
            let _ = err.print();
            return ExitCode::from(if err.use_stderr() { EXIT_USAGE } else { EXIT_SUCCESS });
        }
    };

    match cmd_generate(cli) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

fn cmd_generate(cli: Cli) -> Result<(), CliError> {
    let config_path = Config::resolve_path();
    log::debug!("using config {}", config_path.display());
    let config = Config::load(&config_path).map_err(CliError::config)?;

    let http = SheetsClient::http_client(Duration::from_secs(config.timeout_secs))
        .map_err(CliError::sheets)?;
    let token = resolve_access_token(&http, &config.credentials_path, &config.token_path)
        .map_err(CliError::sheets)?;
    let service = SheetsClient::new(http, config.api_base.clone(), token);

    let mut rng = match config.seed {
        Some(seed) => {
            log::info!("using fixed seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let request = GridRequest {
        repo_sheet: cli.repo,
        mask_sheet_id: cli.mask,
        grid_sheet: cli.name,
    };
    let options = RunOptions {
        cells: config.cells.clone(),
        blank_cells: config.blank_cells,
    };

    let summary = generate_bingo(&service, &config.spreadsheet_id, &request, &options, &mut rng)
        .map_err(CliError::run)?;
    log::info!(
        "wrote {} cell(s) across {} categor{} to {}",
        summary.cells,
        summary.categories,
        if summary.categories == 1 { "y" } else { "ies" },
        summary.range
    );
    Ok(())
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn config(err: ConfigError) -> Self {
        let hint = match &err {
            ConfigError::NotFound(_) => Some(format!(
                "set {} or create ./{} (see --help)",
                CONFIG_ENV, LOCAL_CONFIG_FILE
            )),
            _ => None,
        };
        Self { code: config_exit_code(&err), message: err.to_string(), hint }
    }

    pub fn sheets(err: SheetsError) -> Self {
        let hint = match &err {
            SheetsError::NotAuthenticated(_) => {
                Some("authorize once to create the token file named by token_path".to_string())
            }
            _ => None,
        };
        Self { code: sheets_exit_code(&err), message: err.to_string(), hint }
    }

    /// Run failures carry the stage; anything after duplication also
    /// leaves a sheet behind that still shows the mask labels.
    pub fn run(err: RunError) -> Self {
        let code = match &err.kind {
            RunErrorKind::Sheets(e) => sheets_exit_code(e),
            RunErrorKind::Engine(e) => engine_exit_code(e),
        };
        let hint = match &err.kind {
            RunErrorKind::Engine(EngineError::CategoryNotFound(category)) if category.trim().is_empty() => {
                Some("the mask has blank cells; add a blank-named column or set \"blank_cells\": \"skip\"".to_string())
            }
            RunErrorKind::Sheets(SheetsError::NotAuthenticated(_)) => {
                Some("authorize once to create the token file named by token_path".to_string())
            }
            _ if err.left_unfilled_sheet() => {
                Some("the duplicated sheet was left unfilled; delete it before retrying with the same name".to_string())
            }
            _ => None,
        };
        Self { code, message: err.to_string(), hint }
    }
}
