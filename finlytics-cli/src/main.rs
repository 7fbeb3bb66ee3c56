use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};
use finlytics_core::{
    Category, CategoryFilter, Completion, FilterCriteria, ParsedResult, SelectedFile, Session,
    validate_selection,
};
use finlytics_export::{ExportFormat, export_date, export_session};
use finlytics_ingest::{UploadClient, decode_parsed_result, submit};
use log::warn;
use std::io;
use std::path::PathBuf;

mod config;
mod onboard;
mod render;
mod state;

use config::{BASE_URL_ENV, Config};

#[derive(Parser, Debug)]
#[command(
    name = "finlytics",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("FINLYTICS_BUILD_SHA"), ")"),
    about = "Parse bank statements, filter transactions and export spreadsheets"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive six-step introduction
    Onboard,

    /// Upload a statement to the parsing service and show the result
    Parse {
        /// CSV, PDF or image statement; only the first file is uploaded
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Write the parsed result as JSON for later `finlytics view`
        #[arg(long)]
        save: Option<PathBuf>,

        #[command(flatten)]
        filter: FilterArgs,

        #[command(flatten)]
        export: ExportArgs,
    },

    /// Filter and export a previously saved parse result
    View {
        /// JSON written by `finlytics parse --save`
        result: PathBuf,

        #[command(flatten)]
        filter: FilterArgs,

        #[command(flatten)]
        export: ExportArgs,
    },

    /// Manage ~/.finlytics/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,
    /// Print the effective config
    Show,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CategoryArg {
    All,
    MoneyIn,
    MoneyOut,
    Other,
}

impl From<CategoryArg> for CategoryFilter {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::All => CategoryFilter::All,
            CategoryArg::MoneyIn => CategoryFilter::Only(Category::MoneyIn),
            CategoryArg::MoneyOut => CategoryFilter::Only(Category::MoneyOut),
            CategoryArg::Other => CategoryFilter::Only(Category::Other),
        }
    }
}

#[derive(Args, Debug)]
struct FilterArgs {
    #[arg(long, value_enum, default_value = "all")]
    category: CategoryArg,

    /// Earliest date, inclusive (YYYY-MM-DD)
    #[arg(long, default_value = "")]
    from: String,

    /// Latest date, inclusive (YYYY-MM-DD)
    #[arg(long, default_value = "")]
    to: String,

    /// Minimum signed amount (money out is negative)
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    min: String,

    /// Maximum signed amount
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    max: String,
}

impl FilterArgs {
    fn criteria(&self) -> FilterCriteria {
        FilterCriteria::default()
            .with_category(self.category.into())
            .with_from(self.from.as_str())
            .with_to(self.to.as_str())
            .with_min(self.min.as_str())
            .with_max(self.max.as_str())
    }
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Write the visible transactions to a spreadsheet
    #[arg(long, default_value_t = false)]
    export: bool,

    /// Directory for the exported file (default: export.output_dir)
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// xlsx or csv (default: export.format)
    #[arg(long)]
    format: Option<ExportFormat>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Onboard => {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            let mut out = io::stdout();
            onboard::run_onboarding(&mut input, &mut out)?;
        }

        Command::Parse {
            files,
            save,
            filter,
            export,
        } => {
            let cfg = config::load_config()?;
            let selection = files
                .iter()
                .map(SelectedFile::read)
                .collect::<Result<Vec<_>>>()?;
            validate_selection(&selection)?;
            if selection.len() > 1 {
                warn!(
                    "{} files selected; only {} will be uploaded",
                    selection.len(),
                    selection[0].name
                );
            }

            let mut session = Session::new();
            session.select_files(selection);

            let base_url = cfg.base_url(std::env::var(BASE_URL_ENV).ok().as_deref());
            let client = UploadClient::new(base_url, cfg.timeout())?;
            match submit(&mut session, &client).await? {
                Completion::Installed { .. } => {}
                Completion::Failed(err) => bail!("{}: {err}", err.notice()),
                Completion::Stale => bail!("upload was superseded"),
            }

            if let (Some(path), Some(parsed)) = (save, session.parsed()) {
                let json = serde_json::to_vec_pretty(parsed).context("serialize parse result")?;
                std::fs::write(&path, json)
                    .with_context(|| format!("write {}", path.display()))?;
                println!("Saved result to {}", path.display());
            }

            show(&mut session, &cfg, &filter, &export)?;
        }

        Command::View {
            result,
            filter,
            export,
        } => {
            let cfg = config::load_config()?;
            let bytes =
                std::fs::read(&result).with_context(|| format!("read {}", result.display()))?;
            let parsed = decode_parsed_result(&bytes)
                .with_context(|| format!("decode {}", result.display()))?;
            let mut session = restore_session(&result, parsed)?;
            show(&mut session, &cfg, &filter, &export)?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = config::load_config()?;
                println!("# {}", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

/// Put a saved result back into a fresh session so filtering and export
/// follow the same path as a live upload.
fn restore_session(source: &std::path::Path, parsed: ParsedResult) -> Result<Session> {
    let name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "result.json".to_string());
    let mut session = Session::new();
    session.select_files(vec![SelectedFile::new(name, Vec::new())]);
    let request = session.begin_upload()?;
    match session.complete_upload(request.ticket, Ok(parsed)) {
        Completion::Installed { .. } => Ok(session),
        other => bail!("could not restore result: {other:?}"),
    }
}

fn show(session: &mut Session, cfg: &Config, filter: &FilterArgs, export: &ExportArgs) -> Result<()> {
    if let Some(parsed) = session.parsed() {
        println!("{}", parsed.summary());
        if parsed.ocr_enabled == Some(true) {
            println!("(text recognized with OCR)");
        }
    }

    session.set_criteria(filter.criteria());
    let visible = session.filtered();
    println!();
    print!("{}", render::transactions_table(&visible));
    println!("\nShowing {} of {}", visible.len(), session.raw().len());

    if export.export {
        let format = match export.format {
            Some(f) => f,
            None => cfg.export_format()?,
        };
        let dir = export
            .out_dir
            .clone()
            .unwrap_or_else(|| cfg.export.output_dir.clone());
        let date = export_date(Utc::now(), cfg.timezone()?);
        match export_session(session, &dir, date, format) {
            Ok(report) => {
                println!("{} {} ({} rows)", report.notice(), report.path.display(), report.rows);
            }
            Err(err) => bail!("{}: {err}", err.notice()),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use finlytics_core::Transaction;

    #[test]
    fn test_cli_parses_filter_flags() {
        let cli = Cli::try_parse_from([
            "finlytics",
            "view",
            "out.json",
            "--category",
            "money-out",
            "--from",
            "2024-01-01",
            "--min",
            "-5",
            "--export",
            "--format",
            "csv",
        ])
        .unwrap();
        match cli.command {
            Command::View { filter, export, .. } => {
                let c = filter.criteria();
                assert_eq!(c.category, CategoryFilter::Only(Category::MoneyOut));
                assert_eq!(c.from, "2024-01-01");
                assert_eq!(c.min, "-5");
                assert!(c.to.is_empty());
                assert!(export.export);
                assert_eq!(export.format, Some(ExportFormat::Csv));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_default_filter_args_are_default_criteria() {
        let cli = Cli::try_parse_from(["finlytics", "view", "out.json"]).unwrap();
        match cli.command {
            Command::View { filter, .. } => assert!(filter.criteria().is_default()),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_requires_a_file() {
        assert!(Cli::try_parse_from(["finlytics", "parse"]).is_err());
    }

    #[test]
    fn test_restore_session_installs_result() {
        let parsed = ParsedResult::from_raw(vec![
            Transaction::new()
                .with_description("Salary")
                .with_deposit(1000.0)
                .with_category(Category::MoneyIn),
        ]);
        let session = restore_session(std::path::Path::new("/tmp/out.json"), parsed).unwrap();
        assert_eq!(session.raw().len(), 1);
        assert_eq!(session.filtered().len(), 1);
    }
}
