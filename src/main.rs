//! pricelist CLI - build wholesale and trade price lists from a product spreadsheet
//!
//! ```bash
//! pricelist show Stock.xlsx                       # print the wholesale list
//! pricelist show Stock.xlsx --view trade --json   # trade list as a JSON display tree
//! pricelist export Stock.xlsx --out-dir out/      # write both lists as .xlsx
//! pricelist export Stock.csv --format csv --view trade
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `info`).

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use price_list::export::{export_to_dir, ExportFormat};
use price_list::ingestion::{LoadOptions, SheetSelection, TracingObserver};
use price_list::render::{render, render_text, RenderOptions};
use price_list::session::PriceListSession;
use price_list::ViewKind;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pricelist")]
#[command(about = "Build grouped wholesale and trade price lists from a product spreadsheet", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a price list to stdout (print layout or JSON)
    Show {
        /// Input spreadsheet (.xlsx, .xls, .xlsm, .xlsb, .ods, .csv)
        input: PathBuf,

        /// Which list to show
        #[arg(short, long, value_enum, default_value = "wholesale")]
        view: ViewArg,

        /// Read this sheet instead of Raw_Data / Raw_Data (2) / first sheet
        #[arg(short, long)]
        sheet: Option<String>,

        /// Emit the display tree as JSON
        #[arg(long)]
        json: bool,

        /// Currency symbol for price cells
        #[arg(long, default_value = "£")]
        currency: String,
    },

    /// Export price lists as spreadsheets
    Export {
        /// Input spreadsheet (.xlsx, .xls, .xlsm, .xlsb, .ods, .csv)
        input: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// Which list(s) to export
        #[arg(short, long, value_enum, default_value = "both")]
        view: ExportViewArg,

        /// Output file format
        #[arg(short, long, value_enum, default_value = "xlsx")]
        format: FormatArg,

        /// Read this sheet instead of Raw_Data / Raw_Data (2) / first sheet
        #[arg(short, long)]
        sheet: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ViewArg {
    Wholesale,
    Trade,
}

impl From<ViewArg> for ViewKind {
    fn from(v: ViewArg) -> Self {
        match v {
            ViewArg::Wholesale => ViewKind::Wholesale,
            ViewArg::Trade => ViewKind::Trade,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportViewArg {
    Wholesale,
    Trade,
    Both,
}

impl ExportViewArg {
    fn kinds(self) -> Vec<ViewKind> {
        match self {
            ExportViewArg::Wholesale => vec![ViewKind::Wholesale],
            ExportViewArg::Trade => vec![ViewKind::Trade],
            ExportViewArg::Both => ViewKind::ALL.to_vec(),
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Xlsx,
    Csv,
}

impl From<FormatArg> for ExportFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Xlsx => ExportFormat::Xlsx,
            FormatArg::Csv => ExportFormat::Csv,
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn load_session(input: &Path, sheet: Option<String>) -> Result<PriceListSession> {
    let options = LoadOptions {
        sheet_selection: sheet.map(SheetSelection::Named).unwrap_or_default(),
        observer: Some(Arc::new(TracingObserver)),
        ..Default::default()
    };
    let mut session = PriceListSession::new(options);
    session
        .load_path(input)
        .with_context(|| format!("failed to load {}", input.display()))?;
    Ok(session)
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Show {
            input,
            view,
            sheet,
            json,
            currency,
        } => {
            let session = load_session(&input, sheet)?;
            let lists = session.lists().context("no price lists loaded")?;
            let options = RenderOptions {
                currency_symbol: currency,
            };
            let tree = render(lists.get(view.into()), &options);
            if json {
                println!("{}", serde_json::to_string_pretty(&tree)?);
            } else {
                print!("{}", render_text(&tree));
            }
        }

        Commands::Export {
            input,
            out_dir,
            view,
            format,
            sheet,
        } => {
            let session = load_session(&input, sheet)?;
            let lists = session.lists().context("no price lists loaded")?;
            std::fs::create_dir_all(&out_dir)
                .with_context(|| format!("failed to create {}", out_dir.display()))?;
            for kind in view.kinds() {
                let path = export_to_dir(lists.get(kind), &out_dir, format.into())?;
                println!("{}", path.display());
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
