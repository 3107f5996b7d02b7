//! `folio`: browse a paginated collection from the terminal and keep a
//! selection that spans pages.

mod commands;
mod settings;
mod synthetic;

use anyhow::{Context, Result};
use clap::Parser;
use commands::{Command, Flow};
use folio_browser::{MemorySource, Session};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "folio", version, about)]
struct Args {
    /// Configuration file (TOML, YAML or JSON)
    #[arg(long, env = "FOLIO_CONFIG")]
    config: Option<PathBuf>,

    /// Rows per page, overriding the configuration
    #[arg(long)]
    page_size: Option<u32>,

    /// JSON array of records to browse instead of a generated collection
    #[arg(long)]
    data: Option<PathBuf>,

    /// Size of the generated collection
    #[arg(long, default_value_t = 250)]
    records: u64,

    /// Seed for the generated collection
    #[arg(long, default_value_t = 7)]
    seed: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("folio=info,folio_browser=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = settings::load(args.config.as_deref(), args.page_size)?;

    let records = match &args.data {
        Some(path) => synthetic::load(path)?,
        None => synthetic::collection(args.records, args.seed),
    };
    info!(
        records = records.len(),
        page_size = config.page_size,
        "starting browser"
    );

    let mut session = Session::new(MemorySource::new(records), &config)?;
    let mut stdout = std::io::stdout();

    commands::execute(&mut session, Command::Page(1), &mut stdout).await?;
    writeln!(stdout, "type `help` for commands")?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let Some(line) = lines.next_line().await.context("failed to read input")? else {
            break;
        };
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(stdout, "{:#}", err)?;
                continue;
            }
        };
        if commands::execute(&mut session, command, &mut stdout).await? == Flow::Quit {
            break;
        }
    }

    info!(selected = session.selection().count(), "exiting");
    Ok(())
}
