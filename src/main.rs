use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use rollcall::application::workflow::ScanWorkflow;
use rollcall::domain::ports::{AttendanceStoreBox, ConfigStore, ConfirmGate};
use rollcall::domain::session::SessionColumn;
use rollcall::infrastructure::config_file::FileConfigStore;
use rollcall::infrastructure::in_memory::InMemoryAttendanceStore;
use rollcall::infrastructure::rest::{DEFAULT_TABLE, RestTableStore};
use rollcall::interfaces::console::{AutoConfirmGate, ConsoleNotifier, StdinConfirmGate};
use rollcall::interfaces::csv::roster_reader::RosterReader;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (defaults to the platform config dir)
    #[arg(long, global = true)]
    config_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Select and persist the active day/session/gate
    Configure {
        /// Event day (1-5)
        #[arg(long)]
        day: u8,

        /// Session slot: fn or an
        #[arg(long)]
        session: String,

        /// Gate direction: in or out
        #[arg(long)]
        gate: String,
    },

    /// Process scan payloads, one per line ('-' reads stdin)
    Scan {
        /// File of scan payloads
        input: PathBuf,

        /// Confirm every scan without prompting
        #[arg(long)]
        yes: bool,

        /// Hosted backend base URL (falls back to ROLLCALL_BASE_URL)
        #[arg(long)]
        base_url: Option<String>,

        /// Hosted backend API key (falls back to ROLLCALL_API_KEY)
        #[arg(long)]
        api_key: Option<String>,

        /// Backend table name
        #[arg(long, default_value = DEFAULT_TABLE)]
        table: String,

        /// Roster CSV seeding an in-memory backend instead (dry runs)
        #[arg(long)]
        roster: Option<PathBuf>,

        /// Delay before re-arming after a rejected scan, in milliseconds
        #[arg(long, default_value_t = 3000)]
        rearm_ms: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config_store =
        FileConfigStore::new(cli.config_path.unwrap_or_else(FileConfigStore::default_path));

    match cli.command {
        Command::Configure { day, session, gate } => {
            let column = SessionColumn::new(
                day,
                session.parse().into_diagnostic()?,
                gate.parse().into_diagnostic()?,
            )
            .into_diagnostic()?;
            config_store
                .set_active_session(column)
                .await
                .into_diagnostic()?;
            println!("Active session set to {column}");
        }
        Command::Scan {
            input,
            yes,
            base_url,
            api_key,
            table,
            roster,
            rearm_ms,
        } => {
            let store: AttendanceStoreBox = if let Some(roster) = roster {
                Box::new(seeded_store(&roster).await?)
            } else {
                let base_url = base_url
                    .or_else(|| std::env::var("ROLLCALL_BASE_URL").ok())
                    .ok_or_else(|| {
                        miette::miette!("either --roster or --base-url/ROLLCALL_BASE_URL is required")
                    })?;
                let api_key = api_key
                    .or_else(|| std::env::var("ROLLCALL_API_KEY").ok())
                    .unwrap_or_default();
                Box::new(RestTableStore::new(base_url, api_key).with_table(table))
            };

            let gate: Box<dyn ConfirmGate> = if yes {
                Box::new(AutoConfirmGate)
            } else {
                Box::new(StdinConfirmGate)
            };

            let mut workflow =
                ScanWorkflow::new(store, Box::new(config_store), Box::new(ConsoleNotifier))
                    .with_rearm_delay(Duration::from_millis(rearm_ms));

            let reader: Box<dyn BufRead> = if input == Path::new("-") {
                Box::new(io::stdin().lock())
            } else {
                Box::new(BufReader::new(File::open(&input).into_diagnostic()?))
            };
            for line in reader.lines() {
                let line = line.into_diagnostic()?;
                let outcome = workflow.process_scan(&line, gate.as_ref()).await;
                tracing::debug!(?outcome, "scan processed");
            }
        }
    }

    Ok(())
}

async fn seeded_store(roster: &Path) -> Result<InMemoryAttendanceStore> {
    let file = File::open(roster).into_diagnostic()?;
    let store = InMemoryAttendanceStore::new();
    for row in RosterReader::new(file).rows().into_diagnostic()? {
        let row = row.into_diagnostic()?;
        for (column, present) in &row.flags {
            store.insert(row.id.as_str(), column, *present).await;
        }
    }
    Ok(store)
}
