use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use steam_ban_sheet::cli;
use steam_ban_sheet::config::{load_records, PartialSheetConfig};
use steam_ban_sheet::{ColumnLetter, ProfileSheet};

#[derive(Parser)]
#[command(name = "ban-sheet")]
#[command(about = "Write Steam game-ban counts into a Google Sheet roster")]
#[command(long_about = "ban-sheet - keep a roster sheet's game-ban column current

The roster's first tab holds five header rows, then one Steam profile link
per row in the link column. ban-sheet reads those links, extracts each
17-digit Steam id, and writes every player's game-ban count into the ban
column on the matching row.

COMMANDS:
  links    - Print the profile links below the header rows
  ids      - Print the Steam id extracted from each link
  update   - Write game-ban counts from a records file

CONFIG (sheet.yaml):
  sheet_key: 1AbCdEfGhIjKlMnOpQrStUvWxYz
  credentials: service-account.json
  link_column: B
  ban_column: E

EXAMPLES:
  ban-sheet --config sheet.yaml links
  ban-sheet --config sheet.yaml update --records players.yaml --dry-run
  ban-sheet --sheet-key 1AbC --credentials key.json --link-col B --ban-col E ids")]
#[command(version)]
struct Cli {
    /// YAML file with sheet_key, credentials, link_column, ban_column
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Spreadsheet key from the sheet URL (overrides config)
    #[arg(long, global = true)]
    sheet_key: Option<String>,

    /// Service-account JSON key (overrides config)
    #[arg(long, global = true)]
    credentials: Option<PathBuf>,

    /// Column holding profile links, e.g. B (overrides config)
    #[arg(long = "link-col", global = true)]
    link_column: Option<ColumnLetter>,

    /// Column receiving game-ban counts, e.g. E (overrides config)
    #[arg(long = "ban-col", global = true)]
    ban_column: Option<ColumnLetter>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the profile links below the header rows
    Links,

    /// Print the Steam id extracted from each profile link
    Ids,

    #[command(long_about = "Write game-ban counts from a records file.

The records file is a YAML or JSON list:

  - steam_id: 76561198000000001
    game_bans: 0
  - steam_id: 76561198000000002
    game_bans: 3

Each record lands on the row whose profile link carries its Steam id,
whatever order the file lists them in. A record with no matching link
aborts the update before anything is written.

Use --dry-run to preview the cell writes without modifying the sheet.")]
    /// Write game-ban counts from a records file
    Update {
        /// YAML/JSON list of {steam_id, game_bans}
        #[arg(short, long)]
        records: PathBuf,

        /// Preview cell writes without modifying the sheet
        #[arg(short = 'n', long)]
        dry_run: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "steam_ban_sheet=debug"
    } else {
        "steam_ban_sheet=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let from_file = match &cli.config {
        Some(path) => PartialSheetConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => PartialSheetConfig::default(),
    };
    let config = from_file
        .merge(PartialSheetConfig {
            sheet_key: cli.sheet_key,
            credentials: cli.credentials,
            link_column: cli.link_column,
            ban_column: cli.ban_column,
        })
        .build()?;

    // Records are validated before any network traffic
    let records = match &cli.command {
        Commands::Update { records, .. } => Some(
            load_records(records)
                .with_context(|| format!("Failed to load records {}", records.display()))?,
        ),
        _ => None,
    };

    let sheet = ProfileSheet::open(&config)
        .with_context(|| format!("Failed to open spreadsheet {}", config.sheet_key))?;

    match cli.command {
        Commands::Links => cli::links(&sheet)?,
        Commands::Ids => cli::ids(&sheet)?,
        Commands::Update { dry_run, .. } => {
            cli::update(&sheet, records.as_deref().unwrap_or_default(), dry_run)?
        }
    }

    Ok(())
}
