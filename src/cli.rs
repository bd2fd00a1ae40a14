use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use log::info;
use unavailable_tracks::clients::entities::{Availability, Filters, Source};
use unavailable_tracks::clients::errors::Result;
use unavailable_tracks::config::ConfigBuilder;
use unavailable_tracks::export::{CsvQuoting, DownloadControl, ExportFormat};
use unavailable_tracks::fetcher::{FetchState, Navigator, TrackFetcher};
use unavailable_tracks::render::TrackListPane;
use url::Url;

#[derive(Parser)]
#[command(name = "unavailable-tracks")]
#[command(version, about = "List and export tracks that are no longer playable", long_about = None)]
struct Cli {
    /// Backend base URL (default http://127.0.0.1:5000/)
    #[arg(long, global = true)]
    backend_url: Option<String>,

    /// Page to come back to after logging in
    #[arg(long, global = true)]
    page_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the track list once and print it
    Fetch {
        #[arg(long, value_enum)]
        source: Option<Source>,

        #[arg(long, value_enum)]
        availability: Option<Availability>,

        /// Market (country code) to check playability in
        #[arg(long)]
        market: Option<String>,

        /// Also save the result, like pressing "Download Data"
        #[arg(long, value_enum)]
        export: Option<ExportFormat>,

        /// Quote CSV fields that contain commas or quotes
        #[arg(long)]
        quote: bool,

        /// Directory for the exported file (default: downloads directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

// Can't drive a browser from here, so hand the login URL to the user
struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&self, url: &Url) {
        println!("Log in at {url} and run the command again.");
    }
}

struct ExportRequest {
    format: ExportFormat,
    quoting: CsvQuoting,
    dir: Option<PathBuf>,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut builder = ConfigBuilder::new();
    if let Some(url) = cli.backend_url {
        builder = builder.backend_url(url);
    }
    if let Some(url) = cli.page_url {
        builder = builder.page_url(url);
    }

    match cli.command {
        Commands::Fetch {
            source,
            availability,
            market,
            export,
            quote,
            out,
        } => {
            let filters = Filters {
                source,
                availability,
                market,
            };
            let export = export.map(|format| ExportRequest {
                format,
                quoting: if quote {
                    CsvQuoting::Rfc4180
                } else {
                    CsvQuoting::Legacy
                },
                dir: out,
            });
            fetch_tracks(builder, &filters, export).await?;
        }
    }
    Ok(())
}

async fn fetch_tracks(
    builder: ConfigBuilder,
    filters: &Filters,
    export: Option<ExportRequest>,
) -> Result<()> {
    info!("Building config ...");
    let config = builder.build()?;
    let export_dir = config.export_dir.clone();

    let pane = Arc::new(TrackListPane::new());
    let fetcher = TrackFetcher::new(config, pane.clone(), Box::new(TerminalNavigator));

    let interaction = fetcher.fetch(filters).await;
    if let FetchState::Rendered { .. } = interaction.state {
        let mut stdout = io::stdout().lock();
        pane.write_to(&mut stdout)?;
        stdout.flush()?;
    }

    if let (Some(download), Some(export)) = (interaction.download, export) {
        save(&download, export, export_dir).await?;
    }
    Ok(())
}

async fn save(download: &DownloadControl, export: ExportRequest, default_dir: PathBuf) -> Result<()> {
    let dir = export.dir.unwrap_or(default_dir);
    info!("{} -> {:?}", DownloadControl::LABEL, export.format);
    let path = download.activate(export.format, export.quoting, &dir).await?;
    println!("Saved {}", path.display());
    Ok(())
}
