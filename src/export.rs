use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::clients::{
    entities::{Track, TrackList},
    errors::{Error, Result},
};

const CSV_HEADER: [&str; 4] = ["Artist", "Title", "Album", "Length"];

/// File type of a saved export
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    /// `unavailable_tracks.json`
    Json,
    /// `unavailable_tracks.csv`
    Csv,
}

impl ExportFormat {
    /// Name the export is saved under
    pub fn file_name(self) -> &'static str {
        match self {
            ExportFormat::Json => "unavailable_tracks.json",
            ExportFormat::Csv => "unavailable_tracks.csv",
        }
    }
}

/// How CSV fields are quoted.
///
/// `Legacy` never quotes, so a field with a comma in it (e.g. joined
/// artists) spills into extra columns. This is the layout the download has
/// always had. `Rfc4180` quotes fields that contain delimiters, quotes or
/// newlines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CsvQuoting {
    /// Never quote
    #[default]
    Legacy,
    /// Quote where needed
    Rfc4180,
}

impl From<CsvQuoting> for csv::QuoteStyle {
    fn from(q: CsvQuoting) -> Self {
        match q {
            CsvQuoting::Legacy => csv::QuoteStyle::Never,
            CsvQuoting::Rfc4180 => csv::QuoteStyle::Necessary,
        }
    }
}

/// The track array as received, including fields that aren't modelled
pub fn to_json(tracks: &[Track]) -> Result<String> {
    Ok(serde_json::to_string(tracks)?)
}

/// Header `Artist,Title,Album,Length` then one row per track, rows joined
/// by `\n` with no trailing newline. Length is left empty when unknown.
pub fn to_csv(tracks: &[Track], quoting: CsvQuoting) -> Result<String> {
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(quoting.into())
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    wtr.write_record(CSV_HEADER)?;
    for t in tracks {
        let length = t.length_secs().map(|s| s.to_string()).unwrap_or_default();
        wtr.write_record([
            t.artist_names().as_str(),
            t.name.as_str(),
            t.album.name.as_str(),
            length.as_str(),
        ])?;
    }

    let bytes = wtr.into_inner().map_err(|e| Error::IoError(e.into_error()))?;
    let mut out = String::from_utf8_lossy(&bytes).into_owned();
    if out.ends_with('\n') {
        out.pop();
    }
    Ok(out)
}

/// Default place for saved exports: the user's download directory
pub fn default_export_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from(".")) // Fallback to cwd if there is no download dir
}

/// The "Download Data" control offered after a successful render. It owns
/// the tracks of that render, so later fetches don't change what it saves.
#[derive(Debug, Clone)]
pub struct DownloadControl {
    tracks: TrackList,
}

impl DownloadControl {
    /// Caption of the control
    pub const LABEL: &'static str = "Download Data";

    /// Control for the tracks of one successful render
    pub fn new(tracks: TrackList) -> Self {
        DownloadControl { tracks }
    }

    /// Tracks this control will save
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// File contents for `format`, without touching the disk
    pub fn encode(&self, format: ExportFormat, quoting: CsvQuoting) -> Result<String> {
        match format {
            ExportFormat::Json => to_json(&self.tracks),
            ExportFormat::Csv => to_csv(&self.tracks, quoting),
        }
    }

    /// Writes the export into `dir`, overwriting a previous export with the same name
    pub async fn activate(
        &self,
        format: ExportFormat,
        quoting: CsvQuoting,
        dir: &Path,
    ) -> Result<PathBuf> {
        let contents = self.encode(format, quoting)?;
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(format.file_name());
        let len = contents.len();
        tokio::fs::write(&path, contents).await?;
        debug!("Wrote {len} bytes of {format:?} export");
        info!("Saved {} tracks to {}", self.tracks.len(), path.display());
        Ok(path)
    }
}
