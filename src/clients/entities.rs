use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fields the backend sent that aren't modelled, kept so exports stay verbatim
pub type ExtraFields = Map<String, Value>;

/// One performer of a track
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Artist {
    /// Display name
    pub name: String,
    /// Unmodelled fields, e.g. `id`
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Artist {
    /// Artist with only a name
    pub fn new(name: impl Into<String>) -> Self {
        Artist {
            name: name.into(),
            extra: ExtraFields::new(),
        }
    }
}

/// Album a track belongs to
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Album {
    /// Display name
    pub name: String,
    /// Unmodelled fields, e.g. `release_date`
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Album {
    /// Album with only a name
    pub fn new(name: impl Into<String>) -> Self {
        Album {
            name: name.into(),
            extra: ExtraFields::new(),
        }
    }
}

/// A track as reported by the backend. Anything besides name, artists,
/// album and duration lands in `extra` and is written back out unchanged.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Track {
    /// Track title
    pub name: String,
    /// Performers, in credit order
    pub artists: Vec<Artist>,
    /// Album the track appears on
    pub album: Album,
    /// Length in milliseconds, not every backend sends it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    /// Unmodelled fields, e.g. `id`, `uri`, `is_playable`
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Track {
    /// Artist names joined by `", "`, in the order the backend sent them
    pub fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Track length in seconds, `duration_ms / 1000` without truncation
    #[allow(clippy::cast_precision_loss)]
    pub fn length_secs(&self) -> Option<f64> {
        self.duration_ms.map(|ms| ms as f64 / 1000.0)
    }
}

/// Ordered tracks of one fetch. Replaced wholesale, never merged.
pub type TrackList = Vec<Track>;

/// Body of a 401 response asking the client to log in first
#[derive(Deserialize, Debug, Default)]
pub struct RedirectBody {
    /// Login location, absolute or origin-relative
    pub redirect: Option<String>,
}

/// Which part of the library the backend should scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Source {
    /// Saved ("liked") tracks only
    Liked,
    /// Tracks of the user's playlists
    Playlist,
    /// Liked tracks and playlists
    Both,
}

impl Source {
    /// Query value understood by the backend
    pub fn as_str(self) -> &'static str {
        match self {
            Source::Liked => "liked",
            Source::Playlist => "playlist",
            Source::Both => "both",
        }
    }
}

/// Whether the backend returns every track or only the unplayable ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Availability {
    /// Every track, playable or not
    All,
    /// Only tracks that can't be played
    Unavailable,
}

impl Availability {
    /// Query value understood by the backend
    pub fn as_str(self) -> &'static str {
        match self {
            Availability::All => "all",
            Availability::Unavailable => "unavailable",
        }
    }
}

/// Optional query filters. Unset filters are left out of the URL so the
/// backend applies its own defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    /// `source` query parameter
    pub source: Option<Source>,
    /// `availability` query parameter
    pub availability: Option<Availability>,
    /// Country code to check playability in
    pub market: Option<String>,
}

impl Filters {
    /// Set filters as `(name, value)` pairs, in `source`, `availability`, `market` order
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::with_capacity(3);
        if let Some(source) = self.source {
            pairs.push(("source", source.as_str()));
        }
        if let Some(availability) = self.availability {
            pairs.push(("availability", availability.as_str()));
        }
        if let Some(market) = self.market.as_deref().filter(|m| !m.is_empty()) {
            pairs.push(("market", market));
        }
        pairs
    }
}
