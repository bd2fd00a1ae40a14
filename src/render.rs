use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::clients::entities::Track;

/// Shown in place of the list when the backend returned no tracks
pub const EMPTY_MESSAGE: &str = "No unavailable tracks found.";

/// Text of one rendered track
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackBlock {
    /// Track name
    pub title: String,
    /// Artist names joined by `", "`
    pub artists: String,
    /// Album name
    pub album: String,
}

impl From<&Track> for TrackBlock {
    fn from(t: &Track) -> TrackBlock {
        TrackBlock {
            title: t.name.clone(),
            artists: t.artist_names(),
            album: t.album.name.clone(),
        }
    }
}

/// What the track list should look like, independent of where it is drawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// No tracks, shows [`EMPTY_MESSAGE`]
    Empty,
    /// One block per track, in backend order
    Tracks(Vec<TrackBlock>),
}

impl View {
    /// Rendered blocks, empty for [`View::Empty`]
    pub fn blocks(&self) -> &[TrackBlock] {
        match self {
            View::Empty => &[],
            View::Tracks(blocks) => blocks,
        }
    }

    /// Prints `Track:`, `Artist:` and `Album:` lines, a blank line between blocks
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match self {
            View::Empty => writeln!(out, "{EMPTY_MESSAGE}"),
            View::Tracks(blocks) => {
                for (i, block) in blocks.iter().enumerate() {
                    if i > 0 {
                        writeln!(out)?;
                    }
                    writeln!(out, "Track: {}", block.title)?;
                    writeln!(out, "Artist: {}", block.artists)?;
                    writeln!(out, "Album: {}", block.album)?;
                }
                Ok(())
            }
        }
    }

    /// [`View::write_to`] into a string
    pub fn to_text(&self) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec can't fail
        let _ = self.write_to(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

/// Describe how `tracks` should be shown. No I/O, no shared state.
pub fn render(tracks: &[Track]) -> View {
    if tracks.is_empty() {
        return View::Empty;
    }
    View::Tracks(tracks.iter().map(TrackBlock::from).collect())
}

/// The container the track list is drawn into. Every `show` replaces the
/// previous view as a whole, so the last writer wins.
#[derive(Debug, Default)]
pub struct TrackListPane {
    view: Mutex<Option<View>>,
}

impl TrackListPane {
    /// An empty pane, nothing rendered yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever is shown with `view`
    pub fn show(&self, view: View) {
        *self.lock() = Some(view);
    }

    /// Snapshot of what is currently displayed, `None` before the first render
    pub fn current(&self) -> Option<View> {
        self.lock().clone()
    }

    /// Print the current view, nothing before the first render
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match self.current() {
            Some(view) => view.write_to(out),
            None => Ok(()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<View>> {
        // A panic mid-assignment can't leave a half-written view behind
        self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
