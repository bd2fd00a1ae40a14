use std::sync::Arc;

use log::{debug, error, info, warn};
use url::Url;

use crate::clients::{
    BackendClient,
    backend::BackendResponse,
    entities::{Filters, TrackList},
};
use crate::config::Config;
use crate::export::DownloadControl;
use crate::render::{TrackListPane, render};

/// Sends the user somewhere else, e.g. to a login page
pub trait Navigator: Send + Sync {
    /// Go to `url`; the interaction ends right after
    fn navigate(&self, url: &Url);
}

/// Where one interaction is. `Idle` and `Fetching` are passed through on
/// every call; the other three are terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState {
    /// Nothing started yet
    Idle,
    /// Request in flight
    Fetching,
    /// Sent to the login URL, nothing rendered
    Redirecting(Url),
    /// `count` tracks are now shown in the pane
    Rendered {
        /// Number of tracks rendered
        count: usize,
    },
    /// Logged and dropped, the pane keeps what it had
    Failed(String),
}

impl FetchState {
    /// `true` once the interaction is over
    pub fn is_terminal(&self) -> bool {
        !matches!(self, FetchState::Idle | FetchState::Fetching)
    }
}

/// Result of one fetch. `download` is only offered after a render.
#[derive(Debug)]
pub struct Interaction {
    /// Terminal state the interaction ended in
    pub state: FetchState,
    /// "Download Data" for the rendered tracks
    pub download: Option<DownloadControl>,
}

impl Interaction {
    fn finished(state: FetchState) -> Self {
        Interaction {
            state,
            download: None,
        }
    }
}

/// Runs fetch interactions against one backend, drawing into a shared pane
pub struct TrackFetcher {
    backend: BackendClient,
    page_url: Url,
    pane: Arc<TrackListPane>,
    navigator: Box<dyn Navigator>,
}

impl TrackFetcher {
    /// Fetcher drawing into `pane` and sending logins to `navigator`
    pub fn new(config: Config, pane: Arc<TrackListPane>, navigator: Box<dyn Navigator>) -> Self {
        TrackFetcher {
            backend: config.backend,
            page_url: config.page_url,
            pane,
            navigator,
        }
    }

    /// Run one interaction: a single request, then render, redirect or give up.
    ///
    /// Calls may overlap. Nothing is cancelled, and whichever successful
    /// response arrives last is what the pane ends up showing. Failures
    /// never touch the pane.
    pub async fn fetch(&self, filters: &Filters) -> Interaction {
        let mut state = FetchState::Idle;
        advance(&mut state, FetchState::Fetching);

        let response = match self.backend.fetch(filters).await {
            Ok(r) => r,
            Err(e) => {
                error!("There was a problem with the fetch operation: {e}");
                advance(&mut state, FetchState::Failed(e.to_string()));
                return Interaction::finished(state);
            }
        };

        match response {
            BackendResponse::Tracks(tracks) => {
                let download = self.show(tracks);
                let count = download.tracks().len();
                advance(&mut state, FetchState::Rendered { count });
                Interaction {
                    state,
                    download: Some(download),
                }
            }
            BackendResponse::AuthRedirect(redirect) => {
                match self.backend.login_url(&redirect, &self.page_url) {
                    Ok(url) => {
                        info!("Not logged in, redirecting to {url}");
                        self.navigator.navigate(&url);
                        advance(&mut state, FetchState::Redirecting(url));
                    }
                    Err(e) => {
                        error!("Backend asked for login at {redirect:?} but it is not a usable URL: {e}");
                        advance(&mut state, FetchState::Failed(e.to_string()));
                    }
                }
                Interaction::finished(state)
            }
            BackendResponse::Failure { status, redirect } => {
                // Only a 401 may move the user elsewhere
                if let Some(redirect) = redirect {
                    warn!("Ignoring redirect to {redirect:?} on a {status} response");
                }
                error!("There was a problem with the fetch operation: backend answered {status}");
                advance(
                    &mut state,
                    FetchState::Failed(format!("backend answered {status}")),
                );
                Interaction::finished(state)
            }
        }
    }

    fn show(&self, tracks: TrackList) -> DownloadControl {
        self.pane.show(render(&tracks));
        info!("Rendered {} tracks", tracks.len());
        DownloadControl::new(tracks)
    }
}

fn advance(state: &mut FetchState, next: FetchState) {
    debug!("{state:?} -> {next:?}");
    *state = next;
}
