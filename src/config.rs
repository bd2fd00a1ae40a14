use std::path::PathBuf;

use log::debug;
use url::Url;

use crate::clients::{
    BackendClient,
    errors::{Error, Result},
};
use crate::export::default_export_dir;

/// Backend base URL
pub const BACKEND_URL_VAR: &str = "TRACKS_BACKEND_URL";
/// Page to return to after logging in
pub const PAGE_URL_VAR: &str = "TRACKS_PAGE_URL";
/// Raw `Cookie` header value carrying the session
pub const SESSION_COOKIE_VAR: &str = "TRACKS_SESSION_COOKIE";
/// Directory exports are saved to
pub const EXPORT_DIR_VAR: &str = "TRACKS_EXPORT_DIR";

const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000/";

/// Everything a `TrackFetcher` needs to run
pub struct Config {
    /// Client for the tracks endpoint, session cookie included
    pub backend: BackendClient,
    /// Where the user should land again after logging in
    pub page_url: Url,
    /// Where "Download Data" saves files
    pub export_dir: PathBuf,
}

/// Builds a [`Config`]; anything not set explicitly is read from the
/// environment (a `.env` file is honoured by the binary).
#[derive(Default)]
pub struct ConfigBuilder {
    backend_url: Option<String>,
    page_url: Option<String>,
    session_cookie: Option<String>,
    export_dir: Option<PathBuf>,
}

impl ConfigBuilder {
    /// Builder with nothing set; unset values come from the environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides `TRACKS_BACKEND_URL`
    #[must_use]
    pub fn backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend_url = Some(url.into());
        self
    }

    /// Overrides `TRACKS_PAGE_URL`
    #[must_use]
    pub fn page_url(mut self, url: impl Into<String>) -> Self {
        self.page_url = Some(url.into());
        self
    }

    /// Overrides `TRACKS_SESSION_COOKIE`
    #[must_use]
    pub fn session_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.session_cookie = Some(cookie.into());
        self
    }

    /// Overrides `TRACKS_EXPORT_DIR`
    #[must_use]
    pub fn export_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_dir = Some(dir.into());
        self
    }

    /// Resolve every setting and create the backend client
    pub fn build(self) -> Result<Config> {
        let backend_url = self
            .backend_url
            .or_else(|| env_var(BACKEND_URL_VAR))
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        let backend_url = parse_url(BACKEND_URL_VAR, &backend_url)?;

        // Without a page of our own, send the user back to the backend origin
        let page_url = match self.page_url.or_else(|| env_var(PAGE_URL_VAR)) {
            Some(raw) => parse_url(PAGE_URL_VAR, &raw)?,
            None => backend_url.clone(),
        };

        let session_cookie = self.session_cookie.or_else(|| env_var(SESSION_COOKIE_VAR));
        if session_cookie.is_none() {
            debug!("No session cookie configured, requests go out unauthenticated");
        }

        let export_dir = self
            .export_dir
            .or_else(|| env_var(EXPORT_DIR_VAR).map(PathBuf::from))
            .unwrap_or_else(default_export_dir);

        let backend = BackendClient::new(backend_url, session_cookie.as_deref())?;
        debug!("Using backend at {}", backend.base());

        Ok(Config {
            backend,
            page_url,
            export_dir,
        })
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_url(name: &str, raw: &str) -> Result<Url> {
    Url::parse(raw.trim())
        .map_err(|e| Error::ConfigurationError(format!("{name} is not a valid URL ({raw}): {e}")))
}
