use log::debug;
use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use reqwest::StatusCode;
use url::Url;

use crate::clients::{
    entities::{Filters, RedirectBody, TrackList},
    errors::{Error, Result},
};

const TRACKS_PATH: &str = "unavailable_tracks";

/// What one GET against the backend turned into
#[derive(Debug, PartialEq)]
pub enum BackendResponse {
    /// 2xx with a track array body
    Tracks(TrackList),
    /// 401 whose body names a login location
    AuthRedirect(String),
    /// Anything else that isn't 2xx. `redirect` is kept for logging only.
    Failure {
        /// Status the backend answered with
        status: StatusCode,
        /// Redirect named in the body, if any
        redirect: Option<String>,
    },
}

/// HTTP client bound to one backend base URL and session
pub struct BackendClient {
    http: reqwest::Client,
    base: Url,
}

impl BackendClient {
    /// Client for `base`, sending `session_cookie` (raw `name=value` pairs) with every request
    pub fn new(base: Url, session_cookie: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        // The browser would send the session cookie with every request; do the same
        if let Some(cookie) = session_cookie.filter(|c| !c.trim().is_empty()) {
            headers.insert(
                COOKIE,
                HeaderValue::from_str(cookie.trim())
                    .map_err(|e| Error::BadHeader(format!("Cookie: {e}")))?,
            );
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("unavailable-tracks/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(BackendClient {
            http,
            base: with_trailing_slash(base),
        })
    }

    /// Backend base URL, always ending in `/`
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// See [`tracks_url`]
    pub fn tracks_url(&self, filters: &Filters) -> Result<Url> {
        tracks_url(&self.base, filters)
    }

    /// Single attempt, no timeout and no retry. The caller decides what a failure means.
    pub async fn fetch(&self, filters: &Filters) -> Result<BackendResponse> {
        let url = self.tracks_url(filters)?;
        debug!("GET {url}");

        let resp = self.http.get(url.clone()).send().await?;
        let status = resp.status();
        if resp.url() != &url {
            debug!("Request to {url} was redirected to {}", resp.url());
        }

        let bytes = resp.bytes().await?;
        debug!("Backend answered {status} with {} bytes", bytes.len());
        classify(status, &bytes)
    }

    /// See [`login_url`]
    pub fn login_url(&self, redirect: &str, page_url: &Url) -> Result<Url> {
        login_url(&self.base, redirect, page_url)
    }
}

fn with_trailing_slash(mut base: Url) -> Url {
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}

/// `<base>/unavailable_tracks` with the set filters as query parameters
pub fn tracks_url(base: &Url, filters: &Filters) -> Result<Url> {
    let mut url = with_trailing_slash(base.clone()).join(TRACKS_PATH)?;
    let pairs = filters.query_pairs();
    if !pairs.is_empty() {
        url.query_pairs_mut().extend_pairs(pairs);
    }
    Ok(url)
}

/// Resolve a login redirect against the backend and point its `next`
/// parameter back at `page_url`. Absolute redirects keep their own origin.
pub fn login_url(base: &Url, redirect: &str, page_url: &Url) -> Result<Url> {
    let mut url = base.join(redirect)?;
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != "next")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair("next", page_url.as_str());
    Ok(url)
}

/// Decide what a response means. Status wins over body: a 401 is only a
/// login redirect when the body names a non-empty location.
pub fn classify(status: StatusCode, body: &[u8]) -> Result<BackendResponse> {
    if !status.is_success() {
        // An empty redirect names no login page, same as a missing one
        let redirect = serde_json::from_slice::<RedirectBody>(body)
            .unwrap_or_default()
            .redirect
            .filter(|r| !r.is_empty());
        return Ok(match (status, redirect) {
            (StatusCode::UNAUTHORIZED, Some(redirect)) => BackendResponse::AuthRedirect(redirect),
            (status, redirect) => BackendResponse::Failure { status, redirect },
        });
    }

    let tracks: TrackList = serde_json::from_slice(body)?;
    Ok(BackendResponse::Tracks(tracks))
}
