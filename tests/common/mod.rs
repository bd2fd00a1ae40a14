//! In-process stand-in for the tracks backend.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use log::{Level, LevelFilter, Log, Metadata, Record};
use unavailable_tracks::config::ConfigBuilder;
use unavailable_tracks::fetcher::{Navigator, TrackFetcher};
use unavailable_tracks::render::TrackListPane;
use url::Url;

pub const PAGE_URL: &str = "https://example.com/app";
pub const SESSION_COOKIE: &str = "session=abc123";

/// Serve `router` on an ephemeral port and return its base URL
pub async fn serve(router: Router) -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    Url::parse(&format!("http://{addr}/")).unwrap()
}

/// A base URL nothing listens on
pub async fn dead_backend() -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{addr}/")).unwrap()
}

#[derive(Clone, Default)]
pub struct RecordingNavigator {
    pub visited: Arc<Mutex<Vec<Url>>>,
}

impl RecordingNavigator {
    pub fn visited(&self) -> Vec<Url> {
        self.visited.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, url: &Url) {
        self.visited.lock().unwrap().push(url.clone());
    }
}

pub fn fetcher(base: &Url, pane: Arc<TrackListPane>, navigator: RecordingNavigator) -> TrackFetcher {
    let config = ConfigBuilder::new()
        .backend_url(base.as_str())
        .page_url(PAGE_URL)
        .session_cookie(SESSION_COOKIE)
        .export_dir(std::env::temp_dir())
        .build()
        .unwrap();
    TrackFetcher::new(config, pane, Box::new(navigator))
}

static RECORDS: Mutex<Vec<(Level, String)>> = Mutex::new(Vec::new());

struct CapturingLogger;

impl Log for CapturingLogger {
    fn enabled(&self, _: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        RECORDS
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

static LOGGER: CapturingLogger = CapturingLogger;

/// Route `log` output of this test binary into memory. Safe to call from every test.
pub fn capture_logs() {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(LevelFilter::Debug);
}

/// Error-level messages logged so far, by any test in this binary
pub fn logged_errors() -> Vec<String> {
    RECORDS
        .lock()
        .unwrap()
        .iter()
        .filter(|(level, _)| *level == Level::Error)
        .map(|(_, msg)| msg.clone())
        .collect()
}
