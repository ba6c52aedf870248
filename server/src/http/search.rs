use std::time::Duration;

use anyhow::Context;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::AppState;

/// How many normalized results `/search` returns at most.
const RESULT_LIMIT: usize = 5;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
pub(super) struct SearchParams {
    #[serde(default)]
    q: String,
}

/// One normalized video search result, the shape the lobby renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    /// Display length such as "12:34", absent for live streams
    pub duration: Option<String>,
    pub thumbnail: String,
    pub url: String,
    pub channel: String,
}

/// A single hit as the Invidious-compatible upstream reports it. Fields we do
/// not render are left out and dropped on the floor by serde.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpstreamHit {
    #[serde(default)]
    title: String,
    #[serde(default)]
    video_id: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    length_seconds: u64,
    #[serde(default)]
    video_thumbnails: Vec<UpstreamThumbnail>,
}

#[derive(Debug, Deserialize)]
struct UpstreamThumbnail {
    url: String,
}

/// [SearchClient] proxies free-text queries to a third-party video index.
///
/// The upstream is best-effort by contract: any failure (network, non-2xx,
/// unparseable body) degrades to an empty result list so the lobby keeps
/// working without search.
#[derive(Debug)]
pub struct SearchClient {
    http: reqwest::Client,
    base_url: String,
}

impl SearchClient {
    pub fn new(base_url: &str) -> Self {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build the search http client");

        SearchClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Runs a search against the upstream index, returning at most
    /// [RESULT_LIMIT] normalized results. An empty query short-circuits
    /// without contacting the upstream.
    pub async fn search(&self, query: &str) -> Vec<SearchResult> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        match self.fetch(query).await {
            Ok(results) => results,
            Err(error) => {
                warn!(%error, "video index search failed, returning no results");
                Vec::new()
            }
        }
    }

    async fn fetch(&self, query: &str) -> anyhow::Result<Vec<SearchResult>> {
        let url = format!("{}/api/v1/search", self.base_url);

        let hits: Vec<UpstreamHit> = self
            .http
            .get(url)
            .query(&[("q", query), ("type", "video")])
            .send()
            .await
            .context("search request failed")?
            .error_for_status()
            .context("search upstream returned an error status")?
            .json()
            .await
            .context("could not parse the search response")?;

        Ok(hits
            .into_iter()
            .filter(|hit| !hit.video_id.is_empty())
            .take(RESULT_LIMIT)
            .map(|hit| SearchResult {
                title: hit.title,
                duration: format_duration(hit.length_seconds),
                thumbnail: hit
                    .video_thumbnails
                    .first()
                    .map(|thumbnail| thumbnail.url.clone())
                    .unwrap_or_default(),
                url: format!("https://www.youtube.com/watch?v={}", hit.video_id),
                channel: hit.author,
            })
            .collect())
    }
}

/// Formats a length in seconds the way video indexes display it, e.g. 754
/// becomes "12:34" and 3930 becomes "1:05:30". Zero means a live stream or an
/// unknown length, with no duration to show.
fn format_duration(total_seconds: u64) -> Option<String> {
    if total_seconds == 0 {
        return None;
    }

    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        Some(format!("{}:{:02}:{:02}", hours, minutes, seconds))
    } else {
        Some(format!("{}:{:02}", minutes, seconds))
    }
}

/// `GET /search?q=...`
pub(super) async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<SearchResult>> {
    Json(state.search.search(&params.q).await)
}
