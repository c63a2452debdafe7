//! Discogs HTTP client
//!
//! Handles communication with the Discogs web service.
//! See: https://www.discogs.com/developers
//!
//! IMPORTANT: Discogs requires a User-Agent header, and most endpoints need a
//! personal access token. The token travels as a `token` query parameter.

use std::str::FromStr;
use std::time::Duration;

use reqwest::Url;
use serde::de::DeserializeOwned;

use super::decode;
use super::dto::{
    Folder, FolderItem, FolderItemsResponse, FolderResponse, MasterRelease, MasterSearchResult,
    SearchResponse,
};
use super::error::DiscogsError;

/// User agent string - Discogs requires this
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Cap on how long a single request may take; surfaced as [`DiscogsError::Network`]
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client configuration
///
/// The token here is the default for every request; a call-site token
/// overrides it. There is no built-in fallback token - supply one via the
/// CLI flag, the `DISCOGS_TOKEN` environment variable, or the config file.
#[derive(Debug, Clone, Default)]
pub struct DiscogsConfig {
    /// Default access token used when a call does not supply one
    pub token: Option<String>,
}

/// Discogs API client
pub struct DiscogsClient {
    http_client: reqwest::Client,
    base_url: String,
    config: DiscogsConfig,
}

impl DiscogsClient {
    /// Create a new client
    ///
    /// The client is configured to:
    /// - Accept gzip-compressed responses (reduces bandwidth)
    /// - Send a User-Agent header identifying the application
    /// - Time out requests after 30 seconds
    pub fn new(config: DiscogsConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .gzip(true)
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http_client,
            base_url: "https://api.discogs.com".to_string(),
            config,
        }
    }

    /// Create a client for testing with custom base URL
    #[cfg(test)]
    pub fn with_base_url(config: DiscogsConfig, base_url: impl Into<String>) -> Self {
        let mut client = Self::new(config);
        client.base_url = base_url.into();
        client
    }

    /// Search for a master release matching the query.
    ///
    /// Returns the first hit field-for-field, or `None` when the result list
    /// is empty. Only the first page is requested.
    pub async fn search(
        &self,
        query: &str,
        token: Option<&str>,
    ) -> Result<Option<MasterSearchResult>, DiscogsError> {
        let url = self.endpoint(
            "/database/search",
            &[("release_title", query), ("type", SearchType::Master.as_str())],
            token,
        )?;
        let response: SearchResponse = self.get_json(url).await?;
        Ok(response.results.into_iter().next())
    }

    /// Fetch the full master release record by id.
    pub async fn fetch_master(
        &self,
        master_id: i64,
        token: Option<&str>,
    ) -> Result<MasterRelease, DiscogsError> {
        let url = self.endpoint(&format!("/masters/{master_id}"), &[], token)?;
        self.get_json(url).await
    }

    /// List a user's collection folders.
    ///
    /// A user with no folders yields `None`, never an empty list.
    pub async fn list_collection_folders(
        &self,
        username: &str,
        token: Option<&str>,
    ) -> Result<Option<Vec<Folder>>, DiscogsError> {
        let url = self.endpoint(&format!("/users/{username}/collection/folders"), &[], token)?;
        let response: FolderResponse = self.get_json(url).await?;
        Ok((!response.folders.is_empty()).then_some(response.folders))
    }

    /// List the items in one collection folder, first page only.
    pub async fn list_folder_items(
        &self,
        username: &str,
        folder_id: i64,
        sort: SortKey,
        token: Option<&str>,
    ) -> Result<Option<Vec<FolderItem>>, DiscogsError> {
        let url = self.endpoint(
            &format!("/users/{username}/collection/folders/{folder_id}/releases"),
            &[("sort", sort.as_str())],
            token,
        )?;
        let response: FolderItemsResponse = self.get_json(url).await?;
        Ok((!response.releases.is_empty()).then_some(response.releases))
    }

    /// Download one image, appending the access token to its absolute URL.
    ///
    /// Returns the raw bytes only on a success status; image files are never
    /// assembled from partial responses.
    pub async fn download_image(
        &self,
        image_url: &str,
        token: Option<&str>,
    ) -> Result<Vec<u8>, DiscogsError> {
        let token = self.resolve_token(token)?;
        let mut url =
            Url::parse(image_url).map_err(|e| DiscogsError::InvalidUrl(e.to_string()))?;
        url.query_pairs_mut().append_pair("token", token);

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| DiscogsError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DiscogsError::Network(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| DiscogsError::Network(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    /// Resolve the token for one request: call argument first, then the
    /// configured default, otherwise fail.
    fn resolve_token<'a>(&'a self, token: Option<&'a str>) -> Result<&'a str, DiscogsError> {
        token
            .or(self.config.token.as_deref())
            .ok_or(DiscogsError::MissingToken)
    }

    /// Build an API URL from a path, query parameters, and the access token.
    fn endpoint(
        &self,
        path: &str,
        params: &[(&str, &str)],
        token: Option<&str>,
    ) -> Result<Url, DiscogsError> {
        let token = self.resolve_token(token)?;
        let mut url = Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| DiscogsError::InvalidUrl(e.to_string()))?;
        {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in params {
                pairs.append_pair(name, value);
            }
            pairs.append_pair("token", token);
        }
        Ok(url)
    }

    /// Send the GET request and decode the response body
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, DiscogsError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| DiscogsError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DiscogsError::Network(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| DiscogsError::Network(e.to_string()))?;
        decode::from_slice(&bytes)
    }
}

/// Record types accepted by `/database/search`
///
/// Only master search is implemented end to end; the others exist so the CLI
/// can name what it refuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchType {
    Release,
    #[default]
    Master,
    Artist,
    Label,
}

impl SearchType {
    pub fn as_str(self) -> &'static str {
        match self {
            SearchType::Release => "release",
            SearchType::Master => "master",
            SearchType::Artist => "artist",
            SearchType::Label => "label",
        }
    }
}

impl FromStr for SearchType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "release" => Ok(SearchType::Release),
            "master" => Ok(SearchType::Master),
            "artist" => Ok(SearchType::Artist),
            "label" => Ok(SearchType::Label),
            other => Err(format!(
                "unknown search type '{other}' (expected release, master, artist, or label)"
            )),
        }
    }
}

/// Sort fields accepted by the collection folder listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Artist,
    Title,
    Year,
    Added,
    Rating,
    Label,
    Catno,
    Format,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Artist => "artist",
            SortKey::Title => "title",
            SortKey::Year => "year",
            SortKey::Added => "added",
            SortKey::Rating => "rating",
            SortKey::Label => "label",
            SortKey::Catno => "catno",
            SortKey::Format => "format",
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "artist" => Ok(SortKey::Artist),
            "title" => Ok(SortKey::Title),
            "year" => Ok(SortKey::Year),
            "added" => Ok(SortKey::Added),
            "rating" => Ok(SortKey::Rating),
            "label" => Ok(SortKey::Label),
            "catno" => Ok(SortKey::Catno),
            "format" => Ok(SortKey::Format),
            other => Err(format!("unknown sort key '{other}'")),
        }
    }
}
