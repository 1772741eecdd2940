//! Core HTTP client for the AudioSalad client API

use chrono::{DateTime, Local, NaiveDate, Utc};
use compact_str::CompactString;
use reqwest::{Client, Method, Response};
use serde::{
    Deserialize,
    de::{DeserializeOwned, Error as _},
};
use tracing::{debug, info, instrument, warn};

use super::{
    config::ClientConfig,
    endpoint::{Endpoint, MODIFIED_DATE_FORMAT, SALES_DATE_FORMAT},
    error::{ClientError, Result},
    token::{RefreshRequest, RefreshResponse, TokenState},
};
use crate::{
    domain::{Artist, DeliveryTarget, Label, Release, Report, Track, Wrapped},
    id::{ArtistId, LabelId, ReleaseId, TrackId},
};

/// Low-level client: owns the credentials and issues one request per call
///
/// Calls that may refresh the token take `&mut self`. Sharing one instance
/// across tasks means wrapping it in a lock of the caller's choosing; the
/// client does not serialise refreshes itself.
#[derive(Debug)]
pub struct AudioSaladApi {
    client: Client,
    config: ClientConfig,
    tokens: TokenState,
}

type Query<'a> = [(&'a str, String)];

/// By-id bodies come back either as the record or as a list holding it
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrList<T> {
    List(Vec<T>),
    One(T),
}

impl AudioSaladApi {
    /// Create a client that exchanges the configured refresh token on first use
    pub fn new(config: ClientConfig) -> Result<Self> {
        let tokens = TokenState::new(config.refresh_token.clone());
        Self::with_token_state(config, tokens)
    }

    /// Create a client around an already issued token pair
    pub fn with_token_state(config: ClientConfig, tokens: TokenState) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder().user_agent(config.request.user_agent.as_str());
        if let Some(timeout) = config.request.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ClientError::Http)?;

        Ok(Self {
            client,
            config,
            tokens,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn access_id(&self) -> &str {
        &self.config.access_id
    }

    pub fn token_state(&self) -> &TokenState {
        &self.tokens
    }

    /// Current access token, expired or not
    pub fn access_token(&self) -> Option<&str> {
        self.tokens.access_token.as_deref()
    }

    /// Get all releases
    #[instrument(skip(self))]
    pub async fn get_releases(&mut self) -> Result<Vec<Release>> {
        let releases: Vec<Release> = self.request_json(Endpoint::Releases, &[]).await?;
        debug!(release_count = releases.len(), "Successfully fetched releases");
        Ok(releases)
    }

    /// Get a release; the server answers with a list
    #[instrument(skip(self), fields(release_id = %id))]
    pub async fn get_release(&mut self, id: &ReleaseId) -> Result<Vec<Release>> {
        self.request_json(Endpoint::Release(id), &[]).await
    }

    #[instrument(skip(self))]
    pub async fn get_tracks(&mut self) -> Result<Wrapped<Vec<Track>>> {
        let tracks: Vec<Track> = self.request_json(Endpoint::Tracks, &[]).await?;
        debug!(track_count = tracks.len(), "Successfully fetched tracks");
        Ok(Wrapped::success(tracks))
    }

    #[instrument(skip(self), fields(track_id = %id))]
    pub async fn get_track_by_id(&mut self, id: &TrackId) -> Result<Wrapped<Track>> {
        let track = self.request_one(Endpoint::Track(id)).await?;
        Ok(Wrapped::success(track))
    }

    #[instrument(skip(self))]
    pub async fn get_all_artists(&mut self) -> Result<Wrapped<Vec<Artist>>> {
        let artists: Vec<Artist> = self.request_json(Endpoint::Artists, &[]).await?;
        debug!(artist_count = artists.len(), "Successfully fetched artists");
        Ok(Wrapped::success(artists))
    }

    #[instrument(skip(self), fields(artist_id = %id))]
    pub async fn get_artist_by_id(&mut self, id: &ArtistId) -> Result<Wrapped<Artist>> {
        let artist = self.request_one(Endpoint::Artist(id)).await?;
        Ok(Wrapped::success(artist))
    }

    #[instrument(skip(self))]
    pub async fn get_all_labels(&mut self) -> Result<Wrapped<Vec<Label>>> {
        let labels: Vec<Label> = self.request_json(Endpoint::Labels, &[]).await?;
        debug!(label_count = labels.len(), "Successfully fetched labels");
        Ok(Wrapped::success(labels))
    }

    /// Get a label; like releases, the server answers with a list
    #[instrument(skip(self), fields(label_id = %id))]
    pub async fn get_label_by_id(&mut self, id: &LabelId) -> Result<Vec<Label>> {
        self.request_json(Endpoint::Label(id), &[]).await
    }

    #[instrument(skip(self), fields(start = %start, end = %end))]
    pub async fn get_sales_report_for_period(
        &mut self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Report> {
        let body: serde_json::Value = self
            .request_json(Endpoint::SalesReport, &period_query(start, end))
            .await?;
        Ok(Report::from_body(body))
    }

    #[instrument(skip(self), fields(start = %start, end = %end))]
    pub async fn get_earnings_report_for_period(
        &mut self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Report> {
        let body: serde_json::Value = self
            .request_json(Endpoint::EarningsReport, &period_query(start, end))
            .await?;
        Ok(Report::from_body(body))
    }

    /// Ids of releases modified within `[start, end]`
    #[instrument(skip(self), fields(start = %start, end = %end))]
    pub async fn get_release_ids(
        &mut self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ReleaseId>> {
        let query = [
            ("modified_start", start.format(MODIFIED_DATE_FORMAT).to_string()),
            ("modified_end", end.format(MODIFIED_DATE_FORMAT).to_string()),
        ];
        let ids: Vec<ReleaseId> = self.request_json(Endpoint::ReleaseIds, &query).await?;
        debug!(release_id_count = ids.len(), "Successfully fetched release ids");
        Ok(ids)
    }

    #[instrument(skip(self))]
    pub async fn list_delivery_targets(&mut self) -> Result<Vec<DeliveryTarget>> {
        self.request_json(Endpoint::DeliveryTargets, &[]).await
    }

    /// Exchange the refresh token for a new token pair
    ///
    /// On failure the previous state is kept.
    #[instrument(skip(self))]
    pub async fn refresh_access_token(&mut self) -> Result<()> {
        self.exchange_tokens().await.map(|_| ())
    }

    async fn exchange_tokens(&mut self) -> Result<CompactString> {
        let now = Utc::now();
        if self.tokens.refresh_expired(now) {
            warn!(
                expired_at = ?self.tokens.refresh_token_expires_at,
                "Refresh token is past its expiry, attempting exchange anyway"
            );
        }

        let endpoint = Endpoint::AccessToken;
        let path = endpoint.path();
        let body = RefreshRequest {
            access_id: &self.config.access_id,
            refresh_token: &self.tokens.refresh_token,
        };

        let response = self
            .client
            .request(endpoint.method(), endpoint.url(&self.config.base_url).as_str())
            .json(&body)
            .send()
            .await?
            .error_for_status()
            .inspect_err(|e| warn!(status = ?e.status(), "Token exchange rejected"))?;

        let body = response.text().await?;
        let refreshed: RefreshResponse = serde_json::from_str(&body)
            .map_err(|e| ClientError::json_parse(path, "unexpected token response", e))?;

        self.tokens = TokenState::from_refresh(refreshed, now);
        info!(
            access_token_expires_at = ?self.tokens.access_token_expires_at,
            refresh_token_expires_at = ?self.tokens.refresh_token_expires_at,
            "Access token refreshed"
        );

        Ok(self.tokens.access_token.clone().unwrap_or_default())
    }

    /// Access token for the next request, refreshing first if needed
    async fn bearer_token(&mut self) -> Result<CompactString> {
        if let Some(token) = self.tokens.valid_access_token(Utc::now()) {
            return Ok(token.into());
        }

        debug!("Access token missing or expired");
        self.exchange_tokens().await
    }

    /// Perform authenticated request and deserialize JSON response
    async fn request_json<T>(&mut self, endpoint: Endpoint<'_>, query: &Query<'_>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = endpoint.url(&self.config.base_url);

        let mut request = self.client.request(endpoint.method(), url.as_str());
        if endpoint.requires_auth() {
            request = request.bearer_auth(self.bearer_token().await?);
        }
        if !query.is_empty() {
            request = request.query(query);
        }

        debug!(method = %endpoint.method(), path = %endpoint.path(), "Sending request");
        let response = request.send().await?;
        self.handle_response(&endpoint, response).await
    }

    /// Fetch a single record, taking the first entry of a list body
    async fn request_one<T>(&mut self, endpoint: Endpoint<'_>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let body: OneOrList<T> = self.request_json(endpoint, &[]).await?;
        match body {
            OneOrList::One(record) => Ok(record),
            OneOrList::List(records) => records.into_iter().next().ok_or_else(|| {
                ClientError::json_parse(
                    endpoint.path(),
                    "expected a record",
                    serde_json::Error::custom("response is an empty list"),
                )
            }),
        }
    }

    /// Handle HTTP response and deserialize JSON
    async fn handle_response<T>(&self, endpoint: &Endpoint<'_>, response: Response) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let path = endpoint.path();
        let path = path.as_str();
        let response = response
            .error_for_status()
            .inspect_err(|e| warn!(path, status = ?e.status(), "Request failed"))?;
        let body = response.text().await?;

        if self.config.debug.log_responses {
            self.log_response_to_file(&endpoint.method(), path, &body);
        }

        serde_json::from_str(&body).map_err(|e| {
            debug!(path, error = %e, body_length = body.len(), "JSON parse error");
            ClientError::json_parse(path, "unexpected body", e)
        })
    }

    /// Dump a response body as `<timestamp>_<METHOD><path>.json`
    fn log_response_to_file(&self, method: &Method, path: &str, body: &str) {
        let Some(log_dir) = &self.config.debug.log_directory else {
            return;
        };

        if !log_dir.exists()
            && let Err(e) = std::fs::create_dir_all(log_dir)
        {
            warn!(path = %log_dir.display(), error = %e, "Failed to create log directory");
            return;
        }

        let filename = format!(
            "{}_{}{}.json",
            Local::now().format("%Y-%m-%d_%H-%M-%S%.3f"),
            method,
            path.replace('/', "_")
        );
        let log_path = log_dir.join(filename);

        match std::fs::write(&log_path, body) {
            Ok(()) => debug!(path = %log_path.display(), bytes = body.len(), "Response dumped"),
            Err(e) => warn!(path = %log_path.display(), error = %e, "Failed to dump response"),
        }
    }
}

fn period_query(start: NaiveDate, end: NaiveDate) -> [(&'static str, String); 2] {
    [
        ("start_date", start.format(SALES_DATE_FORMAT).to_string()),
        ("end_date", end.format(SALES_DATE_FORMAT).to_string()),
    ]
}
