//! High-level AudioSalad service operations

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{error, instrument};

use super::{
    api::AudioSaladApi,
    config::ClientConfig,
    error::{ClientError, Result},
};
use crate::{
    domain::{Artist, DeliveryTarget, Label, Release, Report, Track, Wrapped},
    event::{EventSink, SystemEvent, TracingSink},
    id::{ArtistId, LabelId, ReleaseId, TrackId},
};

/// Stable vocabulary over [`AudioSaladApi`]
///
/// Every call delegates 1:1. A failed call is logged and recorded as a
/// [`SystemEvent`] on the sink, then the same error is returned.
#[derive(Debug)]
pub struct AudioSaladService<S = TracingSink> {
    api: AudioSaladApi,
    sink: S,
}

impl AudioSaladService<TracingSink> {
    /// Create service with its own API client, recording events via `tracing`
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self::from_api(AudioSaladApi::new(config)?, TracingSink))
    }
}

impl<S: EventSink> AudioSaladService<S> {
    /// Create service from existing API client
    pub fn from_api(api: AudioSaladApi, sink: S) -> Self {
        Self { api, sink }
    }

    /// Swap the event sink
    pub fn with_sink<T: EventSink>(self, sink: T) -> AudioSaladService<T> {
        AudioSaladService {
            api: self.api,
            sink,
        }
    }

    /// Get reference to the underlying API client
    pub fn api(&self) -> &AudioSaladApi {
        &self.api
    }

    pub fn api_mut(&mut self) -> &mut AudioSaladApi {
        &mut self.api
    }

    pub fn into_api(self) -> AudioSaladApi {
        self.api
    }

    #[instrument(skip(self))]
    pub async fn get_all_releases(&mut self) -> Result<Vec<Release>> {
        let result = self.api.get_releases().await;
        self.observe("get_all_releases", result)
    }

    #[instrument(skip(self), fields(release_id = %id))]
    pub async fn get_release_by_id(&mut self, id: &ReleaseId) -> Result<Vec<Release>> {
        let result = self.api.get_release(id).await;
        self.observe("get_release_by_id", result)
    }

    #[instrument(skip(self), fields(label_id = %id))]
    pub async fn get_label_by_id(&mut self, id: &LabelId) -> Result<Vec<Label>> {
        let result = self.api.get_label_by_id(id).await;
        self.observe("get_label_by_id", result)
    }

    #[instrument(skip(self), fields(start = %start, end = %end))]
    pub async fn get_release_ids(
        &mut self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ReleaseId>> {
        let result = self.api.get_release_ids(start, end).await;
        self.observe("get_release_ids", result)
    }

    #[instrument(skip(self))]
    pub async fn list_delivery_targets(&mut self) -> Result<Vec<DeliveryTarget>> {
        let result = self.api.list_delivery_targets().await;
        self.observe("list_delivery_targets", result)
    }

    #[instrument(skip(self))]
    pub async fn get_tracks(&mut self) -> Result<Wrapped<Vec<Track>>> {
        let result = self.api.get_tracks().await;
        self.observe("get_tracks", result)
    }

    #[instrument(skip(self), fields(track_id = %id))]
    pub async fn get_track_by_id(&mut self, id: &TrackId) -> Result<Wrapped<Track>> {
        let result = self.api.get_track_by_id(id).await;
        self.observe("get_track_by_id", result)
    }

    #[instrument(skip(self))]
    pub async fn get_all_artists(&mut self) -> Result<Wrapped<Vec<Artist>>> {
        let result = self.api.get_all_artists().await;
        self.observe("get_all_artists", result)
    }

    #[instrument(skip(self), fields(artist_id = %id))]
    pub async fn get_artist_by_id(&mut self, id: &ArtistId) -> Result<Wrapped<Artist>> {
        let result = self.api.get_artist_by_id(id).await;
        self.observe("get_artist_by_id", result)
    }

    #[instrument(skip(self))]
    pub async fn get_all_labels(&mut self) -> Result<Wrapped<Vec<Label>>> {
        let result = self.api.get_all_labels().await;
        self.observe("get_all_labels", result)
    }

    #[instrument(skip(self), fields(start = %start, end = %end))]
    pub async fn get_sales_report_for_period(
        &mut self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Report> {
        let result = self.api.get_sales_report_for_period(start, end).await;
        self.observe("get_sales_report_for_period", result)
    }

    #[instrument(skip(self), fields(start = %start, end = %end))]
    pub async fn get_earnings_report_for_period(
        &mut self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Report> {
        let result = self.api.get_earnings_report_for_period(start, end).await;
        self.observe("get_earnings_report_for_period", result)
    }

    fn observe<T>(&self, operation: &'static str, result: Result<T>) -> Result<T> {
        result.map_err(|e| self.report(operation, e))
    }

    /// Log and record a failure, handing the error back unchanged
    fn report(&self, operation: &'static str, err: ClientError) -> ClientError {
        error!(operation, error = %err, "AudioSalad request failed");
        self.sink.record(SystemEvent::api_failure(operation, &err));
        err
    }
}
