//! Client SDK for the AudioSalad client API.
//!
//! ```no_run
//! use audiosalad_sdk::{AudioSaladService, ClientConfig};
//!
//! # async fn run() -> audiosalad_sdk::Result<()> {
//! let config = ClientConfig::for_namespace("nebula", "access-id", "refresh-token");
//! let mut service = AudioSaladService::new(config)?;
//!
//! for target in service.list_delivery_targets().await? {
//!     println!("{} {}", target.id, target.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod domain;
pub mod event;
pub mod id;

pub use client::{
    AudioSaladApi, AudioSaladService, ClientConfig, ClientError, Result, TokenState,
};
pub use domain::{
    Artist, DeliveryTarget, Label, Participant, Release, Report, RightsInfo, Track, Wrapped,
};
pub use event::{EventSink, SystemEvent, SystemEventKind, TracingSink};
pub use id::{ArtistId, DeliveryTargetId, LabelId, ReleaseId, TrackId};
