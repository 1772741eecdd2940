//! Paths and methods of the AudioSalad client API

use compact_str::{CompactString, format_compact};
use reqwest::Method;

use crate::id::{ArtistId, LabelId, ReleaseId, TrackId};

pub const SALES_DATE_FORMAT: &str = "%Y-%m-%d";
pub const MODIFIED_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    AccessToken,
    Releases,
    Release(&'a ReleaseId),
    ReleaseIds,
    Tracks,
    Track(&'a TrackId),
    Artists,
    Artist(&'a ArtistId),
    Labels,
    Label(&'a LabelId),
    SalesReport,
    EarningsReport,
    DeliveryTargets,
}

impl Endpoint<'_> {
    pub fn method(&self) -> Method {
        match self {
            Endpoint::AccessToken | Endpoint::DeliveryTargets => Method::POST,
            _ => Method::GET,
        }
    }

    pub fn path(&self) -> CompactString {
        match self {
            Endpoint::AccessToken => "/access-token".into(),
            Endpoint::Releases => "/releases".into(),
            Endpoint::Release(id) => format_compact!("/releases/{id}"),
            Endpoint::ReleaseIds => "/release-ids".into(),
            Endpoint::Tracks => "/tracks".into(),
            Endpoint::Track(id) => format_compact!("/tracks/{id}"),
            Endpoint::Artists => "/artists".into(),
            Endpoint::Artist(id) => format_compact!("/artists/{id}"),
            Endpoint::Labels => "/labels".into(),
            Endpoint::Label(id) => format_compact!("/labels/{id}"),
            Endpoint::SalesReport => "/reports/sales".into(),
            Endpoint::EarningsReport => "/reports/earnings".into(),
            Endpoint::DeliveryTargets => "/delivery-targets".into(),
        }
    }

    pub fn url(&self, base_url: &str) -> CompactString {
        format_compact!("{}{}", base_url, self.path())
    }

    /// Every endpoint but the token exchange carries a bearer token
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Endpoint::AccessToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://nebula.dashboard.audiosalad.com/client-api";

    #[test]
    fn by_id_paths_append_the_id() {
        let release = ReleaseId::new("rel_001");
        let track = TrackId::new("mock_track");
        let artist = ArtistId::new("mock_artist");
        let label = LabelId::new("lbl_001");

        assert_eq!(Endpoint::Release(&release).url(BASE), format!("{BASE}/releases/rel_001"));
        assert_eq!(Endpoint::Track(&track).url(BASE), format!("{BASE}/tracks/mock_track"));
        assert_eq!(Endpoint::Artist(&artist).url(BASE), format!("{BASE}/artists/mock_artist"));
        assert_eq!(Endpoint::Label(&label).url(BASE), format!("{BASE}/labels/lbl_001"));
    }

    #[test]
    fn delivery_targets_and_token_exchange_are_posts() {
        assert_eq!(Endpoint::DeliveryTargets.method(), Method::POST);
        assert_eq!(Endpoint::AccessToken.method(), Method::POST);
        assert_eq!(Endpoint::Tracks.method(), Method::GET);
        assert_eq!(Endpoint::ReleaseIds.method(), Method::GET);
    }

    #[test]
    fn only_token_exchange_skips_auth() {
        assert!(!Endpoint::AccessToken.requires_auth());
        assert!(Endpoint::SalesReport.requires_auth());
        assert!(Endpoint::DeliveryTargets.requires_auth());
    }

    #[test]
    fn report_paths() {
        assert_eq!(Endpoint::SalesReport.path(), "/reports/sales");
        assert_eq!(Endpoint::EarningsReport.path(), "/reports/earnings");
    }
}
