use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use compact_str::CompactString;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::id::{ArtistId, DeliveryTargetId, LabelId, ReleaseId, TrackId};

/// Status string the client writes into every envelope it builds
pub const STATUS_SUCCESS: &str = "success";

/// `{status, data}` wrapper applied by the client to a subset of endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wrapped<T> {
    pub status: CompactString,
    pub data: T,
}

impl<T> Wrapped<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: STATUS_SUCCESS.into(),
            data,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }

    pub fn into_data(self) -> T {
        self.data
    }
}

/// Sales or earnings report in a `{status, ...}` envelope
///
/// Serializes back to one flat object: `status` next to the body fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    #[serde(default = "success_status")]
    pub status: CompactString,
    #[serde(flatten)]
    pub body: Map<String, Value>,
}

impl Report {
    /// Wrap a report body as the server sent it
    ///
    /// An object keeps its fields and its own `status` when it has one,
    /// otherwise it is marked successful. Lists and scalars go under `data`.
    pub fn from_body(body: Value) -> Self {
        match body {
            Value::Object(mut body) => {
                let status = match body.remove("status") {
                    Some(Value::String(status)) => status.into(),
                    Some(other) => other.to_string().into(),
                    None => success_status(),
                };
                Self { status, body }
            },
            data => Self {
                status: success_status(),
                body: Map::from_iter([("data".to_owned(), data)]),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.body.get(key)
    }
}

fn success_status() -> CompactString {
    STATUS_SUCCESS.into()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RightsInfo {
    #[serde(default)]
    pub year: Option<CompactString>,
    #[serde(default)]
    pub owner: Option<CompactString>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ArtistId,
    pub name: CompactString,
    pub role: CompactString,
    #[serde(default, deserialize_with = "lenient::number")]
    pub sort_order: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Release {
    pub id: ReleaseId,
    pub title: CompactString,
    #[serde(default)]
    pub version: Option<CompactString>,
    #[serde(default)]
    pub format: Option<CompactString>,
    #[serde(default)]
    pub format_type: Option<CompactString>,
    #[serde(default)]
    pub catalog: Option<CompactString>,
    #[serde(default)]
    pub upc: Option<CompactString>,
    #[serde(default)]
    pub custom_id: Option<CompactString>,
    #[serde(default)]
    pub state: Option<CompactString>,
    #[serde(default)]
    pub display_artist: Option<CompactString>,
    #[serde(default)]
    pub label: Option<CompactString>,
    #[serde(rename = "labelId", default)]
    pub label_id: Option<LabelId>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub compilation: bool,
    #[serde(default, deserialize_with = "lenient::date")]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub p_info: Option<CompactString>,
    #[serde(default)]
    pub publishing_info: Option<RightsInfo>,
    #[serde(default)]
    pub c_info: Option<CompactString>,
    #[serde(default)]
    pub copyright_info: Option<RightsInfo>,
    #[serde(default)]
    pub rights_holders: Option<CompactString>,
    #[serde(default)]
    pub advisory: Option<CompactString>,
    #[serde(default)]
    pub metadata_language: Option<CompactString>,
    #[serde(default)]
    pub audio_language: Option<CompactString>,
    #[serde(default)]
    pub categories: Vec<CompactString>,
    #[serde(default)]
    pub participants: Vec<Participant>,
    /// Comma separated ISO country codes
    #[serde(default)]
    pub territories: Option<CompactString>,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub modified: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tracks: Vec<Track>,
    #[serde(default)]
    pub tags: Vec<CompactString>,
}

impl Release {
    pub fn territory_codes(&self) -> impl Iterator<Item = &str> {
        self.territories
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|code| !code.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,
    pub title: CompactString,
    #[serde(default)]
    pub discnum: Option<CompactString>,
    #[serde(default)]
    pub tracknum: Option<CompactString>,
    #[serde(default)]
    pub isrc: Option<CompactString>,
    #[serde(default)]
    pub custom_id: Option<CompactString>,
    /// Duration in seconds, sent as a string
    #[serde(default)]
    pub length: Option<CompactString>,
    #[serde(default)]
    pub display_artist: Option<CompactString>,
    #[serde(default)]
    pub p_info: Option<CompactString>,
    #[serde(default)]
    pub publishing_info: Option<RightsInfo>,
    #[serde(default)]
    pub c_info: Option<CompactString>,
    #[serde(default)]
    pub copyright_info: Option<RightsInfo>,
    #[serde(default)]
    pub rights_holders: Option<CompactString>,
    #[serde(default)]
    pub advisory: Option<CompactString>,
    #[serde(default)]
    pub audio_language: Option<CompactString>,
    #[serde(default)]
    pub categories: Vec<CompactString>,
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub permission_stream: Option<CompactString>,
    #[serde(default)]
    pub permission_download_nondrm: Option<CompactString>,
}

impl Track {
    pub fn can_stream(&self) -> bool {
        lenient::is_truthy(self.permission_stream.as_deref())
    }

    pub fn length_secs(&self) -> Option<u32> {
        self.length.as_deref()?.parse().ok()
    }
}

/// Artist records carry tenant specific fields, so anything beyond id and
/// name is kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: ArtistId,
    #[serde(default)]
    pub name: Option<CompactString>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DspId {
    pub dsp: CompactString,
    pub id: CompactString,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub id: LabelId,
    pub name: CompactString,
    #[serde(default)]
    pub display_name: Option<CompactString>,
    #[serde(default)]
    pub distributor: Option<CompactString>,
    #[serde(default)]
    pub parent_label_id: Option<LabelId>,
    #[serde(default)]
    pub custom_id: Option<CompactString>,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub modified: Option<DateTime<Utc>>,
    #[serde(default)]
    pub yt_asset_labels: Vec<Value>,
    #[serde(default)]
    pub dsp_ids: Vec<DspId>,
}

impl Label {
    pub fn dsp_id(&self, dsp: &str) -> Option<&str> {
        self.dsp_ids
            .iter()
            .find(|entry| entry.dsp == dsp)
            .map(|entry| entry.id.as_str())
    }
}

/// Downstream platform a release can be delivered to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryTarget {
    pub id: DeliveryTargetId,
    pub name: CompactString,
}

/// Field parsers that never fail a record: a value that does not fit the
/// type becomes `None`, `false` or `0`.
mod lenient {
    use super::*;

    const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

    pub(super) fn date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value
            .as_ref()
            .and_then(Value::as_str)
            .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()))
    }

    pub(super) fn timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().and_then(Value::as_str).and_then(parse_timestamp))
    }

    fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.to_utc());
        }
        TIMESTAMP_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
            .map(|naive| naive.and_utc())
    }

    pub(super) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::Bool(flag)) => flag,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
            Some(Value::String(s)) => is_truthy(Some(s.as_str())),
            _ => false,
        })
    }

    pub(super) fn number<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        }
        .unwrap_or_default())
    }

    pub(super) fn is_truthy(raw: Option<&str>) -> bool {
        raw.is_some_and(|s| {
            matches!(
                s.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "y"
            )
        })
    }
}
