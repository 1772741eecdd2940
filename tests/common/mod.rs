//! Shared fixtures for the mock-server tests
#![allow(dead_code)]

use audiosalad_sdk::{AudioSaladApi, ClientConfig, TokenState};
use chrono::{TimeDelta, Utc};
use serde_json::{Value, json};
use wiremock::MockServer;

pub const BASE_PATH: &str = "/client-api";
pub const ACCESS_TOKEN: &str = "test_access_token";
pub const REFRESH_TOKEN: &str = "test_refresh_token";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("audiosalad_sdk=debug"))
        .with_test_writer()
        .try_init();
}

pub fn api_path(path: &str) -> String {
    format!("{BASE_PATH}{path}")
}

pub fn config(server: &MockServer) -> ClientConfig {
    ClientConfig::new("mock_access_id", "mock_refresh_token")
        .with_base_url(format!("{}{BASE_PATH}", server.uri()))
}

pub fn valid_tokens() -> TokenState {
    let now = Utc::now();
    TokenState::issued(
        ACCESS_TOKEN,
        now + TimeDelta::hours(1),
        REFRESH_TOKEN,
        now + TimeDelta::hours(24),
    )
}

pub fn expired_tokens() -> TokenState {
    let now = Utc::now();
    TokenState::issued(
        "stale_access_token",
        now - TimeDelta::minutes(5),
        "stale_refresh_token",
        now + TimeDelta::hours(23),
    )
}

/// Client whose access token is valid for the next hour
pub fn authed_api(server: &MockServer) -> AudioSaladApi {
    init_tracing();
    AudioSaladApi::with_token_state(config(server), valid_tokens()).unwrap()
}

pub fn token_response(access_token: &str, refresh_token: &str) -> Value {
    json!({
        "access_token": access_token,
        "refresh_token": refresh_token,
        "access_token_expires_in": 3600,
        "refresh_token_expires_in": 86400
    })
}

pub fn release_json() -> Value {
    json!({
        "id": "rel_001",
        "format": "Single",
        "format_type": "Digital",
        "catalog": "NS001",
        "upc": "987654321098",
        "custom_id": "NSW-MOCKID",
        "state": "active",
        "title": "Celestial Flow",
        "version": null,
        "display_artist": "Luna Rae",
        "label": "Nebula Sounds",
        "labelId": "lbl_001",
        "compilation": false,
        "release_date": "2025-02-01",
        "p_info": "2025 Nebula Sounds",
        "publishing_info": {"year": "2025", "owner": "Nebula Sounds"},
        "c_info": "2025 Nebula Sounds",
        "copyright_info": {"year": "2025", "owner": "Nebula Sounds"},
        "rights_holders": "Nebula Sounds",
        "advisory": "None",
        "metadata_language": "English",
        "audio_language": "Instrumental",
        "categories": ["Electronic", "Downtempo"],
        "participants": [
            {"id": "art_001", "name": "Luna Rae", "role": "Main Artist", "sort_order": 0}
        ],
        "territories": "PL,DE,FR",
        "modified": "2025-01-20T00:00:00Z",
        "tracks": [track_json("trk_001")],
        "tags": ["Calm", "Dreamy"]
    })
}

pub fn track_json(id: &str) -> Value {
    json!({
        "id": id,
        "discnum": "1",
        "tracknum": "1",
        "title": "Orbit Lights",
        "isrc": "GBNS12500009",
        "custom_id": "NSW-TRK-001",
        "length": "260",
        "display_artist": "Luna Rae",
        "p_info": "2025 Nebula Sounds",
        "publishing_info": {"year": "2025", "owner": "Nebula Sounds"},
        "c_info": "2025 Nebula Sounds",
        "copyright_info": {"year": "2025", "owner": "Nebula Sounds"},
        "rights_holders": "Nebula Sounds",
        "advisory": "None",
        "audio_language": "Instrumental",
        "categories": ["Electronic", "Ambient"],
        "participants": [
            {"id": "art_001", "name": "Luna Rae", "role": "Main Artist", "sort_order": 0}
        ],
        "permission_stream": "1",
        "permission_download_nondrm": "1"
    })
}

pub fn label_json() -> Value {
    json!({
        "id": "lbl_001",
        "name": "Nebula Sounds",
        "display_name": "Nebula Sounds",
        "distributor": "0",
        "parent_label_id": "0",
        "custom_id": null,
        "created": "2025-01-15T00:00:00Z",
        "modified": "2025-01-15T00:00:00Z",
        "yt_asset_labels": [],
        "dsp_ids": [{"dsp": "apple", "id": "apple_lbl001"}]
    })
}

pub fn delivery_targets_json() -> Value {
    json!([
        {"id": "target_001", "name": "Spotify"},
        {"id": "target_002", "name": "Apple Music"},
        {"id": "target_003", "name": "Amazon Music"},
        {"id": "target_004", "name": "TIDAL"},
        {"id": "target_005", "name": "YouTube Music"}
    ])
}
