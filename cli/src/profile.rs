//! Profile content for the session, fetched from the `profile` panel when a
//! remote is configured.

use serde_json::Value;

use awaken_engine::{AwakenConfig, PanelFeed, Profile, ProgressionState, SubjectId};

const DEMO_FEATURED: usize = 3;

/// Offline profile: level 1 with a few featured slides.
pub fn demo() -> Profile {
    Profile {
        featured: DEMO_FEATURED,
        ..Profile::default()
    }
}

pub async fn load(config: &AwakenConfig) -> Profile {
    let Some(base_url) = config.remote_base_url() else {
        return demo();
    };
    let feed = match PanelFeed::new(base_url, config.remote_timeout()) {
        Ok(feed) => feed,
        Err(e) => {
            tracing::warn!("Profile feed unavailable: {e}");
            return demo();
        }
    };
    match feed.fetch("profile").await {
        Some(value) => from_json(&value),
        None => demo(),
    }
}

/// Read the fields the session needs; anything missing or malformed falls
/// back to its default.
pub fn from_json(value: &Value) -> Profile {
    let level = value.get("level").and_then(Value::as_u64).unwrap_or(1);
    let xp = value.get("xp").and_then(Value::as_u64).unwrap_or(0);
    let progression = ProgressionState::new(level, xp).unwrap_or_else(|e| {
        tracing::warn!("Ignoring profile progression: {e}");
        ProgressionState::default()
    });

    let featured = value
        .get("featured")
        .and_then(Value::as_array)
        .map_or(0, Vec::len);

    let endorsements = value
        .get("endorsements")
        .and_then(Value::as_object)
        .map(|counts| {
            counts
                .iter()
                .filter_map(|(skill, count)| Some((SubjectId::new(skill), count.as_u64()?)))
                .collect()
        })
        .unwrap_or_default();

    Profile {
        progression,
        featured,
        endorsements,
    }
}
