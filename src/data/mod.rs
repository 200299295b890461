//! Static track and car tables, plus display-name and ordering helpers
//! driven by the user's [`SetupSettings`].

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;
use tracing::warn;

use crate::commands::config::{DisplayMode, SetupSettings, Store};

mod cars;
mod tracks;

pub use cars::{get_car_by_id, get_car_by_key, Car, CarGroup};
pub use tracks::{get_track, Track, TrackColumn, TRACKS};

/// Source of localized names for the `Local` display mode.
pub trait Translate {
    /// Look up a dotted key such as `tracks.spa` or `cars.bmw_m4_gt3`.
    fn translate(&self, key: &str) -> Option<String>;
}

/// Used when no locale file is available. Local names fall back to English.
pub struct NoTranslations;

impl Translate for NoTranslations {
    fn translate(&self, _key: &str) -> Option<String> {
        None
    }
}

/// Flat key → text map loaded from a locale JSON file.
#[derive(Debug, Default)]
pub struct Translations(HashMap<String, String>);

impl Translations {
    /// Nested objects are flattened into dotted keys. A missing or broken
    /// file yields an empty table.
    pub fn load(path: &Path) -> Translations {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Translations::default();
        };
        match serde_json::from_str::<Value>(&content) {
            Ok(value) => {
                let mut map = HashMap::new();
                flatten("", &value, &mut map);
                Translations(map)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Ignoring unreadable locale file");
                Translations::default()
            }
        }
    }
}

impl Translate for Translations {
    fn translate(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }
}

fn flatten(prefix: &str, value: &Value, out: &mut HashMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (k, v) in map {
                let key = if prefix.is_empty() {
                    k.clone()
                } else {
                    format!("{prefix}.{k}")
                };
                flatten(&key, v, out);
            }
        }
        Value::String(s) => {
            out.insert(prefix.to_string(), s.clone());
        }
        _ => {}
    }
}

pub fn track_display(track: &Track, setup: &SetupSettings, tr: &dyn Translate) -> String {
    match setup.track_display {
        DisplayMode::EnFull => track.full.to_string(),
        DisplayMode::EnShort => track.short.to_string(),
        DisplayMode::Local => tr
            .translate(&format!("tracks.{}", track.id))
            .unwrap_or_else(|| track.full.to_string()),
    }
}

pub fn car_display(car: &Car, setup: &SetupSettings, tr: &dyn Translate) -> String {
    match setup.car_display {
        DisplayMode::EnFull => car.name.to_string(),
        DisplayMode::EnShort => car.short_name.to_string(),
        DisplayMode::Local => tr
            .translate(&format!("cars.{}", car.key))
            .unwrap_or_else(|| car.name.to_string()),
    }
}

pub fn track_display_by_key(
    key: &str,
    by: TrackColumn,
    setup: &SetupSettings,
    tr: &dyn Translate,
) -> Option<String> {
    get_track(key, by).map(|t| track_display(t, setup, tr))
}

pub fn car_display_by_id(id: u32, setup: &SetupSettings, tr: &dyn Translate) -> Option<String> {
    get_car_by_id(id).map(|(_, car)| car_display(car, setup, tr))
}

/// Cars of `group`: favourites first, then competitive cars, then by display name.
pub fn sort_cars(group: CarGroup, store: &Store, tr: &dyn Translate) -> Vec<&'static Car> {
    let favs = store.general.fav_cars.group(group);
    let setup = &store.settings.setup;

    let mut cars: Vec<&'static Car> = group.cars().iter().collect();
    cars.sort_by_cached_key(|car| {
        (
            !favs.iter().any(|k| k == car.key),
            !car.competitive,
            car_display(car, setup, tr),
        )
    });
    cars
}

/// All tracks: favourites first, then by display name.
pub fn sort_tracks(store: &Store, tr: &dyn Translate) -> Vec<&'static Track> {
    let favs = &store.general.fav_tracks;
    let setup = &store.settings.setup;

    let mut tracks: Vec<&'static Track> = TRACKS.iter().collect();
    tracks.sort_by_cached_key(|track| {
        (
            !favs.iter().any(|id| id == track.id),
            track_display(track, setup, tr),
        )
    });
    tracks
}
