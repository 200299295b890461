use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, warn};

use crate::data::CarGroup;
use crate::error::Result;

pub const DEFAULT_THEME_COLOR: &str = "#785abf";
pub const DEFAULT_SERVER_DOWN_MSG: &str = "The server is offline right now.";

/// Default messages shipped by older releases, replaced on load.
const LEGACY_SERVER_DOWN_MSGS: [&str; 2] = ["舞萌DX启动！", "Time for maimai DX!"];

/// The console's persisted state: favourites, view toggles, and user settings.
///
/// Loaded once at startup and saved once when a command changed it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Store {
    pub general: GeneralState,
    pub servers: ServerListState,
    pub settings: Settings,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneralState {
    pub fav_tracks: Vec<String>,
    pub fav_cars: FavCars,
    /// Id of the last announcement the user has seen.
    pub msg_id: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FavCars {
    #[serde(rename = "GT3")]
    pub gt3: Vec<String>,
    #[serde(rename = "GT4")]
    pub gt4: Vec<String>,
    #[serde(rename = "GTC")]
    pub gtc: Vec<String>,
    #[serde(rename = "TCX")]
    pub tcx: Vec<String>,
}

impl FavCars {
    pub fn group(&self, group: CarGroup) -> &[String] {
        match group {
            CarGroup::GT3 => &self.gt3,
            CarGroup::GT4 => &self.gt4,
            CarGroup::GTC => &self.gtc,
            CarGroup::TCX => &self.tcx,
        }
    }

    fn group_mut(&mut self, group: CarGroup) -> &mut Vec<String> {
        match group {
            CarGroup::GT3 => &mut self.gt3,
            CarGroup::GT4 => &mut self.gt4,
            CarGroup::GTC => &mut self.gtc,
            CarGroup::TCX => &mut self.tcx,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerListState {
    pub list_view: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub status: StatusSettings,
    pub setup: SetupSettings,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneralSettings {
    pub lang: Lang,
    pub dark_mode: DarkMode,
    pub theme_color: String,
    pub custom_bg_theme_color: String,
    pub bg_opacity: f64,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            lang: Lang::ZhCn,
            dark_mode: DarkMode::Auto,
            theme_color: DEFAULT_THEME_COLOR.into(),
            custom_bg_theme_color: DEFAULT_THEME_COLOR.into(),
            bg_opacity: 0.85,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatusSettings {
    pub server_down_msg: String,
}

impl Default for StatusSettings {
    fn default() -> Self {
        Self {
            server_down_msg: DEFAULT_SERVER_DOWN_MSG.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SetupSettings {
    pub car_display: DisplayMode,
    pub track_display: DisplayMode,
    pub setup_label_en: bool,
    pub always_view_only: bool,
}

impl Default for SetupSettings {
    fn default() -> Self {
        Self {
            car_display: DisplayMode::EnShort,
            track_display: DisplayMode::EnShort,
            setup_label_en: false,
            always_view_only: false,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lang {
    #[serde(rename = "en_US")]
    EnUs,
    #[default]
    #[serde(rename = "zh_CN")]
    ZhCn,
}

impl Lang {
    pub fn code(self) -> &'static str {
        match self {
            Lang::EnUs => "en_US",
            Lang::ZhCn => "zh_CN",
        }
    }
}

impl FromStr for Lang {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "en_US" | "en" => Ok(Lang::EnUs),
            "zh_CN" | "zh" => Ok(Lang::ZhCn),
            _ => Err(format!("unsupported language '{s}' (expected en_US or zh_CN)")),
        }
    }
}

/// Colour scheme, persisted as 1 (light), 2 (auto) or 3 (dark).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DarkMode {
    Light,
    #[default]
    Auto,
    Dark,
}

impl DarkMode {
    pub fn theme(self) -> &'static str {
        match self {
            DarkMode::Light => "light",
            DarkMode::Auto => "auto",
            DarkMode::Dark => "dark",
        }
    }
}

impl TryFrom<u8> for DarkMode {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            1 => Ok(DarkMode::Light),
            2 => Ok(DarkMode::Auto),
            3 => Ok(DarkMode::Dark),
            other => Err(format!("invalid dark mode {other}")),
        }
    }
}

impl From<DarkMode> for u8 {
    fn from(mode: DarkMode) -> u8 {
        match mode {
            DarkMode::Light => 1,
            DarkMode::Auto => 2,
            DarkMode::Dark => 3,
        }
    }
}

impl FromStr for DarkMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "light" | "1" => Ok(DarkMode::Light),
            "auto" | "2" => Ok(DarkMode::Auto),
            "dark" | "3" => Ok(DarkMode::Dark),
            _ => Err(format!("invalid dark mode '{s}' (expected light, auto or dark)")),
        }
    }
}

/// How track and car names are shown, persisted as 1, 2 or 3.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DisplayMode {
    EnFull,
    #[default]
    EnShort,
    Local,
}

impl TryFrom<u8> for DisplayMode {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            1 => Ok(DisplayMode::EnFull),
            2 => Ok(DisplayMode::EnShort),
            3 => Ok(DisplayMode::Local),
            other => Err(format!("invalid display mode {other}")),
        }
    }
}

impl From<DisplayMode> for u8 {
    fn from(mode: DisplayMode) -> u8 {
        match mode {
            DisplayMode::EnFull => 1,
            DisplayMode::EnShort => 2,
            DisplayMode::Local => 3,
        }
    }
}

impl FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "full" | "1" => Ok(DisplayMode::EnFull),
            "short" | "2" => Ok(DisplayMode::EnShort),
            "local" | "3" => Ok(DisplayMode::Local),
            _ => Err(format!("invalid display mode '{s}' (expected full, short or local)")),
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DisplayMode::EnFull => "full",
            DisplayMode::EnShort => "short",
            DisplayMode::Local => "local",
        })
    }
}

pub fn store_path(home: &Path) -> PathBuf {
    home.join("store.json")
}

/// Where a loaded store came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreOrigin {
    /// No file yet; defaults.
    Missing,
    /// Read from disk. Fields that did not parse took their defaults.
    File,
    /// The file exists but is not a JSON object; defaults.
    Unreadable,
}

impl Store {
    /// Load the store, falling back to defaults when the file is missing or unreadable.
    ///
    /// A field with a bad value falls back to its default on its own, so one
    /// stray setting never discards favourites or the seen announcement id.
    pub fn load(path: &Path) -> (Store, StoreOrigin) {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No saved store, using defaults");
                return (Store::default(), StoreOrigin::Missing);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Saved store is unreadable, using defaults");
                return (Store::default(), StoreOrigin::Unreadable);
            }
        };

        let value = match serde_json::from_str::<Value>(&content) {
            Ok(v @ Value::Object(_)) => v,
            Ok(_) => {
                warn!(path = %path.display(), "Saved store is not an object, using defaults");
                return (Store::default(), StoreOrigin::Unreadable);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Saved store is unreadable, using defaults");
                return (Store::default(), StoreOrigin::Unreadable);
            }
        };

        let mut store = match serde_json::from_value::<Store>(value.clone()) {
            Ok(s) => s,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Saved store has bad fields, keeping the rest");
                Store::from_partial(&value)
            }
        };
        store.migrate();
        (store, StoreOrigin::File)
    }

    /// Overlay each leaf of `saved` onto the defaults, dropping leaves that do not parse.
    fn from_partial(saved: &Value) -> Store {
        let Ok(mut merged) = serde_json::to_value(Store::default()) else {
            return Store::default();
        };
        let mut leaves = Vec::new();
        collect_leaves(saved, &mut Vec::new(), &mut leaves);

        for (keys, leaf) in leaves {
            let mut candidate = merged.clone();
            set_at(&mut candidate, &keys, leaf.clone());
            if serde_json::from_value::<Store>(candidate.clone()).is_ok() {
                merged = candidate;
            } else {
                warn!(field = %keys.join("."), value = %leaf, "Ignoring bad store field");
            }
        }
        serde_json::from_value(merged).unwrap_or_default()
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        debug!(path = %path.display(), "Saved store");
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Store::default();
    }

    /// Returns whether the track is a favourite after the toggle.
    pub fn toggle_fav_track(&mut self, track_id: &str) -> bool {
        toggle(&mut self.general.fav_tracks, track_id)
    }

    /// Returns whether the car is a favourite after the toggle.
    pub fn toggle_fav_car(&mut self, group: CarGroup, car_key: &str) -> bool {
        toggle(self.general.fav_cars.group_mut(group), car_key)
    }

    fn migrate(&mut self) {
        if self.settings.general.theme_color.is_empty() {
            self.settings.general.theme_color = DEFAULT_THEME_COLOR.into();
        }
        let msg = &mut self.settings.status.server_down_msg;
        if LEGACY_SERVER_DOWN_MSGS.contains(&msg.as_str()) {
            *msg = DEFAULT_SERVER_DOWN_MSG.into();
        }
    }
}

fn collect_leaves<'a>(value: &'a Value, keys: &mut Vec<String>, out: &mut Vec<(Vec<String>, &'a Value)>) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, child) in map {
                keys.push(key.clone());
                collect_leaves(child, keys, out);
                keys.pop();
            }
        }
        _ => out.push((keys.clone(), value)),
    }
}

fn set_at(root: &mut Value, keys: &[String], leaf: Value) {
    let Some((last, parents)) = keys.split_last() else {
        *root = leaf;
        return;
    };
    let mut node = root;
    for key in parents {
        if !node.is_object() {
            *node = Value::Object(Map::new());
        }
        let Value::Object(map) = node else { return };
        node = map.entry(key.clone()).or_insert_with(|| Value::Object(Map::new()));
    }
    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    if let Value::Object(map) = node {
        map.insert(last.clone(), leaf);
    }
}

fn toggle(list: &mut Vec<String>, key: &str) -> bool {
    if let Some(pos) = list.iter().position(|k| k == key) {
        list.remove(pos);
        false
    } else {
        list.push(key.to_string());
        true
    }
}
