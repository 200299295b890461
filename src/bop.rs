//! Balance-of-performance feed reshaping.
//!
//! The feed lists per-track records with nested GT3/GT4 car entries; ACC's
//! `bop.json` wants one flat entry per car and track.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use tracing::debug;

use crate::data::{get_track, TrackColumn};
use crate::error::{ConsoleError, Result};
use crate::preset::PresetDocument;
use crate::servers::query_string;

/// Car model as sent by the feed. Kept in whichever form it arrived in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CarModel {
    Id(i64),
    Name(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CarBop {
    pub car_model: CarModel,
    pub ballast: Number,
    pub restrictor: Number,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BopGroups {
    #[serde(rename = "GT3", default)]
    pub gt3: Vec<CarBop>,
    #[serde(rename = "GT4", default)]
    pub gt4: Vec<CarBop>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BopRecord {
    pub track_name: String,
    pub bop: BopGroups,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BopEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track: Option<String>,
    pub car_model: CarModel,
    pub ballast_kg: Number,
    pub restrictor: Number,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BopData {
    pub entries: Vec<BopEntry>,
}

/// Flatten feed records into BOP entries.
///
/// Records keep their order; within a record GT3 cars come before GT4 cars.
/// Tracks that match nothing in the track table leave `track` empty.
pub fn reshape(records: &[BopRecord]) -> BopData {
    let mut entries = Vec::new();

    for record in records {
        let track = get_track(&record.track_name, TrackColumn::Lfm).map(|t| t.id.to_string());
        if track.is_none() {
            debug!(track_name = %record.track_name, "BOP record matches no known track");
        }

        for car in record.bop.gt3.iter().chain(&record.bop.gt4) {
            entries.push(BopEntry {
                track: track.clone(),
                car_model: car.car_model.clone(),
                ballast_kg: car.ballast.clone(),
                restrictor: car.restrictor.clone(),
            });
        }
    }

    BopData { entries }
}

impl BopData {
    pub fn to_section(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Replace the document's BOP section with these entries.
    pub fn apply_to(&self, doc: &mut PresetDocument) -> Result<()> {
        doc.insert("BOP", self.to_section()?);
        Ok(())
    }
}

/// Fetch feed records from `url`, with `params` appended as a query string.
pub async fn fetch_feed(url: &str, params: &Map<String, Value>) -> Result<Vec<BopRecord>> {
    let url = if params.is_empty() {
        url.to_string()
    } else {
        let sep = if url.contains('?') { '&' } else { '?' };
        format!("{url}{sep}{}", query_string(params)?)
    };

    debug!(%url, "Fetching BOP feed");
    let response = reqwest::Client::new()
        .get(&url)
        .header("User-Agent", crate::USER_AGENT)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(ConsoleError::Custom(format!(
            "BOP feed returned {}",
            response.status()
        )));
    }

    Ok(response.json().await?)
}
