use std::fs;

use clap::Subcommand;
use serde_json::{Map, Value};
use tracing::{info, warn};

use super::preset::read_text;
use super::Output;
use crate::bop::{self, BopData, BopRecord};
use crate::error::{ConsoleError, Result};
use crate::preset;
use crate::util::expand_tilde;

#[derive(Subcommand)]
pub enum BopCommands {
    /// Fetch the BOP feed and reshape it
    Fetch {
        /// Feed URL
        #[arg(long, env = "ACC_CONSOLE_BOP_URL")]
        url: String,
        /// Extra query parameters, as key=value
        #[arg(long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
        /// Preset file whose BOP section is replaced in place
        #[arg(long)]
        preset: Option<String>,
        /// Write the updated preset here instead of over --preset
        #[arg(long, requires = "preset")]
        out: Option<String>,
    },

    /// Reshape a feed saved to disk
    Reshape {
        file: String,
        #[arg(long)]
        preset: Option<String>,
        #[arg(long, requires = "preset")]
        out: Option<String>,
    },
}

pub async fn run(cmd: BopCommands) -> Result<Output> {
    match cmd {
        BopCommands::Fetch {
            url,
            params,
            preset,
            out,
        } => {
            let params: Map<String, Value> = params
                .into_iter()
                .map(|(k, v)| (k, Value::String(v)))
                .collect();
            let records = bop::fetch_feed(&url, &params).await?;
            info!(records = records.len(), "Fetched BOP feed");
            finish(&records, preset.as_deref(), out.as_deref())
        }
        BopCommands::Reshape { file, preset, out } => {
            let records: Vec<BopRecord> = serde_json::from_str(&read_text(&file)?)?;
            finish(&records, preset.as_deref(), out.as_deref())
        }
    }
}

fn finish(records: &[BopRecord], preset_file: Option<&str>, out: Option<&str>) -> Result<Output> {
    let data = bop::reshape(records);

    match preset_file {
        Some(file) => merge_into_preset(&data, file, out),
        None => Ok(Output::Json(data.to_section()?)),
    }
}

fn merge_into_preset(data: &BopData, file: &str, out: Option<&str>) -> Result<Output> {
    let source = expand_tilde(file);
    let target = out.map(expand_tilde).unwrap_or_else(|| source.clone());
    let (mut doc, skipped) = preset::decode_with_report(&fs::read_to_string(&source)?);

    if !skipped.is_empty() {
        warn!(sections = ?skipped, "Preset has sections that did not parse");
        if target == source {
            return Err(ConsoleError::Custom(format!(
                "{source} has unreadable sections ({}); pass --out to write the result elsewhere",
                skipped.join(", ")
            )));
        }
    }

    data.apply_to(&mut doc)?;
    fs::write(&target, preset::encode(&doc))?;
    Ok(Output::Text(format!(
        "Wrote {} BOP entries to {target}",
        data.entries.len()
    )))
}

fn parse_param(s: &str) -> std::result::Result<(String, String), ConsoleError> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| ConsoleError::Custom(format!("expected key=value, got '{s}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const DAMAGED: &str =
        "#SETTINGS\r\n{\"serverName\": \"League\",}\r\n\r\n#BOP\r\n{\"entries\": []}";

    fn feed() -> BopData {
        let records: Vec<BopRecord> = serde_json::from_value(json!([
            { "track_name": "Monza", "bop": { "GT3": [
                { "car_model": 30, "ballast": 5, "restrictor": 0 }
            ] } }
        ]))
        .unwrap();
        bop::reshape(&records)
    }

    #[test]
    fn damaged_preset_is_not_rewritten_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("league.preset");
        fs::write(&file, DAMAGED).unwrap();

        assert!(merge_into_preset(&feed(), file.to_str().unwrap(), None).is_err());
        assert_eq!(fs::read_to_string(&file).unwrap(), DAMAGED);
    }

    #[test]
    fn damaged_preset_can_be_merged_to_another_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("league.preset");
        let out = dir.path().join("merged.preset");
        fs::write(&file, DAMAGED).unwrap();

        merge_into_preset(&feed(), file.to_str().unwrap(), out.to_str()).unwrap();
        assert_eq!(fs::read_to_string(&file).unwrap(), DAMAGED);
        let merged = preset::decode(&fs::read_to_string(&out).unwrap());
        assert_eq!(merged.get("BOP").unwrap()["entries"][0]["track"], "monza");
    }

    #[test]
    fn clean_preset_is_updated_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("league.preset");
        fs::write(&file, "#SETTINGS\r\n{\"serverName\": \"League\"}\r\n\r\n#BOP\r\n{\"entries\": []}").unwrap();

        merge_into_preset(&feed(), file.to_str().unwrap(), None).unwrap();
        let doc = preset::decode(&fs::read_to_string(&file).unwrap());
        assert_eq!(doc.names().collect::<Vec<_>>(), vec!["SETTINGS", "BOP"]);
        assert_eq!(doc.get("BOP").unwrap()["entries"][0]["carModel"], 30);
    }
}
