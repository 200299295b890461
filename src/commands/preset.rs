use std::fs;
use std::path::{Path, PathBuf};

use clap::Subcommand;
use tracing::info;

use super::Output;
use crate::error::{ConsoleError, Result};
use crate::preset::{self, cfg_files, share, PresetDocument};
use crate::templates;
use crate::util::expand_tilde;

#[derive(Subcommand)]
pub enum PresetCommands {
    /// Print the stock server configuration as preset text
    New,

    /// Parse preset text into a JSON document
    Decode { file: String },

    /// Turn a JSON document into preset text
    Encode { file: String },

    /// Write a preset as server cfg files
    Export {
        file: String,
        /// Target cfg directory
        #[arg(long, conflicts_with = "zip", required_unless_present = "zip")]
        dir: Option<String>,
        /// Target zip archive
        #[arg(long)]
        zip: Option<String>,
    },

    /// Read a server cfg directory or zip archive into preset text
    Import { source: String },

    /// Compress a preset file into a share code
    Share { file: String },

    /// Expand a share code back into preset text
    Unshare { code: String },
}

pub async fn run(cmd: PresetCommands) -> Result<Output> {
    match cmd {
        PresetCommands::New => Ok(Output::Text(preset::encode(&templates::preset_template()))),
        PresetCommands::Decode { file } => {
            let doc = preset::decode(&read_text(&file)?);
            Ok(Output::Json(serde_json::to_value(doc)?))
        }
        PresetCommands::Encode { file } => {
            let doc: PresetDocument = serde_json::from_str(&read_text(&file)?)?;
            Ok(Output::Text(preset::encode(&doc)))
        }
        PresetCommands::Export { file, dir, zip } => {
            let doc = preset::decode(&read_text(&file)?);
            if doc.is_empty() {
                return Err(ConsoleError::Custom(format!("No preset sections found in {file}")));
            }
            export(&doc, dir, zip)
        }
        PresetCommands::Import { source } => {
            let path = PathBuf::from(expand_tilde(&source));
            let doc = if path.is_dir() {
                cfg_files::import_from_dir(&path)?
            } else {
                cfg_files::import_from_zip(&path)?
            };
            info!(sections = doc.len(), source = %path.display(), "Imported server cfg");
            Ok(Output::Text(preset::encode(&doc)))
        }
        PresetCommands::Share { file } => Ok(Output::Text(share::compress(&read_text(&file)?).await?)),
        PresetCommands::Unshare { code } => Ok(Output::Text(share::decompress(&code).await?)),
    }
}

fn export(doc: &PresetDocument, dir: Option<String>, zip: Option<String>) -> Result<Output> {
    if let Some(dir) = dir {
        let written = cfg_files::export_to_dir(doc, Path::new(&expand_tilde(&dir)))?;
        let lines: Vec<String> = written.iter().map(|p| p.display().to_string()).collect();
        return Ok(Output::Text(lines.join("\n")));
    }
    if let Some(zip) = zip {
        let path = PathBuf::from(expand_tilde(&zip));
        cfg_files::export_to_zip(doc, &path)?;
        return Ok(Output::Text(path.display().to_string()));
    }
    Err(ConsoleError::Custom("Pass --dir or --zip".into()))
}

/// Read a text file, or stdin when `file` is `-`.
pub fn read_text(file: &str) -> Result<String> {
    if file == "-" {
        return Ok(std::io::read_to_string(std::io::stdin())?);
    }
    Ok(fs::read_to_string(expand_tilde(file))?)
}
