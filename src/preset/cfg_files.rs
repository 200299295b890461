//! Mapping between preset sections and the JSON files in an ACC server `cfg/` directory.

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};
use zip::write::SimpleFileOptions;

use super::PresetDocument;
use crate::error::{ConsoleError, Result};

/// Section name → file name inside the server's `cfg/` directory.
pub const CFG_FILES: [(&str, &str); 7] = [
    ("SETTINGS", "settings.json"),
    ("ASSIST", "assistRules.json"),
    ("EVENT", "event.json"),
    ("EVENTRULES", "eventRules.json"),
    ("CONFIGURATION", "configuration.json"),
    ("ENTRYLIST", "entrylist.json"),
    ("BOP", "bop.json"),
];

pub fn cfg_file_name(section: &str) -> Option<&'static str> {
    CFG_FILES
        .iter()
        .find(|(name, _)| *name == section)
        .map(|(_, file)| *file)
}

/// Writes every known section of `doc` into `dir`. Returns the written paths.
pub fn export_to_dir(doc: &PresetDocument, dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let mut written = Vec::new();
    for (file, json) in cfg_payloads(doc)? {
        let path = dir.join(file);
        fs::write(&path, json)?;
        debug!(path = %path.display(), "Wrote server cfg file");
        written.push(path);
    }
    Ok(written)
}

/// Writes every known section of `doc` into a zip archive at `path`.
pub fn export_to_zip(doc: &PresetDocument, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let file = fs::File::create(path)?;
    let mut zip = zip::ZipWriter::new(file);
    for (name, json) in cfg_payloads(doc)? {
        zip.start_file(name, SimpleFileOptions::default())?;
        zip.write_all(json.as_bytes())?;
    }
    zip.finish()?;
    Ok(())
}

/// Reads the cfg files present in `dir` into a document, in [`CFG_FILES`] order.
///
/// Files that are missing or hold invalid JSON are skipped.
pub fn import_from_dir(dir: &Path) -> Result<PresetDocument> {
    if !dir.is_dir() {
        return Err(ConsoleError::Custom(format!(
            "Not a directory: {}",
            dir.display()
        )));
    }

    let mut doc = PresetDocument::new();
    for (section, file) in CFG_FILES {
        let path = dir.join(file);
        if !path.exists() {
            continue;
        }
        let bytes = fs::read(&path)?;
        insert_cfg(&mut doc, section, file, &bytes);
    }
    Ok(doc)
}

/// Same as [`import_from_dir`] for a zip archive. Files may sit in a subfolder.
pub fn import_from_zip(path: &Path) -> Result<PresetDocument> {
    let mut archive = zip::ZipArchive::new(fs::File::open(path)?)?;
    let entries: Vec<String> = archive.file_names().map(str::to_string).collect();

    let mut doc = PresetDocument::new();
    for (section, file) in CFG_FILES {
        let Some(entry) = entries
            .iter()
            .find(|e| Path::new(e).file_name().and_then(|n| n.to_str()) == Some(file))
        else {
            continue;
        };

        let mut bytes = Vec::new();
        archive.by_name(entry)?.read_to_end(&mut bytes)?;
        insert_cfg(&mut doc, section, file, &bytes);
    }
    Ok(doc)
}

fn cfg_payloads(doc: &PresetDocument) -> Result<Vec<(&'static str, String)>> {
    let mut payloads = Vec::new();
    for (section, value) in doc.iter() {
        match cfg_file_name(section) {
            Some(file) => payloads.push((file, serde_json::to_string_pretty(value)?)),
            None => warn!(section, "Section has no server cfg file, skipping"),
        }
    }
    Ok(payloads)
}

fn insert_cfg(doc: &mut PresetDocument, section: &str, file: &str, bytes: &[u8]) {
    match serde_json::from_str::<Value>(&decode_text(bytes)) {
        Ok(value) => {
            doc.insert(section, value);
        }
        Err(e) => warn!(file, error = %e, "Skipping unreadable server cfg file"),
    }
}

/// Decode cfg file bytes. The server writes UTF-16LE with a BOM; hand-edited
/// files are usually UTF-8.
fn decode_text(bytes: &[u8]) -> String {
    match bytes {
        [0xFF, 0xFE, rest @ ..] => decode_utf16(rest, u16::from_le_bytes),
        [0xFE, 0xFF, rest @ ..] => decode_utf16(rest, u16::from_be_bytes),
        [0xEF, 0xBB, 0xBF, rest @ ..] => String::from_utf8_lossy(rest).into_owned(),
        _ => String::from_utf8_lossy(bytes).into_owned(),
    }
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| unit([pair[0], pair[1]]))
        .collect();
    String::from_utf16_lossy(&units)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_utf16le_with_bom() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "{\"a\":1}".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(decode_text(&bytes), "{\"a\":1}");
    }

    #[test]
    fn decodes_utf16be_and_utf8_bom() {
        let mut bytes = vec![0xFE, 0xFF];
        for unit in "[]".encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        assert_eq!(decode_text(&bytes), "[]");
        assert_eq!(decode_text(b"\xEF\xBB\xBF{}"), "{}");
        assert_eq!(decode_text(b"{}"), "{}");
    }

    #[test]
    fn known_sections_map_to_server_files() {
        assert_eq!(cfg_file_name("EVENTRULES"), Some("eventRules.json"));
        assert_eq!(cfg_file_name("ASSIST"), Some("assistRules.json"));
        assert_eq!(cfg_file_name("NOTES"), None);
    }
}
