use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::commands::config::Store;
use crate::error::{ConsoleError, Result};

/// Update metadata published alongside each release.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInfo {
    pub version: String,
    /// Id of the announcement bundled with this metadata. 0 means none.
    #[serde(default)]
    pub msg_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl UpdateInfo {
    pub fn is_newer_than(&self, local_version: &str) -> bool {
        is_newer_version(local_version, &self.version)
    }
}

/// One-shot, user-facing notice (toast, status line, stderr).
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Writes notices to stderr.
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, message: &str) {
        eprintln!("{message}");
    }
}

/// Compare two semver strings (e.g. "0.2.0" > "0.1.0").
/// Returns true if `remote` is newer than `local`.
fn is_newer_version(local: &str, remote: &str) -> bool {
    let parse = |s: &str| -> (u64, u64, u64) {
        let parts: Vec<u64> = s
            .trim()
            .trim_start_matches('v')
            .splitn(3, '.')
            .filter_map(|p| p.parse().ok())
            .collect();
        (
            parts.first().copied().unwrap_or(0),
            parts.get(1).copied().unwrap_or(0),
            parts.get(2).copied().unwrap_or(0),
        )
    };
    parse(remote) > parse(local)
}

async fn fetch_update_info_inner(url: &str) -> Result<UpdateInfo> {
    let response = reqwest::Client::new()
        .get(url)
        .header("User-Agent", crate::USER_AGENT)
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(ConsoleError::Custom(format!(
            "update server returned {}",
            response.status()
        )));
    }

    Ok(response.json().await?)
}

/// Fetch update metadata.
///
/// Any failure is logged, reported once through `notifier`, and treated as
/// "no update".
pub async fn fetch_update_info(url: &str, notifier: &dyn Notifier) -> Option<UpdateInfo> {
    match fetch_update_info_inner(url).await {
        Ok(info) => {
            debug!(version = %info.version, msg_id = info.msg_id, "Fetched update metadata");
            Some(info)
        }
        Err(e) => {
            warn!(%url, error = %e, "Update check failed");
            notifier.notify(&format!("Could not check for updates: {e}"));
            None
        }
    }
}

/// Returns the remote release when it is newer than `local_version`.
pub async fn check_for_update(
    url: &str,
    local_version: &str,
    notifier: &dyn Notifier,
) -> Option<UpdateInfo> {
    fetch_update_info(url, notifier)
        .await
        .filter(|info| info.is_newer_than(local_version))
}

/// The bundled announcement, if the user has not seen it yet. Marks it seen.
pub fn pending_message(info: &UpdateInfo, store: &mut Store) -> Option<String> {
    let message = info.message.as_deref().filter(|m| !m.is_empty())?;
    if info.msg_id <= store.general.msg_id {
        return None;
    }
    store.general.msg_id = info.msg_id;
    Some(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(version: &str, msg_id: u64, message: Option<&str>) -> UpdateInfo {
        UpdateInfo {
            version: version.into(),
            msg_id,
            message: message.map(String::from),
            url: None,
            notes: None,
        }
    }

    #[test]
    fn test_version_comparison() {
        assert!(is_newer_version("0.1.0", "0.2.0"));
        assert!(is_newer_version("0.1.0", "1.0.0"));
        assert!(is_newer_version("1.0.0", "1.0.1"));
        assert!(!is_newer_version("0.2.0", "0.1.0"));
        assert!(!is_newer_version("0.1.0", "0.1.0"));
        assert!(is_newer_version("v0.1.0", "v0.2.0"));
        assert!(is_newer_version("0.1", "0.1.1"));
    }

    #[test]
    fn pending_message_is_shown_once() {
        let mut store = Store::default();
        let update = info("0.1.0", 3, Some("Servers move to 1.10 this weekend"));

        assert_eq!(
            pending_message(&update, &mut store).as_deref(),
            Some("Servers move to 1.10 this weekend")
        );
        assert_eq!(store.general.msg_id, 3);
        assert_eq!(pending_message(&update, &mut store), None);
    }

    #[test]
    fn empty_or_missing_message_is_ignored() {
        let mut store = Store::default();
        assert_eq!(pending_message(&info("1.0.0", 5, None), &mut store), None);
        assert_eq!(pending_message(&info("1.0.0", 5, Some("")), &mut store), None);
        assert_eq!(store.general.msg_id, 0);
    }
}
