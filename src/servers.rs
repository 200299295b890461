//! Helpers for the public server list: league detection and launch URLs.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Url;
use serde_json::{Map, Value};

use crate::error::{ConsoleError, Result};

const HIPOLE_PREFIX: &str = "HiPole.com | ";
const CONNECTOR_URL: &str = "https://lonemeow.github.io/acc-connector/";

/// Bytes left unescaped by `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');
pub const ACC_STEAM_APP_ID: &str = "805550";

/// HiPole event tier, derived from the event code in the server name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HipoleTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl HipoleTier {
    pub fn from_event(code: &str) -> Option<HipoleTier> {
        match code {
            "RCC" => Some(HipoleTier::Bronze),
            "TTC" | "MCC" => Some(HipoleTier::Silver),
            "RWC" => Some(HipoleTier::Gold),
            // Thrustmaster HEC
            "Thr" => Some(HipoleTier::Platinum),
            _ => None,
        }
    }

    /// Badge (background, foreground) colours.
    pub fn colors(self) -> (&'static str, &'static str) {
        match self {
            HipoleTier::Bronze => ("#a15e1a", "#fff"),
            HipoleTier::Silver => ("#c0c0c0", "#000"),
            HipoleTier::Gold => ("#ffd700", "#000"),
            HipoleTier::Platinum => ("#1db0fd", "#fff"),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            HipoleTier::Bronze => "Bronze",
            HipoleTier::Silver => "Silver",
            HipoleTier::Gold => "Gold",
            HipoleTier::Platinum => "Platinum",
        }
    }
}

/// Event code of a HiPole league server, e.g. `"RCC"` for
/// `"HiPole.com | RCC Season 12"`.
pub fn hipole_event(name: &str) -> Option<&str> {
    if !name.starts_with(HIPOLE_PREFIX) || name.encode_utf16().count() < 16 {
        return None;
    }
    let field = name.split(" | ").nth(1)?;
    let code = field.get(..3)?;
    HipoleTier::from_event(code).map(|_| code)
}

/// URL that hands a server to the acc-connector helper. Only the name is
/// escaped, with the `encodeURIComponent` character set the helper expects.
pub fn connector_url(ip: &str, tcp_port: u16, name: &str) -> String {
    format!(
        "{CONNECTOR_URL}?hostname={ip}&port={tcp_port}&name={}&persistent=true",
        utf8_percent_encode(name, URI_COMPONENT)
    )
}

pub fn steam_launch_url(app_id: &str) -> String {
    format!("steam://rungameid/{app_id}")
}

/// Form-encode `params`. Nulls are skipped; objects and arrays are sent as JSON.
pub fn query_string(params: &Map<String, Value>) -> Result<String> {
    let mut url = Url::parse("http://localhost/").map_err(|e| ConsoleError::Custom(e.to_string()))?;
    {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in params {
            match value {
                Value::Null => {}
                Value::String(s) => {
                    pairs.append_pair(key, s);
                }
                other => {
                    pairs.append_pair(key, &other.to_string());
                }
            }
        }
    }
    Ok(url.query().unwrap_or_default().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn detects_hipole_events() {
        assert_eq!(hipole_event("HiPole.com | RCC Season 12"), Some("RCC"));
        assert_eq!(hipole_event("HiPole.com | Thrustmaster HEC"), Some("Thr"));
        assert_eq!(hipole_event("HiPole.com | XYZ Open"), None);
        assert_eq!(hipole_event("HiPole.com | RC"), None);
        assert_eq!(hipole_event("Some Server | RCC"), None);
        assert_eq!(hipole_event("HiPole.com | TTC 🏁"), Some("TTC"));
        // 15 scalars but 16 UTF-16 units: long enough, yet no event code.
        assert_eq!(hipole_event("HiPole.com | R🏁"), None);
    }

    #[test]
    fn tiers_map_to_badges() {
        let tier = HipoleTier::from_event("MCC").unwrap();
        assert_eq!(tier.name(), "Silver");
        assert_eq!(tier.colors(), ("#c0c0c0", "#000"));
    }

    #[test]
    fn connector_url_encodes_name() {
        assert_eq!(
            connector_url("1.2.3.4", 9232, "Night & Day #1 (Pro-Am)"),
            "https://lonemeow.github.io/acc-connector/?hostname=1.2.3.4&port=9232\
             &name=Night%20%26%20Day%20%231%20(Pro-Am)&persistent=true"
        );
        assert!(connector_url("1.2.3.4", 9232, "Zolder ⚡")
            .ends_with("name=Zolder%20%E2%9A%A1&persistent=true"));
    }

    #[test]
    fn query_string_skips_nulls_and_encodes_objects() {
        let params = json!({ "track": "spa", "skip": null, "cars": [1, 2], "n": 3 });
        let query = query_string(params.as_object().unwrap()).unwrap();
        assert_eq!(query, "track=spa&cars=%5B1%2C2%5D&n=3");
    }

    #[test]
    fn steam_url() {
        assert_eq!(steam_launch_url(ACC_STEAM_APP_ID), "steam://rungameid/805550");
    }
}
