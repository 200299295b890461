use serde_json::json;

use crate::preset::PresetDocument;

/// Returns the stock ACC dedicated server configuration as a preset document.
///
/// Section order matches the order the server's cfg files are usually edited in.
pub fn preset_template() -> PresetDocument {
    let mut doc = PresetDocument::new();
    doc.insert("SETTINGS", settings());
    doc.insert("ASSIST", assist_rules());
    doc.insert("EVENT", event());
    doc.insert("EVENTRULES", event_rules());
    doc.insert("CONFIGURATION", configuration());
    doc.insert("ENTRYLIST", json!({ "entries": [], "forceEntryList": 0 }));
    doc.insert("BOP", json!({ "entries": [] }));
    doc
}

fn settings() -> serde_json::Value {
    json!({
        "serverName": "ACC Server (please edit settings.json)",
        "adminPassword": "",
        "password": "",
        "spectatorPassword": "",
        "centralEntryListPath": "",
        "carGroup": "FreeForAll",
        "trackMedalsRequirement": 0,
        "safetyRatingRequirement": -1,
        "racecraftRatingRequirement": -1,
        "maxCarSlots": 30,
        "isRaceLocked": 0,
        "isLockedPrepPhase": 0,
        "shortFormationLap": 0,
        "dumpLeaderboards": 0,
        "dumpEntryList": 0,
        "randomizeTrackWhenEmpty": 0,
        "allowAutoDQ": 0,
        "ignorePrematureDisconnects": 0,
        "formationLapType": 0,
        "configVersion": 1
    })
}

fn assist_rules() -> serde_json::Value {
    json!({
        "disableIdealLine": 0,
        "disableAutosteer": 0,
        "stabilityControlLevelMax": 100,
        "disableAutoPitLimiter": 0,
        "disableAutoGear": 0,
        "disableAutoClutch": 0,
        "disableAutoEngineStart": 0,
        "disableAutoWiper": 0,
        "disableAutoLights": 0
    })
}

fn event() -> serde_json::Value {
    json!({
        "ambientTemp": 22,
        "cloudLevel": 0.1,
        "configVersion": 1,
        "isFixedConditionQualification": 0,
        "postQualySeconds": 0,
        "postRaceSeconds": 0,
        "preRaceWaitingTimeSeconds": 80,
        "rain": 0.0,
        "sessionOverTimeSeconds": 120,
        "sessions": [
            {
                "dayOfWeekend": 2,
                "hourOfDay": 6,
                "sessionDurationMinutes": 10,
                "sessionType": "P",
                "timeMultiplier": 1
            },
            {
                "dayOfWeekend": 2,
                "hourOfDay": 12,
                "sessionDurationMinutes": 10,
                "sessionType": "Q",
                "timeMultiplier": 1
            },
            {
                "dayOfWeekend": 3,
                "hourOfDay": 18,
                "sessionDurationMinutes": 20,
                "sessionType": "R",
                "timeMultiplier": 2
            }
        ],
        "simracerWeatherConditions": 0,
        "track": "barcelona",
        "weatherRandomness": 1
    })
}

fn event_rules() -> serde_json::Value {
    json!({
        "qualifyStandingType": 1,
        "pitWindowLengthSec": -1,
        "driverStintTimeSec": -1,
        "mandatoryPitstopCount": 0,
        "maxTotalDrivingTime": -1,
        "maxDriversCount": 1,
        "tyreSetCount": 50,
        "isRefuellingAllowedInRace": false,
        "isRefuellingTimeFixed": false,
        "isMandatoryPitstopRefuellingRequired": false,
        "isMandatoryPitstopTyreChangeRequired": false,
        "isMandatoryPitstopSwapDriverRequired": false
    })
}

fn configuration() -> serde_json::Value {
    json!({
        "udpPort": 9231,
        "tcpPort": 9232,
        "maxConnections": 85,
        "lanDiscovery": 0,
        "registerToLobby": 0,
        "configVersion": 1
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::cfg_files::cfg_file_name;

    #[test]
    fn every_template_section_has_a_cfg_file() {
        let doc = preset_template();
        assert_eq!(doc.len(), 7);
        assert!(doc.names().all(|name| cfg_file_name(name).is_some()));
    }

    #[test]
    fn template_event_defaults_to_barcelona() {
        let doc = preset_template();
        assert_eq!(doc.get("EVENT").unwrap()["track"], "barcelona");
        assert_eq!(doc.get("EVENT").unwrap()["sessions"][2]["sessionType"], "R");
    }
}
