use acc_console_lib::bop::{reshape, BopData, BopRecord, CarModel};
use acc_console_lib::preset::{decode, encode};
use acc_console_lib::templates::preset_template;
use serde_json::{json, Number, Value};

fn records(value: Value) -> Vec<BopRecord> {
    serde_json::from_value(value).expect("valid feed")
}

#[test]
fn unknown_track_keeps_gt3_before_gt4() {
    let data = reshape(&records(json!([
        { "track_name": "X", "bop": {
            "GT3": [ { "car_model": "A", "ballast": 1, "restrictor": 0 } ],
            "GT4": [ { "car_model": "B", "ballast": 2, "restrictor": 1 } ]
        } }
    ])));

    assert_eq!(data.entries.len(), 2);
    assert!(data.entries.iter().all(|e| e.track.is_none()));
    assert_eq!(data.entries[0].car_model, CarModel::Name("A".into()));
    assert_eq!(data.entries[0].ballast_kg, Number::from(1));
    assert_eq!(data.entries[0].restrictor, Number::from(0));
    assert_eq!(data.entries[1].car_model, CarModel::Name("B".into()));
    assert_eq!(data.entries[1].ballast_kg, Number::from(2));
    assert_eq!(data.entries[1].restrictor, Number::from(1));
}

#[test]
fn empty_feed_gives_no_entries() {
    assert_eq!(reshape(&[]), BopData::default());
    assert_eq!(reshape(&[]).to_section().unwrap(), json!({ "entries": [] }));
}

#[test]
fn records_are_flattened_in_input_order() {
    let data = reshape(&records(json!([
        { "track_name": "Monza", "bop": {
            "GT4": [ { "car_model": 50, "ballast": 0, "restrictor": 3 } ],
            "GT3": [
                { "car_model": 30, "ballast": 10, "restrictor": 0 },
                { "car_model": 32, "ballast": 5, "restrictor": 0 }
            ]
        } },
        { "track_name": "Kyalami", "bop": {
            "GT3": [ { "car_model": 30, "ballast": -5, "restrictor": 0 } ]
        } }
    ])));

    let flat: Vec<(Option<&str>, &CarModel)> = data
        .entries
        .iter()
        .map(|e| (e.track.as_deref(), &e.car_model))
        .collect();
    assert_eq!(
        flat,
        vec![
            (Some("monza"), &CarModel::Id(30)),
            (Some("monza"), &CarModel::Id(32)),
            (Some("monza"), &CarModel::Id(50)),
            (Some("kyalami"), &CarModel::Id(30)),
        ]
    );
}

#[test]
fn reshaped_entries_land_in_preset_bop_section() {
    let data = reshape(&records(json!([
        { "track_name": "Zandvoort", "bop": {
            "GT3": [ { "car_model": 34, "ballast": 7, "restrictor": 0 } ]
        } }
    ])));

    let mut doc = preset_template();
    data.apply_to(&mut doc).unwrap();

    let decoded = decode(&encode(&doc));
    assert_eq!(
        decoded.get("BOP"),
        Some(&json!({ "entries": [
            { "track": "zandvoort", "carModel": 34, "ballastKg": 7, "restrictor": 0 }
        ] }))
    );
    assert_eq!(decoded.names().last(), Some("BOP"));
}
