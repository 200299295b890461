use serde_json::json;

use super::{Context, Output};
use crate::data::{self, CarGroup};

pub fn list_tracks(ctx: &Context) -> Output {
    let setup = &ctx.store.settings.setup;
    let favs = &ctx.store.general.fav_tracks;

    let rows: Vec<_> = data::sort_tracks(&ctx.store, &ctx.translations)
        .into_iter()
        .map(|track| {
            json!({
                "id": track.id,
                "name": data::track_display(track, setup, &ctx.translations),
                "favourite": favs.iter().any(|id| id == track.id),
            })
        })
        .collect();

    Output::Json(json!(rows))
}

pub fn list_cars(ctx: &Context, group: CarGroup) -> Output {
    let setup = &ctx.store.settings.setup;
    let favs = ctx.store.general.fav_cars.group(group);

    let rows: Vec<_> = data::sort_cars(group, &ctx.store, &ctx.translations)
        .into_iter()
        .map(|car| {
            json!({
                "key": car.key,
                "id": car.id,
                "name": data::car_display(car, setup, &ctx.translations),
                "competitive": car.competitive,
                "favourite": favs.iter().any(|k| k == car.key),
            })
        })
        .collect();

    Output::Json(json!(rows))
}
