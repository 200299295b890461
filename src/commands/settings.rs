use clap::Subcommand;

use super::config::{DarkMode, DisplayMode, Lang};
use super::{Context, Output};
use crate::data::{get_car_by_key, get_track, TrackColumn};
use crate::error::{ConsoleError, Result};

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Print the stored settings
    Show,

    /// Change one or more settings
    Set {
        #[arg(long)]
        lang: Option<Lang>,
        /// light, auto or dark
        #[arg(long)]
        dark_mode: Option<DarkMode>,
        #[arg(long)]
        theme_color: Option<String>,
        /// full, short or local
        #[arg(long)]
        car_display: Option<DisplayMode>,
        /// full, short or local
        #[arg(long)]
        track_display: Option<DisplayMode>,
        #[arg(long)]
        server_down_msg: Option<String>,
        #[arg(long)]
        list_view: Option<bool>,
    },

    /// Toggle a favourite track
    FavTrack { track: String },

    /// Toggle a favourite car
    FavCar { car: String },

    /// Restore every setting to its default
    Reset,
}

pub fn run(cmd: SettingsCommands, ctx: &mut Context) -> Result<Output> {
    match cmd {
        SettingsCommands::Show => Ok(Output::Json(serde_json::to_value(&ctx.store)?)),
        SettingsCommands::Set {
            lang,
            dark_mode,
            theme_color,
            car_display,
            track_display,
            server_down_msg,
            list_view,
        } => {
            let settings = &mut ctx.store.settings;
            if let Some(lang) = lang {
                settings.general.lang = lang;
            }
            if let Some(mode) = dark_mode {
                settings.general.dark_mode = mode;
            }
            if let Some(color) = theme_color {
                settings.general.theme_color = color;
            }
            if let Some(mode) = car_display {
                settings.setup.car_display = mode;
            }
            if let Some(mode) = track_display {
                settings.setup.track_display = mode;
            }
            if let Some(msg) = server_down_msg {
                settings.status.server_down_msg = msg;
            }
            if let Some(list_view) = list_view {
                ctx.store.servers.list_view = list_view;
            }
            ctx.dirty = true;
            Ok(Output::Json(serde_json::to_value(&ctx.store.settings)?))
        }
        SettingsCommands::FavTrack { track } => {
            let track = get_track(&track, TrackColumn::Id)
                .ok_or_else(|| ConsoleError::Custom(format!("Unknown track '{track}'")))?;
            let fav = ctx.store.toggle_fav_track(track.id);
            ctx.dirty = true;
            Ok(Output::Text(favourite_line(track.id, fav)))
        }
        SettingsCommands::FavCar { car } => {
            let (group, car) = get_car_by_key(&car)
                .ok_or_else(|| ConsoleError::Custom(format!("Unknown car '{car}'")))?;
            let fav = ctx.store.toggle_fav_car(group, car.key);
            ctx.dirty = true;
            Ok(Output::Text(favourite_line(car.key, fav)))
        }
        SettingsCommands::Reset => {
            ctx.store.reset();
            ctx.dirty = true;
            ctx.replace_unreadable = true;
            Ok(Output::Text("Settings restored to defaults.".into()))
        }
    }
}

fn favourite_line(key: &str, fav: bool) -> String {
    if fav {
        format!("{key} added to favourites")
    } else {
        format!("{key} removed from favourites")
    }
}
