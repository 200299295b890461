//! Command-line surface. Each subcommand module turns parsed arguments into
//! calls on the library and returns an [`Output`].

use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand};
use serde_json::Value;

use crate::data::Translations;
use crate::error::{ConsoleError, Result};

pub mod bop;
pub mod catalog;
pub mod config;
pub mod logs;
pub mod preset;
pub mod server;
pub mod settings;
pub mod update;

use config::{Store, StoreOrigin};

#[derive(Parser)]
#[command(name = "acc-console")]
#[command(version)]
#[command(about = "Preset, BOP and server tooling for ACC dedicated servers")]
pub struct Cli {
    /// Data directory holding the store, logs and locale files
    #[arg(long, global = true, env = "ACC_CONSOLE_HOME")]
    pub home: Option<String>,

    /// Output in JSON format for machine parsing
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose logging (repeat for more)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Do not write a session log file
    #[arg(long, global = true)]
    pub no_log_file: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Preset text, server cfg files and share codes
    #[command(subcommand)]
    Preset(preset::PresetCommands),

    /// Balance-of-performance feed
    #[command(subcommand)]
    Bop(bop::BopCommands),

    /// List tracks, favourites first
    Tracks,

    /// List cars of a group, favourites and competitive cars first
    Cars {
        #[arg(long, default_value = "GT3")]
        group: crate::data::CarGroup,
    },

    /// Show or change console settings
    #[command(subcommand)]
    Settings(settings::SettingsCommands),

    /// Server list helpers
    #[command(subcommand)]
    Server(server::ServerCommands),

    /// Check for a newer release
    Update {
        /// Update metadata URL
        #[arg(long, env = "ACC_CONSOLE_UPDATE_URL")]
        url: String,
    },
}

/// Result of a command, rendered as text or JSON.
#[derive(Debug)]
pub enum Output {
    Text(String),
    Json(Value),
    None,
}

impl Output {
    pub fn print(&self, json: bool) {
        match self {
            Output::Text(text) if json => println!("{}", Value::String(text.clone())),
            Output::Text(text) => println!("{text}"),
            Output::Json(value) => println!(
                "{}",
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            ),
            Output::None => {}
        }
    }
}

/// State shared by all commands for one invocation.
pub struct Context {
    pub home: PathBuf,
    pub store: Store,
    pub translations: Translations,
    pub store_origin: StoreOrigin,
    /// Set when a command changed the store and it must be saved.
    pub dirty: bool,
    /// Set by `settings reset`; allows replacing a store file that failed to load.
    pub replace_unreadable: bool,
}

impl Context {
    pub fn load(home: &Path) -> Context {
        let (store, store_origin) = Store::load(&config::store_path(home));
        let locale = home
            .join("locales")
            .join(format!("{}.json", store.settings.general.lang.code()));
        Context {
            home: home.to_path_buf(),
            translations: Translations::load(&locale),
            store,
            store_origin,
            dirty: false,
            replace_unreadable: false,
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = config::store_path(&self.home);
        if self.store_origin == StoreOrigin::Unreadable && !self.replace_unreadable {
            return Err(ConsoleError::Custom(format!(
                "{} could not be read, leaving it untouched (fix it or run `settings reset`)",
                path.display()
            )));
        }
        self.store.save(&path)
    }
}

pub async fn dispatch(command: Commands, ctx: &mut Context) -> Result<Output> {
    match command {
        Commands::Preset(cmd) => preset::run(cmd).await,
        Commands::Bop(cmd) => bop::run(cmd).await,
        Commands::Tracks => Ok(catalog::list_tracks(ctx)),
        Commands::Cars { group } => Ok(catalog::list_cars(ctx, group)),
        Commands::Settings(cmd) => settings::run(cmd, ctx),
        Commands::Server(cmd) => server::run(cmd),
        Commands::Update { url } => Ok(update_command(&url, ctx).await),
    }
}

async fn update_command(url: &str, ctx: &mut Context) -> Output {
    let Some(info) = update::fetch_update_info(url, &update::StderrNotifier).await else {
        return Output::Text("No update available.".into());
    };

    let mut lines = Vec::new();
    if info.is_newer_than(env!("CARGO_PKG_VERSION")) {
        lines.push(format!(
            "acc-console {} is available (you have {}).",
            info.version,
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(url) = &info.url {
            lines.push(format!("Download: {url}"));
        }
        if let Some(notes) = &info.notes {
            lines.push(notes.clone());
        }
    } else {
        lines.push("acc-console is up to date.".into());
    }

    if let Some(message) = update::pending_message(&info, &mut ctx.store) {
        ctx.dirty = true;
        lines.push(format!("Announcement: {message}"));
    }

    Output::Text(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreadable_store_is_not_overwritten() {
        let home = tempfile::tempdir().unwrap();
        let path = config::store_path(home.path());
        std::fs::write(&path, "{ not json").unwrap();

        let mut ctx = Context::load(home.path());
        assert_eq!(ctx.store_origin, StoreOrigin::Unreadable);
        ctx.store.toggle_fav_track("spa");
        assert!(ctx.save().is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");

        ctx.replace_unreadable = true;
        ctx.save().unwrap();
        assert_eq!(Store::load(&path).0.general.fav_tracks, ["spa"]);
    }

    #[test]
    fn missing_store_is_created_on_save() {
        let home = tempfile::tempdir().unwrap();
        let mut ctx = Context::load(&home.path().join("fresh"));
        assert_eq!(ctx.store_origin, StoreOrigin::Missing);
        ctx.store.toggle_fav_track("monza");
        ctx.save().unwrap();
        assert!(config::store_path(&home.path().join("fresh")).exists());
    }
}
