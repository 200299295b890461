use clap::Subcommand;
use serde_json::json;

use super::Output;
use crate::error::Result;
use crate::servers::{self, HipoleTier};

#[derive(Subcommand)]
pub enum ServerCommands {
    /// Detect the HiPole event tier of a server name
    Classify { name: String },

    /// Print the acc-connector URL for a server
    Connect {
        ip: String,
        tcp_port: u16,
        name: String,
    },

    /// Print the Steam URL that launches ACC
    Launch {
        #[arg(long, default_value = servers::ACC_STEAM_APP_ID)]
        app_id: String,
    },
}

pub fn run(cmd: ServerCommands) -> Result<Output> {
    match cmd {
        ServerCommands::Classify { name } => {
            let classified = servers::hipole_event(&name).and_then(|code| {
                HipoleTier::from_event(code).map(|tier| {
                    let (background, foreground) = tier.colors();
                    json!({
                        "event": code,
                        "tier": tier.name(),
                        "background": background,
                        "foreground": foreground,
                    })
                })
            });
            Ok(Output::Json(classified.unwrap_or_default()))
        }
        ServerCommands::Connect { ip, tcp_port, name } => {
            Ok(Output::Text(servers::connector_url(&ip, tcp_port, &name)))
        }
        ServerCommands::Launch { app_id } => Ok(Output::Text(servers::steam_launch_url(&app_id))),
    }
}
