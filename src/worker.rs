//! Bridge between the UI thread and the async HTTP client. The UI pushes
//! [`Command`]s onto a bounded channel; a dedicated thread owning a tokio
//! runtime executes them one at a time and reports [`Event`]s back.

use std::thread;

use crossbeam_channel::{Receiver, Sender};
use log::{error, info, warn};

use crate::api::{ApiError, BroadcastApi};
use crate::models::{BroadcastRequest, Guild, GuildStats};

/// Requests issued by the UI thread.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    FetchGuilds,
    FetchStats { guild_id: u64, generation: u64 },
    SendBroadcast(BroadcastRequest),
}

/// Results delivered back to the UI thread.
#[derive(Debug, PartialEq, Eq)]
pub enum Event {
    GuildsLoaded(Vec<Guild>),
    GuildsFailed(String),
    StatsLoaded {
        guild_id: u64,
        generation: u64,
        stats: GuildStats,
    },
    BroadcastSent,
    BroadcastFailed(String),
}

pub fn spawn(api: BroadcastApi, cmd_rx: Receiver<Command>, event_tx: Sender<Event>) {
    thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .expect("Failed to build tokio runtime");

        runtime.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                if let Some(event) = handle(&api, cmd).await {
                    if event_tx.send(event).is_err() {
                        // UI side is gone.
                        return;
                    }
                }
            }
        });
    });
}

async fn handle(api: &BroadcastApi, cmd: Command) -> Option<Event> {
    match cmd {
        Command::FetchGuilds => match api.list_guilds().await {
            Ok(guilds) => {
                info!("Fetched {} guilds", guilds.len());
                Some(Event::GuildsLoaded(guilds))
            }
            Err(e) => {
                error!("Error fetching guilds: {}", e);
                Some(Event::GuildsFailed(e.to_string()))
            }
        },
        Command::FetchStats {
            guild_id,
            generation,
        } => match api.guild_stats(guild_id).await {
            Ok(stats) => Some(Event::StatsLoaded {
                guild_id,
                generation,
                stats,
            }),
            Err(e) => {
                // Stats are supplementary; the failure stays out of the UI.
                warn!("Error fetching stats for guild {}: {}", guild_id, e);
                None
            }
        },
        Command::SendBroadcast(request) => match api.send_broadcast(&request).await {
            Ok(()) => {
                info!("Broadcast accepted for guild {}", request.guild_id);
                Some(Event::BroadcastSent)
            }
            Err(ApiError::Rejected(reason)) => Some(Event::BroadcastFailed(reason)),
            Err(e) => {
                error!("Error sending broadcast: {}", e);
                Some(Event::BroadcastFailed(
                    "Failed to reach the broadcast backend".to_string(),
                ))
            }
        },
    }
}
