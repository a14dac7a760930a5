use serde::{Serialize, Deserialize};
use strum_macros::EnumIter;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Guild {
    /// Guild ID
    pub id: u64,
    pub name: String,
    pub member_count: u64,
}

/// Presence snapshot for one guild at fetch time. The backend is expected to
/// keep `online_members + offline_members == total_members`; the client does
/// not enforce it.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuildStats {
    pub total_members: u64,
    pub online_members: u64,
    pub offline_members: u64,
}

/// Audience filter for a broadcast.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum TargetGroup {
    All,
    Online,
    Offline,
}

impl Default for TargetGroup {
    fn default() -> Self {
        TargetGroup::All
    }
}

impl TargetGroup {
    pub fn label(self) -> &'static str {
        match self {
            TargetGroup::All => "All members",
            TargetGroup::Online => "Online members only",
            TargetGroup::Offline => "Offline members only",
        }
    }
}

/// Body of `POST /api/broadcast/send`. Built at submit time, sent once.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct BroadcastRequest {
    pub guild_id: u64,
    pub target_group: TargetGroup,
    pub message: String,
}

/// Envelope returned by `GET /api/broadcast/guilds`.
#[derive(Deserialize, Debug)]
pub struct GuildList {
    pub guilds: Vec<Guild>,
}
