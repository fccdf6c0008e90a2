//! Request and response bodies of the fleet API, and the paths they live at.
//! Paths are relative to the API base (`/api` in production).

use serde::{Deserialize, Serialize};

use crate::fleet::{FleetDetail, FleetSummary, Role};
use crate::identity::UserIdentity;
use crate::leaderboard::{LeaderboardEntry, LeaderboardKind};
use crate::stats::{OverviewStats, Tournament};

pub const AUTH_LOGIN_URL_PATH: &str = "/auth/discord/url";
pub const AUTH_VERIFY_PATH: &str = "/auth/verify";
pub const STATS_OVERVIEW_PATH: &str = "/stats/overview";
pub const FLEETS_PATH: &str = "/fleets";
pub const TOURNAMENTS_PATH: &str = "/tournaments";

pub fn fleet_path(fleet_id: i64) -> String {
    format!("{FLEETS_PATH}/{fleet_id}")
}

pub fn promote_path(fleet_id: i64) -> String {
    format!("{FLEETS_PATH}/{fleet_id}/promote")
}

pub fn remove_member_path(fleet_id: i64) -> String {
    format!("{FLEETS_PATH}/{fleet_id}/remove-member")
}

pub fn leaderboard_path(kind: LeaderboardKind) -> String {
    format!("/leaderboards/{}", kind.as_str())
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginUrlResponse {
    pub auth_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerifyResponse {
    pub user: UserIdentity,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OverviewResponse {
    pub stats: OverviewStats,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FleetsResponse {
    #[serde(default)]
    pub fleets: Vec<FleetSummary>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FleetResponse {
    pub fleet: FleetDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeaderboardResponse {
    #[serde(default)]
    pub leaderboard: Vec<LeaderboardEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TournamentsResponse {
    #[serde(default)]
    pub tournaments: Vec<Tournament>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromoteRequest {
    pub member_id: i64,
    pub new_role: Role,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemoveMemberRequest {
    pub member_id: i64,
}

/// Body the server attaches to failed requests.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
