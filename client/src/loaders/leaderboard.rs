use leptos::prelude::*;

use fleetdash_shared::format::group_thousands;
use fleetdash_shared::{LeaderboardEntry, LeaderboardKind};

use crate::api::ApiClient;
use crate::loaders::{DashboardData, spawn_load};

pub fn load_leaderboard(api: ApiClient, data: DashboardData, kind: LeaderboardKind) {
    spawn_load(data.leaderboard, "leaderboard", async move {
        api.leaderboard(kind).await.map(|entries| (kind, entries))
    });
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardRow {
    pub rank: u32,
    pub rank_class: Option<&'static str>,
    pub player: String,
    /// Ship name and "Tier N", present only for boards that show ships.
    pub ship: Option<(String, String)>,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardTable {
    pub headers: Vec<&'static str>,
    pub rows: Vec<LeaderboardRow>,
}

impl LeaderboardTable {
    pub fn build(kind: LeaderboardKind, entries: &[LeaderboardEntry]) -> Self {
        let mut headers = vec!["Rank", "Player"];
        if kind.shows_ship() {
            headers.extend(["Ship", "Tier"]);
        }
        headers.push(kind.value_label());

        let rows = entries
            .iter()
            .map(|entry| LeaderboardRow {
                rank: entry.rank,
                rank_class: entry.rank_class(),
                player: entry.player.clone(),
                ship: kind.shows_ship().then(|| {
                    let tier = entry.tier.map_or_else(|| "-".to_string(), |t| format!("Tier {t}"));
                    (entry.ship.clone().unwrap_or_default(), tier)
                }),
                value: kind
                    .value_of(entry)
                    .map_or_else(|| "-".to_string(), group_thousands),
            })
            .collect();

        Self { headers, rows }
    }
}

#[component]
pub fn LeaderboardView() -> impl IntoView {
    let data: DashboardData = expect_context();
    let board = data.leaderboard.value();

    view! {
        <div id="leaderboard-content">
            {move || {
                let Some(table) = board
                    .with(|b| b.as_ref().map(|(kind, entries)| LeaderboardTable::build(*kind, entries)))
                else {
                    return ().into_any();
                };
                view! {
                    <table class="leaderboard-table">
                        <thead>
                            <tr>
                                {table
                                    .headers
                                    .into_iter()
                                    .map(|h| view! { <th>{h}</th> })
                                    .collect_view()}
                            </tr>
                        </thead>
                        <tbody>
                            {table
                                .rows
                                .into_iter()
                                .map(|row| {
                                    let badge = match row.rank_class {
                                        Some(class) => format!("rank-badge {class}"),
                                        None => "rank-badge".to_string(),
                                    };
                                    view! {
                                        <tr>
                                            <td><span class=badge>{row.rank}</span></td>
                                            <td>{row.player}</td>
                                            {row.ship.map(|(ship, tier)| view! {
                                                <td>{ship}</td>
                                                <td>{tier}</td>
                                            })}
                                            <td class="leaderboard-value">{row.value}</td>
                                        </tr>
                                    }
                                })
                                .collect_view()}
                        </tbody>
                    </table>
                }
                .into_any()
            }}
        </div>
    }
}
