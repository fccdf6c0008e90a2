use leptos::prelude::*;

use fleetdash_shared::Tournament;

use crate::api::ApiClient;
use crate::loaders::{DashboardData, spawn_load};

pub const EMPTY_TOURNAMENTS_MESSAGE: &str = "No tournaments available.";

pub fn load_tournaments(api: ApiClient, data: DashboardData) {
    spawn_load(data.tournaments, "tournaments", async move {
        api.tournaments().await
    });
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TournamentCard {
    pub name: String,
    pub status: String,
    pub active: bool,
    pub participants: usize,
}

impl From<&Tournament> for TournamentCard {
    fn from(t: &Tournament) -> Self {
        Self {
            name: t.name.clone(),
            status: t.status.clone(),
            active: t.is_active(),
            participants: t.participant_count(),
        }
    }
}

#[component]
pub fn TournamentsView() -> impl IntoView {
    let data: DashboardData = expect_context();
    let tournaments = data.tournaments.value();

    view! {
        <div id="tournament-list">
            {move || {
                let Some(cards) = tournaments
                    .with(|t| t.as_ref().map(|t| t.iter().map(TournamentCard::from).collect::<Vec<_>>()))
                else {
                    return ().into_any();
                };
                if cards.is_empty() {
                    return view! { <p class="text-gray">{EMPTY_TOURNAMENTS_MESSAGE}</p> }.into_any();
                }
                cards
                    .into_iter()
                    .map(|card| {
                        let status_class = if card.active {
                            "tournament-status active"
                        } else {
                            "tournament-status"
                        };
                        view! {
                            <div class="stat-card tournament-card">
                                <h3>{card.name}</h3>
                                <p class="text-gray">
                                    "Status: " <span class=status_class>{card.status}</span>
                                </p>
                                <p class="text-gray">"Participants: " {card.participants}</p>
                            </div>
                        }
                    })
                    .collect_view()
                    .into_any()
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn card_counts_participants_and_flags_active() {
        let tournament: Tournament = serde_json::from_value(json!({
            "name": "Spring Cup",
            "status": "active",
            "participants": [{ "id": 1 }, { "id": 2 }, { "id": 3 }]
        }))
        .unwrap();
        let card = TournamentCard::from(&tournament);
        assert!(card.active);
        assert_eq!(card.participants, 3);
        assert_eq!(card.status, "active");
    }

    #[test]
    fn empty_list_message() {
        assert_eq!(EMPTY_TOURNAMENTS_MESSAGE, "No tournaments available.");
    }

    #[test]
    fn finished_tournament_is_not_highlighted() {
        let tournament: Tournament = serde_json::from_value(json!({
            "name": "Winter Cup",
            "status": "finished",
            "participants": []
        }))
        .unwrap();
        let card = TournamentCard::from(&tournament);
        assert!(!card.active);
        assert_eq!(card.participants, 0);
    }
}
