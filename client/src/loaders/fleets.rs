use leptos::prelude::*;

use fleetdash_shared::FleetSummary;
use fleetdash_shared::colors::placeholder_logo;

use crate::loaders::fleet_detail::{FleetDetailPanel, load_fleet_details};
use crate::loaders::{DashboardData, spawn_load};
use crate::session::Session;

pub const EMPTY_FLEETS_MESSAGE: &str = "You are not a member of any fleet yet.";

pub fn load_user_fleets(session: Session, data: DashboardData) {
    let api = session.api();
    let token = session.token_untracked();
    spawn_load(data.fleets, "fleets", async move {
        api.user_fleets(token.as_deref()).await
    });
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FleetCard {
    pub id: i64,
    pub name: String,
    pub tag: String,
    pub logo_src: String,
    pub description: String,
    pub user_role: String,
    pub member_count: u64,
}

impl FleetCard {
    pub fn from_summary(fleet: &FleetSummary) -> Self {
        let logo_src = fleet
            .logo_url
            .clone()
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| placeholder_logo(&fleet.tag));
        let description = fleet
            .description
            .clone()
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| "No description".to_string());
        Self {
            id: fleet.id,
            name: fleet.name.clone(),
            tag: fleet.tag.clone(),
            logo_src,
            description,
            user_role: fleet.user_role.to_string(),
            member_count: fleet.member_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FleetList {
    Loading,
    Empty,
    Cards(Vec<FleetCard>),
}

impl FleetList {
    pub fn build(fleets: Option<&[FleetSummary]>) -> Self {
        match fleets {
            None => Self::Loading,
            Some([]) => Self::Empty,
            Some(fleets) => Self::Cards(fleets.iter().map(FleetCard::from_summary).collect()),
        }
    }
}

#[component]
pub fn FleetsView() -> impl IntoView {
    let data: DashboardData = expect_context();
    let session: Session = expect_context();
    let fleets = data.fleets.value();

    view! {
        <div class="fleet-list" id="fleet-list">
            {move || match fleets.with(|f| FleetList::build(f.as_deref())) {
                FleetList::Loading => ().into_any(),
                FleetList::Empty => view! {
                    <p class="text-gray">{EMPTY_FLEETS_MESSAGE}</p>
                }
                .into_any(),
                FleetList::Cards(cards) => cards
                    .into_iter()
                    .map(|card| {
                        let fleet_id = card.id;
                        view! {
                            <div
                                class="fleet-card"
                                on:click=move |_| load_fleet_details(session, data, fleet_id)
                            >
                                <div class="fleet-header">
                                    <img src=card.logo_src class="fleet-logo" alt=card.name.clone() />
                                    <div class="fleet-info">
                                        <h3>{card.name}</h3>
                                        <div class="fleet-tag">"[" {card.tag} "]"</div>
                                    </div>
                                </div>
                                <p class="fleet-description">{card.description}</p>
                                <div class="user-role-badge">{card.user_role}</div>
                                <div class="fleet-stats">
                                    <div class="fleet-stat">
                                        <div class="fleet-stat-value">{card.member_count}</div>
                                        <div class="fleet-stat-label">"Members"</div>
                                    </div>
                                </div>
                            </div>
                        }
                    })
                    .collect_view()
                    .into_any(),
            }}
        </div>
        <FleetDetailPanel />
    }
}
