use leptos::prelude::*;

use fleetdash_shared::OverviewStats;

use crate::api::ApiClient;
use crate::loaders::{DashboardData, spawn_load};

pub fn load_overview(api: ApiClient, data: DashboardData) {
    spawn_load(data.overview, "overview", async move { api.overview().await });
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counter {
    pub id: &'static str,
    pub icon: &'static str,
    pub label: &'static str,
    pub value: String,
}

/// The four aggregate counters, in display order.
pub fn counters(stats: Option<&OverviewStats>) -> [Counter; 4] {
    let show = |value: Option<u64>| value.map_or_else(|| "-".to_string(), |v| v.to_string());
    [
        Counter {
            id: "total-fleets",
            icon: "\u{1F6A2}",
            label: "Fleets",
            value: show(stats.map(|s| s.total_fleets)),
        },
        Counter {
            id: "total-members",
            icon: "\u{1F465}",
            label: "Members",
            value: show(stats.map(|s| s.total_members)),
        },
        Counter {
            id: "total-records",
            icon: "\u{1F3AF}",
            label: "Records",
            value: show(stats.map(|s| s.total_records)),
        },
        Counter {
            id: "total-ships",
            icon: "\u{2693}",
            label: "Ships",
            value: show(stats.map(|s| s.total_ships)),
        },
    ]
}

#[component]
pub fn OverviewView() -> impl IntoView {
    let data: DashboardData = expect_context();
    let stats = data.overview.value();

    view! {
        <div class="stats-grid">
            {move || {
                stats
                    .with(|stats| counters(stats.as_ref()))
                    .into_iter()
                    .map(|counter| {
                        view! {
                            <div class="stat-card">
                                <div class="stat-icon">{counter.icon}</div>
                                <div class="stat-value" id=counter.id>{counter.value}</div>
                                <div class="stat-label">{counter.label}</div>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
