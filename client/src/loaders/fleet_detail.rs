use leptos::prelude::*;
use wasm_bindgen::JsCast;

use fleetdash_shared::format::{format_join_date, group_thousands};
use fleetdash_shared::{FleetDetail, MemberActions, Role};

use crate::actions::{promote_member, remove_member};
use crate::loaders::{DashboardData, spawn_load};
use crate::session::Session;

const PANEL_ID: &str = "fleet-details";

pub fn load_fleet_details(session: Session, data: DashboardData, fleet_id: i64) {
    let api = session.api();
    let token = session.token_untracked();
    spawn_load(data.fleet_detail, "fleet details", async move {
        api.fleet(token.as_deref(), fleet_id).await
    });
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterRow {
    pub member_id: i64,
    pub username: String,
    pub role: Role,
    pub join_date: String,
    pub actions: MemberActions,
}

/// Everything the management panel shows for one fleet and one viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    pub fleet_id: i64,
    pub title: String,
    pub member_count: String,
    pub record_count: String,
    pub total_points: String,
    pub show_actions_column: bool,
    pub rows: Vec<RosterRow>,
}

impl Roster {
    pub fn build(detail: &FleetDetail, viewer_key: Option<&str>) -> Self {
        let commander = detail.viewer_is_commander(viewer_key);
        let rows = detail
            .members
            .iter()
            .map(|member| RosterRow {
                member_id: member.id,
                username: member.username.clone(),
                role: member.role.clone(),
                join_date: format_join_date(member.join_date.as_deref()),
                actions: MemberActions::for_member(commander, member),
            })
            .collect();
        Self {
            fleet_id: detail.id,
            title: format!("{} Management", detail.name),
            member_count: detail.stats.member_count.to_string(),
            record_count: detail.stats.record_count.to_string(),
            total_points: group_thousands(detail.stats.total_points),
            show_actions_column: commander,
            rows,
        }
    }
}

fn scroll_panel_into_view() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Some(panel) = document
        .get_element_by_id(PANEL_ID)
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
    else {
        return;
    };
    let options = web_sys::ScrollIntoViewOptions::new();
    options.set_behavior(web_sys::ScrollBehavior::Smooth);
    panel.scroll_into_view_with_scroll_into_view_options(&options);
}

#[component]
pub fn FleetDetailPanel() -> impl IntoView {
    let data: DashboardData = expect_context();
    let session: Session = expect_context();
    let detail = data.fleet_detail.value();

    let roster = Memo::new(move |_| {
        let viewer_key = session.user_key_untracked();
        detail.with(|d| d.as_ref().map(|d| Roster::build(d, viewer_key.as_deref())))
    });

    Effect::new(move || {
        if roster.with(Option::is_some) {
            scroll_panel_into_view();
        }
    });

    view! {
        {move || {
            let Some(roster) = roster.get() else {
                return view! { <div id=PANEL_ID class="fleet-details hidden" /> }.into_any();
            };
            let fleet_id = roster.fleet_id;
            let show_actions = roster.show_actions_column;
            view! {
                <div id=PANEL_ID class="fleet-details">
                    <div class="fleet-management-header">
                        <h3>{roster.title}</h3>
                        <button class="btn-secondary" on:click=move |_| data.fleet_detail.reset()>
                            "Close"
                        </button>
                    </div>

                    <div class="stats-grid">
                        <div class="stat-card">
                            <div class="stat-icon">{"\u{1F465}"}</div>
                            <div class="stat-value">{roster.member_count}</div>
                            <div class="stat-label">"Members"</div>
                        </div>
                        <div class="stat-card">
                            <div class="stat-icon">{"\u{1F3AF}"}</div>
                            <div class="stat-value">{roster.record_count}</div>
                            <div class="stat-label">"Records"</div>
                        </div>
                        <div class="stat-card">
                            <div class="stat-icon">{"\u{1F48E}"}</div>
                            <div class="stat-value">{roster.total_points}</div>
                            <div class="stat-label">"Total Points"</div>
                        </div>
                    </div>

                    <h4 class="members-heading">"Fleet Members"</h4>
                    <table class="members-table">
                        <thead>
                            <tr>
                                <th>"Member"</th>
                                <th>"Role"</th>
                                <th>"Join Date"</th>
                                {show_actions.then(|| view! { <th>"Actions"</th> })}
                            </tr>
                        </thead>
                        <tbody>
                            {roster
                                .rows
                                .into_iter()
                                .map(|row| view! { <RosterRowView fleet_id row /> })
                                .collect_view()}
                        </tbody>
                    </table>
                </div>
            }
            .into_any()
        }}
    }
}

#[component]
fn RosterRowView(fleet_id: i64, row: RosterRow) -> impl IntoView {
    let session: Session = expect_context();
    let data: DashboardData = expect_context();
    let actions = match row.actions {
        MemberActions::Absent => ().into_any(),
        MemberActions::Protected => view! { <td>"-"</td> }.into_any(),
        MemberActions::Manage => {
            let member_id = row.member_id;
            let role = row.role.clone();
            let promote_name = row.username.clone();
            let remove_name = row.username.clone();
            view! {
                <td class="member-actions">
                    <button
                        class="btn-sm btn-promote"
                        on:click=move |_| {
                            promote_member(session, data, fleet_id, member_id, role.clone(), promote_name.clone())
                        }
                    >
                        "Promote"
                    </button>
                    <button
                        class="btn-sm btn-remove"
                        on:click=move |_| remove_member(session, data, fleet_id, member_id, remove_name.clone())
                    >
                        "Remove"
                    </button>
                </td>
            }
            .into_any()
        }
    };

    view! {
        <tr>
            <td>{row.username}</td>
            <td><span class="user-role-badge">{row.role.to_string()}</span></td>
            <td>{row.join_date}</td>
            {actions}
        </tr>
    }
}
