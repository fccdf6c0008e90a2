use leptos::prelude::*;

use fleetdash_shared::{LeaderboardKind, View};

use crate::api::ApiClient;
use crate::auth::{self, AuthOutcome, AuthPhase, LoginPhase};
use crate::config;
use crate::loaders::DashboardData;
use crate::loaders::fleets::FleetsView;
use crate::loaders::leaderboard::LeaderboardView;
use crate::loaders::overview::OverviewView;
use crate::loaders::tournaments::TournamentsView;
use crate::router::Router;
use crate::session::{Page, Session};

fn remove_loading_shell() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if let Some(shell) = document.get_element_by_id("app-loading-shell") {
        shell.remove();
    }
}

fn menu_icon(view: View) -> &'static str {
    match view {
        View::Overview => "\u{1F4CA}",
        View::Fleets => "\u{1F6A2}",
        View::Leaderboards => "\u{1F3C6}",
        View::Tournaments => "\u{2694}\u{FE0F}",
    }
}

/// Short status line under the login button.
fn login_hint(phase: AuthPhase) -> Option<&'static str> {
    match phase {
        AuthPhase::AwaitingExternalLogin => Some("Complete the login in the Discord window."),
        AuthPhase::Resolved(AuthOutcome::Cancelled) => Some("Login was cancelled."),
        AuthPhase::Idle | AuthPhase::Resolved(AuthOutcome::Success | AuthOutcome::Failed) => None,
    }
}

#[component]
pub fn App() -> impl IntoView {
    let api = ApiClient::new(config::api_base_url());
    let session = Session::new(api);
    let data = DashboardData::new();
    let router = Router::new(session, data);
    let phase = LoginPhase(RwSignal::new(AuthPhase::default()));

    provide_context(session);
    provide_context(data);
    provide_context(router);
    provide_context(phase);

    log::info!("api base: {}", config::api_base_url());
    session.restore();
    remove_loading_shell();

    let page = Memo::new(move |_| session.page().get());

    view! {
        {move || match page.get() {
            Page::Restoring => view! {
                <div class="page active loading-page">
                    <div class="spinner" />
                </div>
            }
            .into_any(),
            Page::Login => view! { <LoginPage /> }.into_any(),
            Page::Dashboard => view! { <DashboardPage /> }.into_any(),
        }}
    }
}

#[component]
fn LoginPage() -> impl IntoView {
    let session: Session = expect_context();
    let LoginPhase(phase) = expect_context();

    view! {
        <div id="login-page" class="page active">
            <div class="login-container">
                <h1>"Fleet Dashboard"</h1>
                <p class="text-gray">"Manage your fleet, track records and follow tournaments."</p>
                <button
                    id="login-btn"
                    class="btn-discord"
                    on:click=move |_| auth::login(session, phase)
                >
                    "Login with Discord"
                </button>
                {move || login_hint(phase.get()).map(|hint| view! { <p class="login-hint">{hint}</p> })}
            </div>
        </div>
    }
}

#[component]
fn DashboardPage() -> impl IntoView {
    let session: Session = expect_context();
    let data: DashboardData = expect_context();
    let router: Router = expect_context();
    let view_signal = router.view();

    Effect::new(move || router.enter());

    let logout = move |_: leptos::ev::MouseEvent| {
        session.logout();
        data.reset();
    };

    view! {
        <div id="dashboard-page" class="page active">
            <nav class="sidebar">
                <div class="sidebar-header">
                    <h2>"Fleet Dashboard"</h2>
                </div>
                <ul class="menu">
                    {View::ALL
                        .into_iter()
                        .map(|view| {
                            view! {
                                <li>
                                    <a
                                        href=format!("#{}", view.as_str())
                                        class="menu-item"
                                        class:active=move || view_signal.get() == view
                                        on:click=move |_| router.switch_view(view)
                                    >
                                        <span class="menu-icon">{menu_icon(view)}</span>
                                        {view.title()}
                                    </a>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
                <div class="sidebar-footer">
                    <span id="username">{move || session.username().unwrap_or_default()}</span>
                    <button id="logout-btn" class="btn-secondary" on:click=logout>
                        "Logout"
                    </button>
                </div>
            </nav>

            <main class="main-content">
                <section id="overview-view" class="view" class:active=move || view_signal.get() == View::Overview>
                    <h1>"Overview"</h1>
                    <OverviewView />
                </section>
                <section id="fleets-view" class="view" class:active=move || view_signal.get() == View::Fleets>
                    <h1>"My Fleets"</h1>
                    <FleetsView />
                </section>
                <section
                    id="leaderboards-view"
                    class="view"
                    class:active=move || view_signal.get() == View::Leaderboards
                >
                    <h1>"Leaderboards"</h1>
                    <LeaderboardTabs />
                    <LeaderboardView />
                </section>
                <section
                    id="tournaments-view"
                    class="view"
                    class:active=move || view_signal.get() == View::Tournaments
                >
                    <h1>"Tournaments"</h1>
                    <TournamentsView />
                </section>
            </main>
        </div>
    }
}

#[component]
fn LeaderboardTabs() -> impl IntoView {
    let router: Router = expect_context();
    let tab = router.tab();

    view! {
        <div class="tabs">
            {LeaderboardKind::ALL
                .into_iter()
                .map(|kind| {
                    view! {
                        <button
                            class="tab"
                            class:active=move || tab.get() == kind
                            on:click=move |_| router.switch_tab(kind)
                        >
                            {kind.tab_label()}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hint_only_while_waiting_or_after_cancel() {
        assert!(login_hint(AuthPhase::Idle).is_none());
        assert!(login_hint(AuthPhase::AwaitingExternalLogin).is_some());
        assert!(login_hint(AuthPhase::Resolved(AuthOutcome::Cancelled)).is_some());
        assert!(login_hint(AuthPhase::Resolved(AuthOutcome::Success)).is_none());
    }

    #[test]
    fn every_view_has_a_menu_icon() {
        assert!(View::ALL.into_iter().all(|view| !menu_icon(view).is_empty()));
    }
}
