use std::str::FromStr;

use leptos::prelude::*;

use fleetdash_shared::{LeaderboardKind, UnknownName, View};

use crate::loaders::DashboardData;
use crate::loaders::fleets::load_user_fleets;
use crate::loaders::leaderboard::load_leaderboard;
use crate::loaders::overview::load_overview;
use crate::loaders::tournaments::load_tournaments;
use crate::session::Session;

/// Parse a view or tab name coming from markup. Unknown names are logged
/// and yield `None` so the caller leaves everything as is.
pub fn resolve<T>(name: &str) -> Option<T>
where
    T: FromStr<Err = UnknownName>,
{
    match name.parse() {
        Ok(target) => Some(target),
        Err(e) => {
            log::warn!("ignoring navigation: {e}");
            None
        }
    }
}

/// `#fleets` -> `Fleets`. An empty hash means no deep link.
pub fn view_from_hash(hash: &str) -> Option<View> {
    let name = hash.trim_start_matches('#');
    if name.is_empty() {
        return None;
    }
    resolve(name)
}

/// Which view and leaderboard tab are active, plus the loads each switch
/// triggers.
#[derive(Clone, Copy)]
pub struct Router {
    view: RwSignal<View>,
    tab: RwSignal<LeaderboardKind>,
    session: Session,
    data: DashboardData,
}

impl Router {
    pub fn new(session: Session, data: DashboardData) -> Self {
        Self {
            view: RwSignal::new(View::default()),
            tab: RwSignal::new(LeaderboardKind::default()),
            session,
            data,
        }
    }

    pub fn view(&self) -> ReadSignal<View> {
        self.view.read_only()
    }

    pub fn tab(&self) -> ReadSignal<LeaderboardKind> {
        self.tab.read_only()
    }

    /// Dashboard entry after a login or a restored session. A view named in
    /// the location hash is opened on top of the default loads.
    pub fn enter(&self) {
        self.view.set(View::Overview);
        self.tab.set(LeaderboardKind::default());
        load_overview(self.session.api(), self.data);
        load_user_fleets(self.session, self.data);

        let hash = web_sys::window()
            .and_then(|w| w.location().hash().ok())
            .unwrap_or_default();
        if let Some(view) = view_from_hash(&hash)
            && view != View::Overview
        {
            self.switch_view(view);
        }
    }

    pub fn switch_view(&self, view: View) {
        self.view.set(view);
        let api = self.session.api();
        match view {
            View::Overview => load_overview(api, self.data),
            View::Fleets => load_user_fleets(self.session, self.data),
            View::Leaderboards => {
                self.tab.set(LeaderboardKind::Damage);
                load_leaderboard(api, self.data, LeaderboardKind::Damage);
            }
            View::Tournaments => load_tournaments(api, self.data),
        }
    }

    pub fn switch_tab(&self, kind: LeaderboardKind) {
        self.tab.set(kind);
        load_leaderboard(self.session.api(), self.data, kind);
    }
}
