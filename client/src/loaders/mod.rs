//! One loader per API resource. Each load fetches, then replaces its render
//! target wholesale; nothing is diffed or cached between loads.

pub mod fleet_detail;
pub mod fleets;
pub mod leaderboard;
pub mod overview;
pub mod tournaments;

use std::future::Future;

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use fleetdash_shared::{
    FleetDetail, FleetSummary, LeaderboardEntry, LeaderboardKind, OverviewStats, Tournament,
};

use crate::api::ApiError;

/// Issues request tickets for one render target. Only the newest ticket may
/// write the target, so a slow response cannot overwrite a fresher one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestGate {
    issued: u64,
}

impl RequestGate {
    pub fn issue(&mut self) -> u64 {
        self.issued = self.issued.wrapping_add(1);
        self.issued
    }

    pub const fn is_current(&self, ticket: u64) -> bool {
        self.issued == ticket
    }
}

/// Render target for one resource.
pub struct Slot<T: Send + Sync + 'static> {
    value: RwSignal<Option<T>>,
    gate: StoredValue<RequestGate>,
}

impl<T: Send + Sync + 'static> Clone for Slot<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for Slot<T> {}

impl<T: Send + Sync + 'static> Slot<T> {
    pub fn new() -> Self {
        Self {
            value: RwSignal::new(None),
            gate: StoredValue::new(RequestGate::default()),
        }
    }

    pub fn value(&self) -> RwSignal<Option<T>> {
        self.value
    }

    fn begin(&self) -> u64 {
        let mut ticket = 0;
        self.gate.update_value(|gate| ticket = gate.issue());
        ticket
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.gate.with_value(|gate| gate.is_current(ticket))
    }

    /// Forget the rendered value and void any request still in flight.
    pub fn reset(&self) {
        self.begin();
        self.value.set(None);
    }
}

impl<T: Send + Sync + 'static> Default for Slot<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Fetch into `slot`. Failures are logged and leave the current render as is.
pub fn spawn_load<T, Fut>(slot: Slot<T>, what: &'static str, fetch: Fut)
where
    T: Send + Sync + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let ticket = slot.begin();
    spawn_local(async move {
        let result = fetch.await;
        if !slot.is_current(ticket) {
            log::debug!("dropping superseded {what} response");
            return;
        }
        match result {
            Ok(value) => slot.value.set(Some(value)),
            Err(e) => log::error!("Failed to load {what}: {e}"),
        }
    });
}

/// Every render target of the dashboard, provided through context.
#[derive(Clone, Copy)]
pub struct DashboardData {
    pub overview: Slot<OverviewStats>,
    pub fleets: Slot<Vec<FleetSummary>>,
    pub fleet_detail: Slot<FleetDetail>,
    pub leaderboard: Slot<(LeaderboardKind, Vec<LeaderboardEntry>)>,
    pub tournaments: Slot<Vec<Tournament>>,
}

impl DashboardData {
    pub fn new() -> Self {
        Self {
            overview: Slot::new(),
            fleets: Slot::new(),
            fleet_detail: Slot::new(),
            leaderboard: Slot::new(),
            tournaments: Slot::new(),
        }
    }

    /// Drop everything rendered for the previous user.
    pub fn reset(&self) {
        self.overview.reset();
        self.fleets.reset();
        self.fleet_detail.reset();
        self.leaderboard.reset();
        self.tournaments.reset();
    }
}

impl Default for DashboardData {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::RequestGate;

    #[test]
    fn only_latest_ticket_is_current() {
        let mut gate = RequestGate::default();
        let first = gate.issue();
        let second = gate.issue();
        assert!(!gate.is_current(first));
        assert!(gate.is_current(second));
    }

    #[test]
    fn reissuing_invalidates_in_flight_requests() {
        let mut gate = RequestGate::default();
        let in_flight = gate.issue();
        gate.issue();
        assert!(!gate.is_current(in_flight));
    }
}
