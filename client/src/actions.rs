//! Commander-only roster mutations. Each one confirms with the user, sends
//! a single request, then reloads the fleet detail on success.

use wasm_bindgen_futures::spawn_local;

use fleetdash_shared::Role;

use crate::api::ApiError;
use crate::loaders::DashboardData;
use crate::loaders::fleet_detail::load_fleet_details;
use crate::notify;
use crate::session::Session;

pub const MAX_RANK_NOTICE: &str = "Member is already at maximum rank (except Fleet Commander).";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromotePlan {
    AtMaximum,
    Promote { new_role: Role, prompt: String },
}

pub fn plan_promotion(current: &Role, member_name: &str) -> PromotePlan {
    match current.promotion() {
        None => PromotePlan::AtMaximum,
        Some(new_role) => {
            let prompt = format!("Promote {member_name} from {current} to {new_role}?");
            PromotePlan::Promote { new_role, prompt }
        }
    }
}

pub fn removal_prompt(member_name: &str) -> String {
    format!("Remove {member_name} from the fleet?")
}

/// Alert text for a failed mutation. A server-supplied reason is shown
/// verbatim; anything else gets the bare action text.
pub fn mutation_failure_message(action: &str, err: &ApiError) -> String {
    match err.server_message() {
        Some(reason) => format!("Failed to {action}: {reason}"),
        None => format!("Failed to {action}"),
    }
}

pub fn promote_member(
    session: Session,
    data: DashboardData,
    fleet_id: i64,
    member_id: i64,
    current_role: Role,
    member_name: String,
) {
    let (new_role, prompt) = match plan_promotion(&current_role, &member_name) {
        PromotePlan::AtMaximum => {
            notify::alert(MAX_RANK_NOTICE);
            return;
        }
        PromotePlan::Promote { new_role, prompt } => (new_role, prompt),
    };
    if !notify::confirm(&prompt) {
        return;
    }

    let api = session.api();
    let token = session.token_untracked();
    spawn_local(async move {
        match api
            .promote(token.as_deref(), fleet_id, member_id, new_role.clone())
            .await
        {
            Ok(()) => {
                log::info!("promoted member {member_id} of fleet {fleet_id} to {new_role}");
                notify::alert(&format!("{member_name} promoted to {new_role}!"));
                load_fleet_details(session, data, fleet_id);
            }
            Err(e) => {
                log::error!("Failed to promote member: {e}");
                notify::alert(&mutation_failure_message("promote member", &e));
            }
        }
    });
}

pub fn remove_member(
    session: Session,
    data: DashboardData,
    fleet_id: i64,
    member_id: i64,
    member_name: String,
) {
    if !notify::confirm(&removal_prompt(&member_name)) {
        return;
    }

    let api = session.api();
    let token = session.token_untracked();
    spawn_local(async move {
        match api.remove_member(token.as_deref(), fleet_id, member_id).await {
            Ok(()) => {
                log::info!("removed member {member_id} from fleet {fleet_id}");
                notify::alert(&format!("{member_name} removed from fleet!"));
                load_fleet_details(session, data, fleet_id);
            }
            Err(e) => {
                log::error!("Failed to remove member: {e}");
                notify::alert(&mutation_failure_message("remove member", &e));
            }
        }
    });
}
