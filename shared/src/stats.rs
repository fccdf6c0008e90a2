use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OverviewStats {
    #[serde(default)]
    pub total_fleets: u64,
    #[serde(default)]
    pub total_members: u64,
    #[serde(default)]
    pub total_records: u64,
    #[serde(default)]
    pub total_ships: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub name: String,
    pub status: String,
    #[serde(default)]
    pub participants: Vec<Value>,
}

impl Tournament {
    pub fn is_active(&self) -> bool {
        self.status == "active"
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tournament_counts_participants_of_any_shape() {
        let tournament: Tournament = serde_json::from_value(json!({
            "name": "Spring Cup",
            "status": "active",
            "participants": [1, { "fleet": "Iron Tide" }, "solo"]
        }))
        .unwrap();
        assert!(tournament.is_active());
        assert_eq!(tournament.participant_count(), 3);
    }

    #[test]
    fn only_exact_active_status_is_highlighted() {
        let tournament = Tournament {
            name: "Winter Cup".to_string(),
            status: "finished".to_string(),
            participants: Vec::new(),
        };
        assert!(!tournament.is_active());
    }
}
