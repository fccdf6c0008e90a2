use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::identity::json_key;

/// Fleet rank. Ordered from least to most privileged; ranks the client does
/// not know are carried verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Member,
    Officer,
    DeputyCommander,
    FleetCommander,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Member => "Member",
            Self::Officer => "Officer",
            Self::DeputyCommander => "Deputy Commander",
            Self::FleetCommander => "Fleet Commander",
            Self::Other(name) => name,
        }
    }

    /// Fleet Commander and Deputy Commander may manage membership.
    pub const fn is_commander(&self) -> bool {
        matches!(self, Self::FleetCommander | Self::DeputyCommander)
    }

    /// Next rank along `Member -> Officer -> Deputy Commander`.
    ///
    /// `None` once the member is at Deputy Commander or above; Fleet
    /// Commander is never reachable through promotion. An unrecognised rank
    /// re-enters the ladder at `Member`.
    pub fn promotion(&self) -> Option<Self> {
        match self {
            Self::Member => Some(Self::Officer),
            Self::Officer => Some(Self::DeputyCommander),
            Self::DeputyCommander | Self::FleetCommander => None,
            Self::Other(_) => Some(Self::Member),
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Member" => Self::Member,
            "Officer" => Self::Officer,
            "Deputy Commander" => Self::DeputyCommander,
            "Fleet Commander" => Self::FleetCommander,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the caller's fleet memberships, as listed by `GET /fleets`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetSummary {
    pub id: i64,
    pub name: String,
    pub tag: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub member_count: u64,
    pub user_role: Role,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FleetStats {
    #[serde(default)]
    pub member_count: u64,
    #[serde(default)]
    pub record_count: u64,
    #[serde(default)]
    pub total_points: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetMember {
    pub id: i64,
    #[serde(default)]
    pub discord_id: Option<Value>,
    pub username: String,
    pub role: Role,
    #[serde(default)]
    pub join_date: Option<String>,
}

impl FleetMember {
    pub fn identity_key(&self) -> Option<String> {
        self.discord_id.as_ref().and_then(json_key)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetDetail {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub stats: FleetStats,
    #[serde(default)]
    pub members: Vec<FleetMember>,
}

impl FleetDetail {
    /// Whether the viewer holds a commander rank in this fleet. Identities are
    /// compared as strings so numeric and string snowflakes match.
    pub fn viewer_is_commander(&self, viewer_key: Option<&str>) -> bool {
        let Some(viewer_key) = viewer_key else {
            return false;
        };
        self.members.iter().any(|member| {
            member.role.is_commander() && member.identity_key().as_deref() == Some(viewer_key)
        })
    }
}

/// What the Actions cell of a roster row holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberActions {
    /// Viewer is not a commander: the Actions column is absent.
    Absent,
    /// Column present but the row is protected (the Fleet Commander).
    Protected,
    /// Promote and remove controls.
    Manage,
}

impl MemberActions {
    pub fn for_member(viewer_is_commander: bool, member: &FleetMember) -> Self {
        if !viewer_is_commander {
            Self::Absent
        } else if member.role == Role::FleetCommander {
            Self::Protected
        } else {
            Self::Manage
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn member(id: i64, discord_id: Value, role: &str) -> FleetMember {
        FleetMember {
            id,
            discord_id: Some(discord_id),
            username: format!("user{id}"),
            role: Role::from(role),
            join_date: None,
        }
    }

    fn fleet(members: Vec<FleetMember>) -> FleetDetail {
        FleetDetail {
            id: 9,
            name: "Iron Tide".to_string(),
            stats: FleetStats::default(),
            members,
        }
    }

    #[test]
    fn role_round_trips_through_wire_names() {
        let role: Role = serde_json::from_value(json!("Deputy Commander")).unwrap();
        assert_eq!(role, Role::DeputyCommander);
        assert_eq!(serde_json::to_value(&role).unwrap(), json!("Deputy Commander"));

        let custom: Role = serde_json::from_value(json!("Recruit")).unwrap();
        assert_eq!(custom, Role::Other("Recruit".to_string()));
        assert_eq!(serde_json::to_value(&custom).unwrap(), json!("Recruit"));
    }

    #[test]
    fn promotion_ladder_stops_at_deputy() {
        assert_eq!(Role::Member.promotion(), Some(Role::Officer));
        assert_eq!(Role::Officer.promotion(), Some(Role::DeputyCommander));
        assert_eq!(Role::DeputyCommander.promotion(), None);
        assert_eq!(Role::FleetCommander.promotion(), None);
        assert_eq!(Role::from("Recruit").promotion(), Some(Role::Member));
    }

    #[test]
    fn commander_detection_matches_identity_as_string() {
        let detail = fleet(vec![
            member(1, json!("100"), "Fleet Commander"),
            member(2, json!(200), "Deputy Commander"),
            member(3, json!("300"), "Officer"),
        ]);
        assert!(detail.viewer_is_commander(Some("100")));
        assert!(detail.viewer_is_commander(Some("200")));
        assert!(!detail.viewer_is_commander(Some("300")));
        assert!(!detail.viewer_is_commander(Some("999")));
        assert!(!detail.viewer_is_commander(None));
    }

    #[test]
    fn actions_protect_fleet_commander_rows() {
        let commander = member(1, json!("1"), "Fleet Commander");
        let officer = member(2, json!("2"), "Officer");
        assert_eq!(MemberActions::for_member(true, &commander), MemberActions::Protected);
        assert_eq!(MemberActions::for_member(true, &officer), MemberActions::Manage);
        assert_eq!(MemberActions::for_member(false, &officer), MemberActions::Absent);
        assert_eq!(MemberActions::for_member(false, &commander), MemberActions::Absent);
    }

    #[test]
    fn fleet_detail_decodes_with_missing_optionals() {
        let detail: FleetDetail = serde_json::from_value(json!({
            "id": 4,
            "name": "Iron Tide",
            "stats": { "member_count": 2, "record_count": 7, "total_points": 15300 },
            "members": [
                { "id": 11, "discord_id": "42", "username": "nova", "role": "Member" }
            ]
        }))
        .unwrap();
        assert_eq!(detail.stats.total_points, 15_300);
        assert_eq!(detail.members[0].join_date, None);
        assert_eq!(detail.members[0].identity_key().as_deref(), Some("42"));
    }
}
