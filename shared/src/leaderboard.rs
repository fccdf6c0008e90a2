use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::view::UnknownName;

/// Which leaderboard to show. Selects the endpoint, the column set and the
/// value column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LeaderboardKind {
    #[default]
    Damage,
    Xp,
    Points,
}

impl LeaderboardKind {
    pub const ALL: [Self; 3] = [Self::Damage, Self::Xp, Self::Points];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Damage => "damage",
            Self::Xp => "xp",
            Self::Points => "points",
        }
    }

    pub const fn tab_label(self) -> &'static str {
        match self {
            Self::Damage => "Top Damage",
            Self::Xp => "Top XP",
            Self::Points => "Top Points",
        }
    }

    pub const fn value_label(self) -> &'static str {
        match self {
            Self::Damage => "Damage",
            Self::Xp => "Base XP",
            Self::Points => "Points",
        }
    }

    /// Ship and Tier columns only make sense for per-battle records.
    pub const fn shows_ship(self) -> bool {
        !matches!(self, Self::Points)
    }

    pub const fn value_of(self, entry: &LeaderboardEntry) -> Option<i64> {
        match self {
            Self::Damage => entry.damage,
            Self::Xp => entry.base_xp,
            Self::Points => entry.points,
        }
    }
}

impl fmt::Display for LeaderboardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeaderboardKind {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownName::new("leaderboard tab", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub player: String,
    #[serde(default)]
    pub ship: Option<String>,
    #[serde(default)]
    pub tier: Option<u32>,
    #[serde(default)]
    pub damage: Option<i64>,
    #[serde(default)]
    pub base_xp: Option<i64>,
    #[serde(default)]
    pub points: Option<i64>,
}

impl LeaderboardEntry {
    /// Podium class for ranks 1-3.
    pub fn rank_class(&self) -> Option<&'static str> {
        match self.rank {
            1 => Some("rank-1"),
            2 => Some("rank-2"),
            3 => Some("rank-3"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_tab_names() {
        assert_eq!("damage".parse::<LeaderboardKind>(), Ok(LeaderboardKind::Damage));
        assert_eq!("xp".parse::<LeaderboardKind>(), Ok(LeaderboardKind::Xp));
        assert_eq!("points".parse::<LeaderboardKind>(), Ok(LeaderboardKind::Points));
        assert!("kills".parse::<LeaderboardKind>().is_err());
    }

    #[test]
    fn value_field_follows_kind() {
        let entry: LeaderboardEntry = serde_json::from_value(json!({
            "rank": 1,
            "player": "nova",
            "ship": "Yamato",
            "tier": 10,
            "damage": 312000,
            "base_xp": 4100
        }))
        .unwrap();
        assert_eq!(LeaderboardKind::Damage.value_of(&entry), Some(312_000));
        assert_eq!(LeaderboardKind::Xp.value_of(&entry), Some(4_100));
        assert_eq!(LeaderboardKind::Points.value_of(&entry), None);
    }

    #[test]
    fn only_points_hides_ship_columns() {
        assert!(LeaderboardKind::Damage.shows_ship());
        assert!(LeaderboardKind::Xp.shows_ship());
        assert!(!LeaderboardKind::Points.shows_ship());
    }

    #[test]
    fn podium_classes_cover_top_three() {
        let mut entry = LeaderboardEntry {
            rank: 1,
            player: "a".to_string(),
            ship: None,
            tier: None,
            damage: None,
            base_xp: None,
            points: Some(10),
        };
        assert_eq!(entry.rank_class(), Some("rank-1"));
        entry.rank = 3;
        assert_eq!(entry.rank_class(), Some("rank-3"));
        entry.rank = 4;
        assert_eq!(entry.rank_class(), None);
    }
}
