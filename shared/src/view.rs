use std::fmt;
use std::str::FromStr;

/// Top-level dashboard views reachable from the side menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    Overview,
    Fleets,
    Leaderboards,
    Tournaments,
}

impl View {
    pub const ALL: [Self; 4] = [
        Self::Overview,
        Self::Fleets,
        Self::Leaderboards,
        Self::Tournaments,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Fleets => "fleets",
            Self::Leaderboards => "leaderboards",
            Self::Tournaments => "tournaments",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Fleets => "My Fleets",
            Self::Leaderboards => "Leaderboards",
            Self::Tournaments => "Tournaments",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|view| view.as_str() == s)
            .ok_or_else(|| UnknownName::new("view", s))
    }
}

/// A navigation target name that does not correspond to any view or tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownName {
    pub kind: &'static str,
    pub name: String,
}

impl UnknownName {
    pub fn new(kind: &'static str, name: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
        }
    }
}

impl fmt::Display for UnknownName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} {:?}", self.kind, self.name)
    }
}

impl std::error::Error for UnknownName {}
