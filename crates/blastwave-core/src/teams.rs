//! Team identity and the hostility table.

use serde::{Deserialize, Serialize};

/// A team identifier. Absence of a team is `Option<Team>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Team(pub u8);

impl Team {
    pub const DERELICT: Team = Team(0);
    pub const SHARDED: Team = Team(1);
    pub const CRUX: Team = Team(2);
}

/// Answers whether two teams are mutually hostile.
///
/// Distinct teams are hostile unless registered as allied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamRelations {
    alliances: Vec<(Team, Team)>,
}

impl TeamRelations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from a list of allied pairs.
    pub fn with_alliances(pairs: impl IntoIterator<Item = (Team, Team)>) -> Self {
        let mut relations = Self::new();
        for (a, b) in pairs {
            relations.ally(a, b);
        }
        relations
    }

    /// Mark two teams as allied (symmetric).
    pub fn ally(&mut self, a: Team, b: Team) {
        if a != b && !self.are_allied(a, b) {
            self.alliances.push(ordered(a, b));
        }
    }

    pub fn are_allied(&self, a: Team, b: Team) -> bool {
        a == b || self.alliances.contains(&ordered(a, b))
    }

    pub fn are_hostile(&self, a: Team, b: Team) -> bool {
        !self.are_allied(a, b)
    }

    /// Hostility against an optional filter team. No filter means everyone is a target.
    pub fn is_target(&self, filter: Option<Team>, other: Team) -> bool {
        filter.is_none_or(|team| self.are_hostile(team, other))
    }
}

fn ordered(a: Team, b: Team) -> (Team, Team) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_teams_hostile_by_default() {
        let relations = TeamRelations::new();
        assert!(relations.are_hostile(Team::SHARDED, Team::CRUX));
        assert!(!relations.are_hostile(Team::CRUX, Team::CRUX));
    }

    #[test]
    fn test_alliance_is_symmetric() {
        let relations = TeamRelations::with_alliances([(Team::CRUX, Team::SHARDED)]);
        assert!(!relations.are_hostile(Team::SHARDED, Team::CRUX));
        assert!(!relations.are_hostile(Team::CRUX, Team::SHARDED));
        assert!(relations.are_hostile(Team::DERELICT, Team::CRUX));
    }

    #[test]
    fn test_no_filter_targets_everyone() {
        let relations = TeamRelations::new();
        assert!(relations.is_target(None, Team::SHARDED));
        assert!(!relations.is_target(Some(Team::SHARDED), Team::SHARDED));
    }
}
