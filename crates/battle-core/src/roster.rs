//! Game and roster definitions supplied by the ingestion layer.
//!
//! Read-only to the engine apart from the live status and scores on `Game`.

use serde::{Deserialize, Serialize};

use crate::constants::MAX_EQUIPPED_MODIFIERS;
use crate::enums::{GamePhase, Lane, Modifier, Side};
use crate::error::{BattleError, Result};

/// Immutable team reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub abbreviation: String,
    /// CSS-style colour string, passed through to the renderer.
    pub color: String,
}

/// A capper's betting history on one team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitRecord {
    pub team_id: String,
    /// Signed net units won (positive) or lost (negative).
    pub net_units: f64,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub pushes: u32,
}

/// The person whose pick one side of the battle represents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capper {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub unit_records: Vec<UnitRecord>,
    /// Up to three equipped modifiers.
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    /// Lane whose tokens are energized for this capper's side.
    #[serde(default)]
    pub bonus_lane: Option<Lane>,
}

impl Capper {
    /// Net units on `team_id`, summed over matching records. Zero when the
    /// capper has no record for the team.
    pub fn net_units_for(&self, team_id: &str) -> f64 {
        self.unit_records
            .iter()
            .filter(|r| r.team_id == team_id)
            .map(|r| r.net_units)
            .sum()
    }
}

/// One side of the battle: the team picked and the capper who picked it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideRoster {
    pub team: Team,
    pub capper: Capper,
}

/// A game definition. Created once per battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: String,
    pub left: SideRoster,
    pub right: SideRoster,
    /// Point spread, from the left team's perspective.
    #[serde(default)]
    pub spread: f64,
    #[serde(default)]
    pub status: GamePhase,
    /// Live scores, indexed by `Side::index`.
    #[serde(default)]
    pub scores: [u32; 2],
    /// Scheduled tip-off as an opaque string (ISO-8601 from the feed).
    #[serde(default)]
    pub scheduled_at: Option<String>,
}

impl Game {
    pub fn roster(&self, side: Side) -> &SideRoster {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Net units backing the given side's defense.
    pub fn defense_units(&self, side: Side) -> f64 {
        let roster = self.roster(side);
        roster.capper.net_units_for(&roster.team.id)
    }

    /// Fail fast on malformed input before any battle state exists.
    pub fn validate(&self) -> Result<()> {
        for side in Side::BOTH {
            let roster = self.roster(side);
            if roster.team.id.trim().is_empty() {
                return Err(BattleError::MissingTeam { side });
            }
            if roster.capper.modifiers.len() > MAX_EQUIPPED_MODIFIERS {
                return Err(BattleError::TooManyModifiers {
                    side,
                    count: roster.capper.modifiers.len(),
                });
            }
            let units = self.defense_units(side);
            if !units.is_finite() {
                return Err(BattleError::InvalidUnitRecord { side, units });
            }
        }
        if self.left.team.id == self.right.team.id {
            return Err(BattleError::SameTeamBothSides {
                team_id: self.left.team.id.clone(),
            });
        }
        Ok(())
    }
}
