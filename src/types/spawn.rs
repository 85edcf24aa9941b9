//! Spawn point types.
//!
//! A map has two spawn sets, one per team. Each spawn is the `origin` of an
//! enabled player-start entity.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A team designator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Team {
    /// Counter-terrorists (`CT`)
    CounterTerrorist,
    /// Terrorists (`T`)
    Terrorist,
}

impl Team {
    /// Both teams, in output order.
    pub const ALL: [Team; 2] = [Team::CounterTerrorist, Team::Terrorist];

    /// Entity class of this team's player starts.
    pub fn classname(self) -> &'static str {
        match self {
            Team::CounterTerrorist => "info_player_counterterrorist",
            Team::Terrorist => "info_player_terrorist",
        }
    }

    /// Short label used in output (`CT` / `T`).
    pub fn label(self) -> &'static str {
        match self {
            Team::CounterTerrorist => "CT",
            Team::Terrorist => "T",
        }
    }

    /// Look up the team whose player-start class is `classname`.
    pub fn from_classname(classname: &str) -> Option<Self> {
        Team::ALL.into_iter().find(|t| t.classname() == classname)
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A point in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Build from exactly three components.
    pub fn from_slice(components: &[f64]) -> Option<Self> {
        match components {
            [x, y, z] => Some(Self::new(*x, *y, *z)),
            _ => None,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Spawn positions for both teams, in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpawnSet {
    #[serde(rename = "CT")]
    pub ct: Vec<Position>,

    #[serde(rename = "T")]
    pub t: Vec<Position>,
}

impl SpawnSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, team: Team) -> &[Position] {
        match team {
            Team::CounterTerrorist => &self.ct,
            Team::Terrorist => &self.t,
        }
    }

    pub fn push(&mut self, team: Team, position: Position) {
        match team {
            Team::CounterTerrorist => self.ct.push(position),
            Team::Terrorist => self.t.push(position),
        }
    }

    /// Total spawns across both teams.
    pub fn len(&self) -> usize {
        self.ct.len() + self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ct.is_empty() && self.t.is_empty()
    }

    /// Serialize as `{"CT": [...], "T": [...]}`.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        Ok(json?)
    }
}
