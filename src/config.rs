//! Rules configuration: grid size and the fleet every player must field.

use core::fmt;
use core::str::FromStr;
use std::env;

use serde::{Deserialize, Serialize};

/// Default grid edge length.
pub const GRID_SIZE: u8 = 10;

/// Default capacity of the domain event channel.
pub const EVENT_CAPACITY: usize = 64;

/// Kinds of ship a ruleset may ask for. Lengths and counts live in
/// [`FleetRules`], not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShipKind {
    Carrier,
    Battleship,
    Cruiser,
    Submarine,
    Destroyer,
}

impl ShipKind {
    pub fn name(&self) -> &'static str {
        match self {
            ShipKind::Carrier => "Carrier",
            ShipKind::Battleship => "Battleship",
            ShipKind::Cruiser => "Cruiser",
            ShipKind::Submarine => "Submarine",
            ShipKind::Destroyer => "Destroyer",
        }
    }
}

impl fmt::Display for ShipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Length of one kind of ship and how many of them a fleet carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindRule {
    pub kind: ShipKind,
    pub length: usize,
    pub count: usize,
}

impl KindRule {
    pub const fn new(kind: ShipKind, length: usize, count: usize) -> Self {
        Self {
            kind,
            length,
            count,
        }
    }
}

/// A complete ruleset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetRules {
    pub grid_size: u8,
    pub kinds: Vec<KindRule>,
}

impl FleetRules {
    /// One four-long battleship and two three-long destroyers.
    pub fn standard() -> Self {
        Self {
            grid_size: GRID_SIZE,
            kinds: vec![
                KindRule::new(ShipKind::Battleship, 4, 1),
                KindRule::new(ShipKind::Destroyer, 3, 2),
            ],
        }
    }

    /// The five-ship lineup of the board game.
    pub fn classic() -> Self {
        Self {
            grid_size: GRID_SIZE,
            kinds: vec![
                KindRule::new(ShipKind::Carrier, 5, 1),
                KindRule::new(ShipKind::Battleship, 4, 1),
                KindRule::new(ShipKind::Cruiser, 3, 1),
                KindRule::new(ShipKind::Submarine, 3, 1),
                KindRule::new(ShipKind::Destroyer, 2, 1),
            ],
        }
    }

    pub fn rule(&self, kind: ShipKind) -> Option<&KindRule> {
        self.kinds.iter().find(|r| r.kind == kind)
    }

    /// Length of `kind`, or `None` if this ruleset does not use it.
    pub fn length_of(&self, kind: ShipKind) -> Option<usize> {
        self.rule(kind).map(|r| r.length)
    }

    /// Number of ships in a complete fleet.
    pub fn fleet_size(&self) -> usize {
        self.kinds.iter().map(|r| r.count).sum()
    }

    /// Number of cells a complete fleet covers.
    pub fn total_cells(&self) -> usize {
        self.kinds.iter().map(|r| r.count * r.length).sum()
    }
}

impl Default for FleetRules {
    fn default() -> Self {
        Self::standard()
    }
}

/// Named rulesets selectable from the environment or the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ruleset {
    #[default]
    Standard,
    Classic,
}

impl Ruleset {
    pub fn rules(self) -> FleetRules {
        match self {
            Ruleset::Standard => FleetRules::standard(),
            Ruleset::Classic => FleetRules::classic(),
        }
    }
}

impl FromStr for Ruleset {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Ruleset::Standard),
            "classic" => Ok(Ruleset::Classic),
            other => Err(anyhow::anyhow!("unknown ruleset {other:?}")),
        }
    }
}

/// Everything needed to construct an [`Engine`](crate::Engine).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub rules: FleetRules,
    pub event_capacity: usize,
}

impl EngineConfig {
    /// Read `BATTLESHIP_RULES` and `BATTLESHIP_EVENT_CAPACITY`, falling back
    /// to the defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let rules = env::var("BATTLESHIP_RULES")
            .ok()
            .and_then(|v| v.parse::<Ruleset>().ok())
            .unwrap_or_default()
            .rules();
        let event_capacity = env::var("BATTLESHIP_EVENT_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|&n: &usize| n > 0)
            .unwrap_or(EVENT_CAPACITY);
        Self {
            rules,
            event_capacity,
        }
    }

    pub fn with_rules(mut self, rules: FleetRules) -> Self {
        self.rules = rules;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rules: FleetRules::standard(),
            event_capacity: EVENT_CAPACITY,
        }
    }
}
