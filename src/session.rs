//! Selection context for the comparison flow: the chosen campaign plus a
//! faction and unit per side. Replaces ad-hoc global state with an explicit
//! value the caller owns; empty string means unselected.

use serde::{Deserialize, Serialize};

/// Which of the two compared sides a faction/unit choice belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Player,
    Ai,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    #[serde(default)]
    pub campaign: String,
    #[serde(default)]
    pub player_faction: String,
    #[serde(default)]
    pub ai_faction: String,
    #[serde(default)]
    pub player_unit: String,
    #[serde(default)]
    pub ai_unit: String,
}

impl Selection {
    pub fn new() -> Self {
        Selection::default()
    }

    /// Choosing a campaign invalidates every downstream choice.
    pub fn set_campaign(&mut self, campaign_id: impl Into<String>) {
        self.campaign = campaign_id.into();
        self.player_faction.clear();
        self.ai_faction.clear();
        self.player_unit.clear();
        self.ai_unit.clear();
    }

    /// Choosing a faction invalidates that side's unit choice.
    pub fn set_faction(&mut self, side: Side, faction_id: impl Into<String>) {
        match side {
            Side::Player => {
                self.player_faction = faction_id.into();
                self.player_unit.clear();
            }
            Side::Ai => {
                self.ai_faction = faction_id.into();
                self.ai_unit.clear();
            }
        }
    }

    pub fn set_unit(&mut self, side: Side, unit_id: impl Into<String>) {
        match side {
            Side::Player => self.player_unit = unit_id.into(),
            Side::Ai => self.ai_unit = unit_id.into(),
        }
    }

    pub fn faction(&self, side: Side) -> &str {
        match side {
            Side::Player => &self.player_faction,
            Side::Ai => &self.ai_faction,
        }
    }

    pub fn unit(&self, side: Side) -> &str {
        match side {
            Side::Player => &self.player_unit,
            Side::Ai => &self.ai_unit,
        }
    }

    /// Both units chosen, so a comparison can run.
    pub fn both_units_selected(&self) -> bool {
        !self.player_unit.is_empty() && !self.ai_unit.is_empty()
    }
}
