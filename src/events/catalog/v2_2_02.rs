// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Records whose shape changed with journal schema 2.2.02.
//!
//! Changes are additive: every 2.2.00 field is still present.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Docked {
    pub station_name: String,
    #[serde(default)]
    pub station_type: Option<String>,
    pub star_system: String,
    #[serde(default)]
    pub cockpit_breach: Option<bool>,
    #[serde(default)]
    pub faction: Option<String>,
    #[serde(default)]
    pub faction_state: Option<String>,
    #[serde(default)]
    pub allegiance: Option<String>,
    #[serde(default)]
    pub economy: Option<String>,
    #[serde(default, rename = "Economy_Localised")]
    pub economy_localised: Option<String>,
    #[serde(default)]
    pub government: Option<String>,
    #[serde(default, rename = "Government_Localised")]
    pub government_localised: Option<String>,
    #[serde(default)]
    pub security: Option<String>,
    #[serde(default, rename = "Security_Localised")]
    pub security_localised: Option<String>,
    #[serde(default, rename = "DistFromStarLS")]
    pub dist_from_star_ls: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FactionPresence {
    pub name: String,
    #[serde(default)]
    pub faction_state: Option<String>,
    #[serde(default)]
    pub government: Option<String>,
    pub influence: f64,
    #[serde(default)]
    pub allegiance: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FsdJump {
    pub star_system: String,
    pub star_pos: [f64; 3],
    #[serde(default)]
    pub body: Option<String>,
    pub jump_dist: f64,
    pub fuel_used: f64,
    pub fuel_level: f64,
    #[serde(default)]
    pub boost_used: Option<bool>,
    #[serde(default)]
    pub faction: Option<String>,
    #[serde(default)]
    pub faction_state: Option<String>,
    #[serde(default)]
    pub allegiance: Option<String>,
    #[serde(default)]
    pub economy: Option<String>,
    #[serde(default)]
    pub government: Option<String>,
    #[serde(default)]
    pub security: Option<String>,
    #[serde(default)]
    pub factions: Vec<FactionPresence>,
}
