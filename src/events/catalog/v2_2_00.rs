// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Records as first published with journal schema 2.2.00.

use serde::{Deserialize, Serialize};

/// First line of every journal file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fileheader {
    #[serde(default)]
    pub part: Option<u32>,
    #[serde(default)]
    pub language: Option<String>,
    pub gameversion: String,
    pub build: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LoadGame {
    pub commander: String,
    pub ship: String,
    #[serde(rename = "ShipID")]
    pub ship_id: u64,
    #[serde(default)]
    pub start_landed: Option<bool>,
    pub game_mode: String,
    #[serde(default)]
    pub group: Option<String>,
    pub credits: i64,
    pub loan: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Location {
    pub docked: bool,
    #[serde(default)]
    pub station_name: Option<String>,
    #[serde(default)]
    pub station_type: Option<String>,
    pub star_system: String,
    pub star_pos: [f64; 3],
    #[serde(default)]
    pub body: Option<String>,
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
}

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
    #[serde(default)]
    pub government: Option<String>,
    #[serde(default)]
    pub security: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Undocked {
    pub station_name: String,
    #[serde(default)]
    pub station_type: Option<String>,
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
}

/// Written when the game exits cleanly. No payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shutdown {}
