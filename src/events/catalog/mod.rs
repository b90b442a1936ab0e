// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Typed journal records, grouped by the schema version that introduced them.
//!
//! This is a deliberately small slice of the journal format. Any event type
//! without a typed record here still parses, as [`EventBody::Generic`], with all
//! of its fields available through [`Event::data`](crate::events::Event::data).

pub mod v2_2_00;
pub mod v2_2_02;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// Typed payload of an [`Event`](crate::events::Event).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EventBody {
    Fileheader(v2_2_00::Fileheader),
    LoadGame(v2_2_00::LoadGame),
    Location(v2_2_00::Location),
    Docked(v2_2_00::Docked),
    DockedV2202(v2_2_02::Docked),
    Undocked(v2_2_00::Undocked),
    FsdJump(v2_2_00::FsdJump),
    FsdJumpV2202(v2_2_02::FsdJump),
    Shutdown(v2_2_00::Shutdown),
    /// No typed record for this event type; see `Event::data`.
    Generic,
}

impl EventBody {
    pub fn is_generic(&self) -> bool {
        matches!(self, EventBody::Generic)
    }
}

/// Builds a typed body from a record's fields.
pub type Constructor = fn(&Map<String, Value>) -> Result<EventBody, serde_json::Error>;

fn typed<T: DeserializeOwned>(
    fields: &Map<String, Value>,
    wrap: fn(T) -> EventBody,
) -> Result<EventBody, serde_json::Error> {
    serde_json::from_value(Value::Object(fields.clone())).map(wrap)
}

pub fn generic(_fields: &Map<String, Value>) -> Result<EventBody, serde_json::Error> {
    Ok(EventBody::Generic)
}

pub fn fileheader(fields: &Map<String, Value>) -> Result<EventBody, serde_json::Error> {
    typed(fields, EventBody::Fileheader)
}

pub fn load_game(fields: &Map<String, Value>) -> Result<EventBody, serde_json::Error> {
    typed(fields, EventBody::LoadGame)
}

pub fn location(fields: &Map<String, Value>) -> Result<EventBody, serde_json::Error> {
    typed(fields, EventBody::Location)
}

pub fn docked_v2_2_00(fields: &Map<String, Value>) -> Result<EventBody, serde_json::Error> {
    typed(fields, EventBody::Docked)
}

pub fn docked_v2_2_02(fields: &Map<String, Value>) -> Result<EventBody, serde_json::Error> {
    typed(fields, EventBody::DockedV2202)
}

pub fn undocked(fields: &Map<String, Value>) -> Result<EventBody, serde_json::Error> {
    typed(fields, EventBody::Undocked)
}

pub fn fsd_jump_v2_2_00(fields: &Map<String, Value>) -> Result<EventBody, serde_json::Error> {
    typed(fields, EventBody::FsdJump)
}

pub fn fsd_jump_v2_2_02(fields: &Map<String, Value>) -> Result<EventBody, serde_json::Error> {
    typed(fields, EventBody::FsdJumpV2202)
}

pub fn shutdown(fields: &Map<String, Value>) -> Result<EventBody, serde_json::Error> {
    typed(fields, EventBody::Shutdown)
}
