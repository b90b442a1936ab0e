// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Errors raised while normalizing a reported game version.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    /// The reported version is not `M.m` or `M.m.p` and no build mapping matched.
    #[error("Malformed version string: '{value}'")]
    Malformed { value: String },
}
