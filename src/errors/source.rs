// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Failures that are fatal for a whole event source.

use crate::errors::VersionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    /// The first line is missing or does not carry `gameversion`/`build`.
    #[error("Invalid journal header: {reason}")]
    InvalidHeader { reason: String },

    /// The header's version could not be normalized to a schema version.
    #[error("Unsupported journal version: {0}")]
    Version(#[from] VersionError),

    /// Underlying read failure (I/O, permissions, file deleted mid-read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Read or seek attempted on a source that is not open.
    #[error("Operation on a closed source")]
    Closed,
}

pub type SourceResult<T> = Result<T, SourceError>;
