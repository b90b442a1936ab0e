// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod resolver;
mod version;

pub use resolver::{
    BuildNumbers, CompatibleVersionSet, VersionResolver, BASELINE_V2_2_00, BASELINE_V2_2_02,
};
pub use version::SchemaVersion;
