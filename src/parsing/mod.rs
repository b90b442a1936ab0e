// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod header;
mod record_parser;

pub use header::Header;
pub use record_parser::RecordParser;
