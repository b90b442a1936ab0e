// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::SourceError;
use serde_json::Value;

/// Version information carried by the first line of a journal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub gameversion: String,
    pub build: String,
}

impl Header {
    /// Extracts `gameversion` and `build` from the header line.
    ///
    /// The header is otherwise an ordinary record; this only reads the two
    /// fields needed to pick schema versions.
    pub fn parse(line: &str) -> Result<Self, SourceError> {
        let invalid = |reason: String| SourceError::InvalidHeader { reason };

        let value: Value = serde_json::from_str(line.trim_end())
            .map_err(|e| invalid(format!("not valid JSON: {}", e)))?;
        let Value::Object(fields) = value else {
            return Err(invalid("not a JSON object".to_string()));
        };

        let field = |name: &str| -> Result<String, SourceError> {
            fields
                .get(name)
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| invalid(format!("missing '{}'", name)))
        };

        Ok(Self {
            gameversion: field("gameversion")?,
            build: field("build")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header() {
        let header = Header::parse(
            r#"{"timestamp":"2017-01-01T00:00:00Z","event":"Fileheader","part":1,"gameversion":"2.2","build":"r126898/r0"}"#,
        )
        .unwrap();
        assert_eq!(header.gameversion, "2.2");
        assert_eq!(header.build, "r126898/r0");
    }

    #[test]
    fn test_invalid_headers() {
        let cases = [
            ("", "not valid JSON"),
            ("{\"gameversion\":\"2.2\"", "not valid JSON"),
            ("[1,2]", "not a JSON object"),
            (r#"{"build":"r1/r0"}"#, "missing 'gameversion'"),
            (r#"{"gameversion":"2.2"}"#, "missing 'build'"),
            (r#"{"gameversion":2.2,"build":"r1/r0"}"#, "missing 'gameversion'"),
        ];

        for (line, expected) in cases {
            match Header::parse(line) {
                Err(SourceError::InvalidHeader { reason }) => {
                    assert!(reason.contains(expected), "'{}' -> '{}'", line, reason)
                }
                other => panic!("'{}' should be an invalid header, got {:?}", line, other),
            }
        }
    }
}
