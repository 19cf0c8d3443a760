// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tessera-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tessera and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;
use smol_str::SmolStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(SmolStr),
    Index(usize),
}

/// A path into externally supplied data, e.g. `user.name` or `$.items[0].title`.
///
/// The empty path (and `$` alone) addresses the whole value. Paths are parsed once at decode
/// time; evaluation lives in [`crate::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataPath {
    raw: String,
    segments: SmallVec<[PathSegment; 4]>,
}

impl DataPath {
    pub fn parse(input: &str) -> Result<Self, ParseDataPathError> {
        let body = match input.strip_prefix('$') {
            Some(rest) => rest.strip_prefix('.').unwrap_or(rest),
            None => input,
        };

        let mut segments = SmallVec::new();
        let mut rest = body;
        let mut expect_key = true;

        while !rest.is_empty() {
            if let Some(after_bracket) = rest.strip_prefix('[') {
                let (digits, tail) = after_bracket
                    .split_once(']')
                    .ok_or(ParseDataPathError::UnclosedIndex)?;
                let index = digits
                    .parse::<usize>()
                    .map_err(|_| ParseDataPathError::InvalidIndex(digits.to_owned()))?;
                segments.push(PathSegment::Index(index));
                rest = tail;
                expect_key = false;
                continue;
            }

            if !expect_key {
                rest = rest.strip_prefix('.').ok_or(ParseDataPathError::MissingSeparator)?;
            }

            let end = rest.find(['.', '[', ']']).unwrap_or(rest.len());
            let key = &rest[..end];
            if key.is_empty() {
                return Err(ParseDataPathError::EmptySegment);
            }
            if rest[end..].starts_with(']') {
                return Err(ParseDataPathError::UnexpectedBracket);
            }
            segments.push(PathSegment::Key(SmolStr::new(key)));
            rest = &rest[end..];
            expect_key = false;
        }

        Ok(Self {
            raw: input.to_owned(),
            segments,
        })
    }

    /// The path exactly as written in the document.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for DataPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for DataPath {
    type Err = ParseDataPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseDataPathError {
    #[error("data path contains an empty segment")]
    EmptySegment,
    #[error("data path index is missing its closing ']'")]
    UnclosedIndex,
    #[error("data path index {0:?} is not a non-negative integer")]
    InvalidIndex(String),
    #[error("data path has an unmatched ']'")]
    UnexpectedBracket,
    #[error("data path segments must be separated by '.'")]
    MissingSeparator,
}

#[cfg(test)]
mod tests {
    use super::{DataPath, ParseDataPathError, PathSegment};

    fn key(s: &str) -> PathSegment {
        PathSegment::Key(s.into())
    }

    #[test]
    fn parses_dotted_and_indexed_segments() {
        let path: DataPath = "$.items[2].title".parse().expect("parse");
        assert_eq!(
            path.segments(),
            &[key("items"), PathSegment::Index(2), key("title")]
        );
        assert_eq!(path.to_string(), "$.items[2].title");

        let path = DataPath::parse("user.name").expect("parse");
        assert_eq!(path.segments(), &[key("user"), key("name")]);

        let path = DataPath::parse("[0][1]").expect("parse");
        assert_eq!(path.segments(), &[PathSegment::Index(0), PathSegment::Index(1)]);
    }

    #[test]
    fn empty_and_dollar_address_the_root() {
        assert!(DataPath::parse("").expect("parse").is_root());
        assert!(DataPath::parse("$").expect("parse").is_root());
    }

    #[test]
    fn rejects_malformed_paths() {
        assert_eq!(DataPath::parse("a..b"), Err(ParseDataPathError::EmptySegment));
        assert_eq!(DataPath::parse("a[1"), Err(ParseDataPathError::UnclosedIndex));
        assert_eq!(
            DataPath::parse("a[x]"),
            Err(ParseDataPathError::InvalidIndex("x".to_owned()))
        );
        assert_eq!(DataPath::parse("a]"), Err(ParseDataPathError::UnexpectedBracket));
        assert_eq!(DataPath::parse("a[0]b"), Err(ParseDataPathError::MissingSeparator));
    }
}
