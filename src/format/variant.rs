// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tessera-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tessera and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde_json::{Map, Value};

use super::record::{kind_of, Site};
use super::DecodeError;

/// Picks the single recognised case out of a variant-tagged record.
///
/// Keys outside `cases` are ignored; zero or several recognised keys are malformed.
pub(crate) fn case_of<'v>(
    value: &'v Value,
    cases: &[&'static str],
    site: Site<'_>,
    field: &'static str,
) -> Result<(&'static str, &'v Value), DecodeError> {
    let Value::Object(record) = value else {
        return Err(site.malformed(
            field,
            format!("expected a tagged record, found {}", kind_of(value)),
        ));
    };

    let mut found = None;
    for &case in cases {
        if let Some(payload) = record.get(case) {
            if let Some((first, _)) = found {
                return Err(site.malformed(
                    field,
                    format!("tagged record has both `{first}` and `{case}`"),
                ));
            }
            found = Some((case, payload));
        }
    }

    found.ok_or_else(|| {
        site.malformed(
            field,
            format!("tagged record has none of {}", cases.join(", ")),
        )
    })
}

pub(crate) fn tagged(case: &str, payload: Value) -> Value {
    let mut record = Map::with_capacity(1);
    record.insert(case.to_owned(), payload);
    Value::Object(record)
}
