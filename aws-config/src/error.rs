/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Errors produced while resolving settings

use crate::resolve::{Origin, RawValue};
use crate::setting::ParseSettingError;

/// A setting was present but its value could not be coerced to the setting's type
///
/// Resolution stops at the first source where a setting is present. When that value is invalid,
/// this error is returned rather than falling back to a lower-precedence source or the default.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value for {origin} `{key}`: {source}")]
pub struct InvalidValue {
    key: String,
    value: String,
    origin: Origin,
    #[source]
    source: ParseSettingError,
}

impl InvalidValue {
    pub(crate) fn new(raw: RawValue, source: ParseSettingError) -> Self {
        let (key, value, origin) = raw.into_parts();
        Self {
            key,
            value,
            origin,
            source,
        }
    }

    /// The key the invalid value was found under, e.g. `AWS_MAX_ATTEMPTS`
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The raw value that failed coercion
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Where the value was found
    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    /// Why the value could not be coerced
    pub fn err(&self) -> &ParseSettingError {
        &self.source
    }
}
