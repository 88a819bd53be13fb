/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Coercion of raw setting values
//!
//! Every function here is pure. Values are never trimmed or otherwise normalized before parsing.

use crate::imds::{EndpointMode, EndpointModeParseError};
use aws_types::region::Region;
use aws_types::retry::{RetryMode, RetryModeParseError};
use std::borrow::Cow;
use std::num::ParseIntError;

/// A raw setting value could not be coerced into the setting's type
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseSettingError {
    /// The value was not `true` or `false`
    #[error("`{value}` is not a valid boolean. Expected `true` or `false`")]
    InvalidBoolean {
        /// The rejected value
        value: String,
    },

    /// The value was not a base-10 integer
    #[error("`{value}` is not a valid base-10 integer")]
    InvalidInteger {
        /// The rejected value
        value: String,
        /// Why the value was rejected
        #[source]
        source: ParseIntError,
    },

    /// The value did not name a retry mode
    #[error(transparent)]
    InvalidRetryMode(#[from] RetryModeParseError),

    /// The value did not name an IMDS endpoint mode
    #[error(transparent)]
    InvalidEndpointMode(#[from] EndpointModeParseError),

    /// The value was not valid unicode
    #[error("`{value}` is not valid unicode")]
    NotUnicode {
        /// The rejected value, with invalid sequences replaced by `U+FFFD`
        value: String,
    },
}

/// Identity coercion
pub fn parse_string(value: &str) -> Result<Cow<'static, str>, ParseSettingError> {
    Ok(Cow::Owned(value.to_owned()))
}

/// `true` or `false`, ignoring ASCII case
///
/// ```rust
/// use aws_config::setting::parse::parse_bool;
/// assert_eq!(parse_bool("TRUE"), Ok(true));
/// assert_eq!(parse_bool("False"), Ok(false));
/// assert!(parse_bool("1").is_err());
/// ```
pub fn parse_bool(value: &str) -> Result<bool, ParseSettingError> {
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(ParseSettingError::InvalidBoolean {
            value: value.to_owned(),
        })
    }
}

/// A base-10 integer
///
/// The range of the value is left to the consumer of the setting.
pub fn parse_int(value: &str) -> Result<i64, ParseSettingError> {
    value
        .parse::<i64>()
        .map_err(|source| ParseSettingError::InvalidInteger {
            value: value.to_owned(),
            source,
        })
}

/// A [`RetryMode`], ignoring ASCII case
pub fn parse_retry_mode(value: &str) -> Result<RetryMode, ParseSettingError> {
    Ok(value.parse::<RetryMode>()?)
}

/// An IMDS [`EndpointMode`], ignoring ASCII case
pub fn parse_endpoint_mode(value: &str) -> Result<EndpointMode, ParseSettingError> {
    Ok(value.parse::<EndpointMode>()?)
}

/// A [`Region`]
pub fn parse_region(value: &str) -> Result<Region, ParseSettingError> {
    Ok(Region::new(value.to_owned()))
}

#[cfg(test)]
mod test {
    use super::{parse_bool, parse_int, parse_retry_mode, parse_string, ParseSettingError};
    use aws_types::retry::RetryMode;
    use proptest::prelude::*;

    #[test]
    fn booleans_are_strict() {
        for truthy in ["true", "TRUE", "True", "tRuE"] {
            assert_eq!(parse_bool(truthy), Ok(true), "{}", truthy);
        }
        for falsy in ["false", "FALSE", "False"] {
            assert_eq!(parse_bool(falsy), Ok(false), "{}", falsy);
        }
        for invalid in ["1", "0", "yes", "no", "", " true", "truee"] {
            assert_eq!(
                parse_bool(invalid),
                Err(ParseSettingError::InvalidBoolean {
                    value: invalid.to_owned()
                }),
                "{}",
                invalid
            );
        }
    }

    #[test]
    fn integers() {
        assert_eq!(parse_int("5"), Ok(5));
        assert_eq!(parse_int("-2"), Ok(-2));
        for invalid in ["5.0", "five", "", "0x10", "1e3"] {
            let err = parse_int(invalid).expect_err("not an integer");
            assert!(
                matches!(&err, ParseSettingError::InvalidInteger { value, .. } if value == invalid),
                "{:?}",
                err
            );
        }
        assert_eq!(
            parse_int("banana").unwrap_err().to_string(),
            "`banana` is not a valid base-10 integer"
        );
    }

    #[test]
    fn retry_modes() {
        assert_eq!(parse_retry_mode("LEGACY"), Ok(RetryMode::Legacy));
        let err = parse_retry_mode("aggressive").expect_err("unknown mode");
        assert!(err.to_string().contains("`aggressive`"));
    }

    proptest! {
        #[test]
        fn strings_are_never_rejected(value in ".*") {
            prop_assert_eq!(parse_string(&value).unwrap(), value.as_str());
        }

        #[test]
        fn integers_parse_their_own_rendering(n in any::<i64>()) {
            prop_assert_eq!(parse_int(&n.to_string()), Ok(n));
        }

        #[test]
        fn only_true_and_false_are_booleans(value in "[a-zA-Z0-9 ]{0,8}") {
            let lower = value.to_ascii_lowercase();
            let parsed = parse_bool(&value);
            match lower.as_str() {
                "true" => prop_assert_eq!(parsed, Ok(true)),
                "false" => prop_assert_eq!(parsed, Ok(false)),
                _ => prop_assert!(parsed.is_err()),
            }
        }
    }
}
