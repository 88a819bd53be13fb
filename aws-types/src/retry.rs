/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Retry behavior configuration

use std::fmt;
use std::str::FromStr;

/// The retry policy a client uses when a request fails
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RetryMode {
    /// Retry behavior of older SDK versions, kept for backwards compatibility.
    Legacy,

    /// The default retry behavior used by SDK clients, rate-limited with a configurable number of
    /// max attempts.
    #[default]
    Standard,

    /// This behavior includes the functionality of standard mode but with automatic client-side
    /// throttling.
    Adaptive,
}

const VALID_RETRY_MODES: &[RetryMode] =
    &[RetryMode::Legacy, RetryMode::Standard, RetryMode::Adaptive];

impl RetryMode {
    /// The canonical name of this mode, as written in config files and environment variables
    pub fn as_str(&self) -> &'static str {
        match self {
            RetryMode::Legacy => "legacy",
            RetryMode::Standard => "standard",
            RetryMode::Adaptive => "adaptive",
        }
    }
}

impl fmt::Display for RetryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure to parse a [`RetryMode`] from a string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "`{token}` is not a valid retry mode. Valid options are: {}",
    VALID_RETRY_MODES.iter().map(RetryMode::as_str).collect::<Vec<_>>().join(", ")
)]
pub struct RetryModeParseError {
    token: String,
}

impl RetryModeParseError {
    /// The string that could not be parsed
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl FromStr for RetryMode {
    type Err = RetryModeParseError;

    /// Parse a retry mode, ignoring ASCII case
    ///
    /// ```rust
    /// use aws_types::retry::RetryMode;
    /// assert_eq!("Adaptive".parse::<RetryMode>().unwrap(), RetryMode::Adaptive);
    /// assert!("eventually".parse::<RetryMode>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VALID_RETRY_MODES
            .iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| RetryModeParseError {
                token: s.to_string(),
            })
    }
}

const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Retry policy configuration
///
/// `max_attempts` counts the initial request, so `1` disables retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    mode: RetryMode,
    max_attempts: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            mode: RetryMode::default(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl RetryConfig {
    /// Standard retry mode with 3 max attempts
    pub fn new() -> Self {
        Default::default()
    }

    /// Override the retry mode
    pub fn with_retry_mode(mut self, mode: RetryMode) -> Self {
        self.mode = mode;
        self
    }

    /// Override the maximum number of attempts
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// The retry mode
    pub fn mode(&self) -> RetryMode {
        self.mode
    }

    /// The maximum number of attempts, including the initial request
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

#[cfg(test)]
mod test {
    use super::{RetryConfig, RetryMode};
    use proptest::prelude::*;

    #[test]
    fn retry_mode_parses_canonical_names() {
        assert_eq!("legacy".parse::<RetryMode>(), Ok(RetryMode::Legacy));
        assert_eq!("standard".parse::<RetryMode>(), Ok(RetryMode::Standard));
        assert_eq!("adaptive".parse::<RetryMode>(), Ok(RetryMode::Adaptive));
    }

    #[test]
    fn retry_mode_parse_error_names_token() {
        let err = "fancy".parse::<RetryMode>().expect_err("not a retry mode");
        assert_eq!(err.token(), "fancy");
        assert_eq!(
            err.to_string(),
            "`fancy` is not a valid retry mode. Valid options are: legacy, standard, adaptive"
        );
    }

    #[test]
    fn retry_mode_does_not_trim() {
        assert!(" standard".parse::<RetryMode>().is_err());
    }

    #[test]
    fn default_retry_config() {
        let config = RetryConfig::new();
        assert_eq!(config.mode(), RetryMode::Standard);
        assert_eq!(config.max_attempts(), 3);
        assert_eq!(
            RetryConfig::new()
                .with_retry_mode(RetryMode::Legacy)
                .with_max_attempts(1)
                .max_attempts(),
            1
        );
    }

    proptest! {
        #[test]
        fn retry_mode_ignores_case(mode in prop::sample::select(vec![
            RetryMode::Legacy,
            RetryMode::Standard,
            RetryMode::Adaptive,
        ]), upper in prop::collection::vec(any::<bool>(), 8)) {
            let mixed: String = mode
                .as_str()
                .chars()
                .zip(upper.iter().cycle())
                .map(|(c, up)| if *up { c.to_ascii_uppercase() } else { c })
                .collect();
            prop_assert_eq!(mixed.parse::<RetryMode>(), Ok(mode));
        }
    }
}
