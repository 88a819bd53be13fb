/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Resolve the retry behavior of SDK clients
//!
//! The retry mode and the maximum number of attempts are resolved independently. Either can come
//! from a system property (`aws.retryMode`, `aws.maxAttempts`), an environment variable
//! (`AWS_RETRY_MODE`, `AWS_MAX_ATTEMPTS`), or the selected profile (`retry_mode`, `max_attempts`).

use crate::error::InvalidValue;
use crate::provider_config::ProviderConfig;
use crate::setting::AwsSdkSetting;
use aws_types::retry::RetryConfig;
use std::convert::TryFrom;

/// Failure to resolve a [`RetryConfig`]
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RetryConfigError {
    /// A retry setting could not be coerced to its type
    #[error(transparent)]
    InvalidValue(#[from] InvalidValue),

    /// Max attempts was set to an integer that is not a usable attempt count
    #[error("it is invalid to set max attempts to {value}. Unset it or set it to an integer greater than or equal to one.")]
    InvalidMaxAttempts {
        /// The configured number of attempts
        value: i64,
    },
}

/// Resolve retry settings from `config`
///
/// Unset settings fall back to [`RetryConfig::default`]: standard mode with 3 attempts.
///
/// # Examples
/// ```rust
/// use aws_config::retry_config::resolve_retry_config;
/// use aws_config::ProviderConfig;
/// use aws_types::os_shim_internal::SystemProperties;
/// use aws_types::retry::RetryMode;
///
/// let config = ProviderConfig::empty()
///     .with_system_properties(SystemProperties::from_slice(&[("aws.retryMode", "legacy")]));
/// let retry_config = resolve_retry_config(&config).unwrap();
/// assert_eq!(retry_config.mode(), RetryMode::Legacy);
/// assert_eq!(retry_config.max_attempts(), 3);
/// ```
pub fn resolve_retry_config(config: &ProviderConfig) -> Result<RetryConfig, RetryConfigError> {
    let mut retry_config = RetryConfig::default();
    if let Some(mode) = config.resolve(&AwsSdkSetting::RETRY_MODE)? {
        retry_config = retry_config.with_retry_mode(mode);
    }
    if let Some(max_attempts) = config.resolve(&AwsSdkSetting::MAX_ATTEMPTS)? {
        retry_config = retry_config.with_max_attempts(validate_max_attempts(max_attempts)?);
    }
    tracing::debug!(mode = %retry_config.mode(), max_attempts = retry_config.max_attempts(), "resolved retry config");
    Ok(retry_config)
}

fn validate_max_attempts(max_attempts: i64) -> Result<u32, RetryConfigError> {
    match u32::try_from(max_attempts) {
        Ok(0) | Err(_) => Err(RetryConfigError::InvalidMaxAttempts {
            value: max_attempts,
        }),
        Ok(max_attempts) => Ok(max_attempts),
    }
}
