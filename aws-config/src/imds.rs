/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! EC2 Instance Metadata Service (IMDS) settings
//!
//! Only the configuration of the IMDS client is resolved here. The client itself lives elsewhere.

use crate::error::InvalidValue;
use crate::provider_config::ProviderConfig;
use crate::setting::AwsSdkSetting;
use std::fmt;
use std::str::FromStr;

/// IP version used to reach IMDS
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointMode {
    /// IPv4 mode, `http://169.254.169.254`. This is the default.
    IpV4,
    /// IPv6 mode, `http://[fd00:ec2::254]`
    IpV6,
}

impl EndpointMode {
    /// The canonical name of this mode
    pub fn as_str(&self) -> &'static str {
        match self {
            EndpointMode::IpV4 => "IPv4",
            EndpointMode::IpV6 => "IPv6",
        }
    }

    /// The IMDS endpoint used for this mode when no endpoint is configured
    pub fn endpoint(&self) -> &'static str {
        match self {
            EndpointMode::IpV4 => "http://169.254.169.254",
            EndpointMode::IpV6 => "http://[fd00:ec2::254]",
        }
    }
}

impl fmt::Display for EndpointMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure to parse an [`EndpointMode`] from a string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{token}` is not a valid endpoint mode. Valid values are [`IPv4`, `IPv6`]")]
pub struct EndpointModeParseError {
    token: String,
}

impl FromStr for EndpointMode {
    type Err = EndpointModeParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            _ if value.eq_ignore_ascii_case("ipv4") => Ok(EndpointMode::IpV4),
            _ if value.eq_ignore_ascii_case("ipv6") => Ok(EndpointMode::IpV6),
            other => Err(EndpointModeParseError {
                token: other.to_owned(),
            }),
        }
    }
}

/// Resolved IMDS client settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImdsConfig {
    disabled: bool,
    endpoint: String,
}

impl ImdsConfig {
    /// Whether IMDS must not be contacted
    pub fn disabled(&self) -> bool {
        self.disabled
    }

    /// The endpoint to send IMDS requests to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Resolve IMDS settings from `config`
///
/// An explicitly configured endpoint wins over the endpoint implied by the endpoint mode.
pub fn resolve_imds_config(config: &ProviderConfig) -> Result<ImdsConfig, InvalidValue> {
    let disabled = config
        .resolve(&AwsSdkSetting::EC2_METADATA_DISABLED)?
        .unwrap_or_default();
    let endpoint = match config.resolve(&AwsSdkSetting::EC2_METADATA_SERVICE_ENDPOINT)? {
        Some(endpoint) => endpoint.into_owned(),
        None => config
            .resolve(&AwsSdkSetting::EC2_METADATA_SERVICE_ENDPOINT_MODE)?
            .unwrap_or(EndpointMode::IpV4)
            .endpoint()
            .to_owned(),
    };
    tracing::debug!(disabled, endpoint = %endpoint, "resolved IMDS config");
    Ok(ImdsConfig { disabled, endpoint })
}

#[cfg(test)]
mod test {
    use super::{resolve_imds_config, EndpointMode};
    use crate::provider_config::ProviderConfig;
    use aws_types::os_shim_internal::{Env, Fs, SystemProperties};

    fn config(env: &[(&str, &str)], props: &[(&str, &str)]) -> ProviderConfig {
        ProviderConfig::empty()
            .with_env(Env::from_slice(env))
            .with_system_properties(SystemProperties::from_slice(props))
    }

    #[test]
    fn endpoint_mode_parsing() {
        assert_eq!("IPv4".parse::<EndpointMode>(), Ok(EndpointMode::IpV4));
        assert_eq!("ipv6".parse::<EndpointMode>(), Ok(EndpointMode::IpV6));
        let err = "IPv5".parse::<EndpointMode>().unwrap_err();
        assert!(err.to_string().starts_with("`IPv5` is not a valid endpoint mode"));
    }

    #[test]
    fn defaults() {
        let imds = resolve_imds_config(&config(&[], &[])).unwrap();
        assert!(!imds.disabled());
        assert_eq!(imds.endpoint(), "http://169.254.169.254");
    }

    #[test]
    fn mode_selects_endpoint() {
        let imds = resolve_imds_config(&config(
            &[("AWS_EC2_METADATA_SERVICE_ENDPOINT_MODE", "IPv6")],
            &[],
        ))
        .unwrap();
        assert_eq!(imds.endpoint(), "http://[fd00:ec2::254]");
    }

    #[test]
    fn explicit_endpoint_wins_over_mode() {
        let imds = resolve_imds_config(&config(
            &[
                ("AWS_EC2_METADATA_SERVICE_ENDPOINT_MODE", "IPv6"),
                ("AWS_EC2_METADATA_DISABLED", "TRUE"),
            ],
            &[("aws.ec2MetadataServiceEndpoint", "http://localhost:1234")],
        ))
        .unwrap();
        assert!(imds.disabled());
        assert_eq!(imds.endpoint(), "http://localhost:1234");
    }

    #[test]
    fn invalid_endpoint_mode_is_an_error() {
        let err = resolve_imds_config(&config(
            &[("AWS_EC2_METADATA_SERVICE_ENDPOINT_MODE", "IPv5")],
            &[],
        ))
        .expect_err("invalid mode");
        assert_eq!(err.key(), "AWS_EC2_METADATA_SERVICE_ENDPOINT_MODE");
    }

    #[test]
    fn endpoint_from_profile() {
        let config = config(&[("HOME", "/home")], &[])
            .with_fs(Fs::from_slice(&[(
                "/home/.aws/config",
                "[default]\nec2_metadata_service_endpoint_mode = IPv6",
            )]))
            .load_profile_files()
            .expect("valid profile");
        let imds = resolve_imds_config(&config).unwrap();
        assert_eq!(imds.endpoint(), "http://[fd00:ec2::254]");
    }
}
