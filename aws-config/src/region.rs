/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Resolve the AWS region
//!
//! The region is read from `aws.region`, then `AWS_REGION`, then the `region` key of the selected
//! profile. There is no default: callers decide what to do when no region is configured.

use crate::error::InvalidValue;
use crate::provider_config::ProviderConfig;
use crate::setting::AwsSdkSetting;
use aws_types::region::Region;

/// Resolve the region from `config`, or `None` if it is not configured anywhere
pub fn resolve_region(config: &ProviderConfig) -> Result<Option<Region>, InvalidValue> {
    let region = config.resolve(&AwsSdkSetting::REGION)?;
    match &region {
        Some(region) => tracing::debug!(region = %region, "resolved region"),
        None => tracing::debug!("no region configured"),
    }
    Ok(region)
}

#[cfg(test)]
mod test {
    use super::resolve_region;
    use crate::provider_config::ProviderConfig;
    use aws_types::os_shim_internal::{Env, Fs, SystemProperties};
    use aws_types::region::Region;
    use tracing_test::traced_test;

    #[test]
    #[traced_test]
    fn unset() {
        assert_eq!(resolve_region(&ProviderConfig::empty()).unwrap(), None);
        assert!(logs_contain("no region configured"));
    }

    #[test]
    fn precedence() {
        let config = ProviderConfig::empty()
            .with_env(Env::from_slice(&[("HOME", "/home"), ("AWS_REGION", "env-region")]))
            .with_fs(Fs::from_slice(&[(
                "/home/.aws/config",
                "[default]\nregion = profile-region",
            )]))
            .load_profile_files()
            .unwrap();
        assert_eq!(
            resolve_region(&config).unwrap(),
            Some(Region::from_static("env-region"))
        );

        let config = config
            .with_system_properties(SystemProperties::from_slice(&[("aws.region", "prop-region")]));
        assert_eq!(
            resolve_region(&config).unwrap(),
            Some(Region::new("prop-region"))
        );

        let config = config
            .with_env(Env::from_slice(&[("HOME", "/home")]))
            .with_system_properties(SystemProperties::from_slice(&[]));
        assert_eq!(
            resolve_region(&config).unwrap(),
            Some(Region::new("profile-region"))
        );
    }
}
