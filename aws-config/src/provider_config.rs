/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Configuration options shared by setting consumers

use crate::error::InvalidValue;
use crate::profile::{ProfileFileLoadError, ProfileSet};
use crate::resolve::SettingResolver;
use crate::setting::Setting;
use aws_types::environment::{EnvironmentSource, PlatformEnvironment};
use aws_types::os_shim_internal::{Env, Fs, SystemProperties};
use std::collections::HashMap;
use std::env::VarError;
use std::sync::Arc;

/// The sources settings are resolved from
///
/// A `ProviderConfig` bundles the process environment, system properties, and file system, plus
/// the profile files once [`load_profile_files`](ProviderConfig::load_profile_files) is called.
/// It is cheap to clone and safe to share between threads.
///
/// # Examples
/// ```rust
/// use aws_config::{AwsSdkSetting, ProviderConfig};
/// use aws_types::os_shim_internal::{Env, Fs, SystemProperties};
///
/// let config = ProviderConfig::empty()
///     .with_env(Env::from_slice(&[("HOME", "/home/me"), ("AWS_PROFILE", "dev")]))
///     .with_fs(Fs::from_slice(&[(
///         "/home/me/.aws/config",
///         "[profile dev]\nretry_mode = adaptive",
///     )]))
///     .load_profile_files()
///     .expect("valid profile files");
///
/// let mode = config.resolve(&AwsSdkSetting::RETRY_MODE).unwrap();
/// assert_eq!(mode, Some(aws_types::retry::RetryMode::Adaptive));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ProviderConfig {
    platform: PlatformEnvironment,
    fs: Fs,
    profile_name_override: Option<String>,
    profiles: Option<Arc<ProfileSet>>,
}

impl ProviderConfig {
    /// Read from the real process environment, process-wide system properties, and file system
    pub fn new() -> Self {
        Self::default()
    }

    /// A configuration where nothing is set and no files exist
    pub fn empty() -> Self {
        Self {
            platform: PlatformEnvironment::new(
                Env::from_slice(&[]),
                SystemProperties::from_slice(&[]),
            ),
            fs: Fs::from_slice(&[]),
            profile_name_override: None,
            profiles: None,
        }
    }

    /// Freeze environment variables and system properties as they are right now
    ///
    /// Settings resolved from the returned config do not observe later changes to the process.
    pub fn snapshot(self) -> Self {
        Self {
            platform: self.platform.snapshot(),
            ..self
        }
    }

    /// Override the environment variables
    pub fn with_env(self, env: Env) -> Self {
        Self {
            platform: PlatformEnvironment::new(env, self.platform.properties().clone()),
            ..self
        }
    }

    /// Override the system properties
    pub fn with_system_properties(self, properties: SystemProperties) -> Self {
        Self {
            platform: PlatformEnvironment::new(self.platform.env().clone(), properties),
            ..self
        }
    }

    /// Override the file system profile files are read from
    pub fn with_fs(self, fs: Fs) -> Self {
        Self { fs, ..self }
    }

    /// Select a profile by name
    ///
    /// Takes precedence over the [`PROFILE`](crate::AwsSdkSetting::PROFILE) setting.
    pub fn with_profile_name(self, profile_name: impl Into<String>) -> Self {
        Self {
            profile_name_override: Some(profile_name.into()),
            ..self
        }
    }

    /// Read and parse the shared config and credentials files
    ///
    /// Once loaded, [`resolve`](ProviderConfig::resolve) consults the selected profile after
    /// system properties and environment variables. Missing files are treated as empty.
    pub fn load_profile_files(self) -> Result<Self, ProfileFileLoadError> {
        let profiles = crate::profile::load(&self)?;
        Ok(self.with_profiles(profiles))
    }

    /// Use already loaded profiles
    pub fn with_profiles(self, profiles: impl Into<Arc<ProfileSet>>) -> Self {
        Self {
            profiles: Some(profiles.into()),
            ..self
        }
    }

    pub(crate) fn env(&self) -> &Env {
        self.platform.env()
    }

    pub(crate) fn fs(&self) -> &Fs {
        &self.fs
    }

    pub(crate) fn profile_name_override(&self) -> Option<&str> {
        self.profile_name_override.as_deref()
    }

    /// The loaded profiles
    ///
    /// `None` until [`load_profile_files`](ProviderConfig::load_profile_files) is called.
    pub fn profiles(&self) -> Option<&ProfileSet> {
        self.profiles.as_deref()
    }

    /// The resolver used by [`resolve`](ProviderConfig::resolve)
    pub fn resolver(&self) -> SettingResolver {
        match &self.profiles {
            Some(profiles) => SettingResolver::with_profile(profiles.clone()),
            None => SettingResolver::standard(),
        }
    }

    /// Resolve `setting` from this configuration
    ///
    /// `None` means the setting is not configured anywhere and has no default. Consumers should
    /// apply their own fallback in that case.
    pub fn resolve<T: Clone>(&self, setting: &Setting<T>) -> Result<Option<T>, InvalidValue> {
        self.resolver().resolve(setting, self)
    }
}

impl EnvironmentSource for ProviderConfig {
    fn env_vars(&self) -> HashMap<String, String> {
        self.platform.env_vars()
    }

    fn env_var(&self, name: &str) -> Result<String, VarError> {
        self.platform.env_var(name)
    }

    fn system_properties(&self) -> HashMap<String, String> {
        self.platform.system_properties()
    }

    fn system_property(&self, name: &str) -> Option<String> {
        self.platform.system_property(name)
    }
}

#[cfg(test)]
mod test {
    use super::ProviderConfig;
    use crate::setting::AwsSdkSetting;
    use aws_types::environment::EnvironmentSource;
    use aws_types::os_shim_internal::{Env, Fs, SystemProperties};

    #[test]
    fn without_profile_files_only_properties_and_env_are_read() {
        let config = ProviderConfig::empty()
            .with_env(Env::from_slice(&[("HOME", "/home")]))
            .with_fs(Fs::from_slice(&[("/home/.aws/config", "[default]\nregion = us-east-2")]));
        assert_eq!(config.resolve(&AwsSdkSetting::REGION).unwrap(), None);

        let config = config.load_profile_files().unwrap();
        assert_eq!(
            config
                .resolve(&AwsSdkSetting::REGION)
                .unwrap()
                .map(|r| r.to_string()),
            Some("us-east-2".to_string())
        );
    }

    #[test]
    fn overrides_keep_other_parts() {
        let config = ProviderConfig::empty()
            .with_env(Env::from_slice(&[("AWS_REGION", "us-east-1")]))
            .with_system_properties(SystemProperties::from_slice(&[("aws.profile", "dev")]));
        assert_eq!(config.env_var("AWS_REGION").as_deref(), Ok("us-east-1"));
        assert_eq!(config.system_property("aws.profile").as_deref(), Some("dev"));
        assert_eq!(config.env_vars().len(), 1);
        assert_eq!(config.system_properties().len(), 1);
    }

    #[test]
    fn snapshot_of_fakes_is_equivalent() {
        let config = ProviderConfig::empty()
            .with_env(Env::from_slice(&[("AWS_MAX_ATTEMPTS", "4")]))
            .snapshot();
        assert_eq!(config.resolve(&AwsSdkSetting::MAX_ATTEMPTS).unwrap(), Some(4));
    }
}
