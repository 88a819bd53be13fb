/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Typed SDK settings and the keys they are read from

use crate::error::InvalidValue;
use crate::resolve::SettingResolver;
use aws_types::environment::EnvironmentSource;
use std::fmt;

pub mod parse;
mod registry;

pub use parse::ParseSettingError;
pub use registry::AwsSdkSetting;

/// The names a setting can be found under
///
/// Every key is optional. A setting with no keys can only ever resolve to its default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingKeys {
    name: &'static str,
    system_property: Option<&'static str>,
    environment_variable: Option<&'static str>,
    profile_key: Option<&'static str>,
}

impl SettingKeys {
    /// Keys for a setting named `name`, with no sources set
    ///
    /// `name` is only used for logging and errors.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            system_property: None,
            environment_variable: None,
            profile_key: None,
        }
    }

    /// Set the system property to read
    pub const fn system_property(mut self, key: &'static str) -> Self {
        self.system_property = Some(key);
        self
    }

    /// Set the environment variable to read
    pub const fn env(mut self, key: &'static str) -> Self {
        self.environment_variable = Some(key);
        self
    }

    /// Set the profile key to read
    pub const fn profile(mut self, key: &'static str) -> Self {
        self.profile_key = Some(key);
        self
    }

    /// Name of the setting
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// System property key, e.g. `aws.profile`
    pub fn system_property_key(&self) -> Option<&'static str> {
        self.system_property
    }

    /// Environment variable name, e.g. `AWS_PROFILE`
    pub fn environment_variable_key(&self) -> Option<&'static str> {
        self.environment_variable
    }

    /// Key in the shared config and credentials files, e.g. `retry_mode`
    pub fn profile_key(&self) -> Option<&'static str> {
        self.profile_key
    }
}

/// Coercion from a raw string into a setting's type
pub type ParseFn<T> = fn(&str) -> Result<T, ParseSettingError>;

/// A named, typed setting
///
/// Settings are static definitions: where to look, how to coerce what is found, and what to
/// fall back to. See [`AwsSdkSetting`] for the settings read by the SDK.
///
/// # Examples
/// ```rust
/// use aws_config::setting::{parse, Setting, SettingKeys};
/// use aws_types::environment::PlatformEnvironment;
/// use aws_types::os_shim_internal::{Env, SystemProperties};
///
/// const USE_FIPS: Setting<bool> = Setting::with_default(
///     SettingKeys::new("use fips")
///         .system_property("aws.useFipsEndpoint")
///         .env("AWS_USE_FIPS_ENDPOINT"),
///     false,
///     parse::parse_bool,
/// );
///
/// let platform = PlatformEnvironment::new(
///     Env::from_slice(&[("AWS_USE_FIPS_ENDPOINT", "TRUE")]),
///     SystemProperties::from_slice(&[]),
/// );
/// assert_eq!(USE_FIPS.resolve(&platform).unwrap(), Some(true));
/// ```
#[derive(Clone)]
pub struct Setting<T> {
    keys: SettingKeys,
    default: Option<T>,
    parse: ParseFn<T>,
}

impl<T: fmt::Debug> fmt::Debug for Setting<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Setting")
            .field("keys", &self.keys)
            .field("default", &self.default)
            .finish()
    }
}

impl<T> Setting<T> {
    /// A setting without a default value
    pub const fn new(keys: SettingKeys, parse: ParseFn<T>) -> Self {
        Self {
            keys,
            default: None,
            parse,
        }
    }

    /// A setting that falls back to `default` when it is not configured anywhere
    pub const fn with_default(keys: SettingKeys, default: T, parse: ParseFn<T>) -> Self {
        Self {
            keys,
            default: Some(default),
            parse,
        }
    }

    /// The keys this setting is read from
    pub fn keys(&self) -> &SettingKeys {
        &self.keys
    }

    /// Name of the setting
    pub fn name(&self) -> &'static str {
        self.keys.name
    }

    /// The default value, if any
    pub fn default_value(&self) -> Option<&T> {
        self.default.as_ref()
    }

    /// Coerce a raw value into this setting's type
    pub fn parse(&self, raw: &str) -> Result<T, ParseSettingError> {
        (self.parse)(raw)
    }
}

impl<T: Clone> Setting<T> {
    /// Resolve this setting from system properties, then environment variables, then its default
    ///
    /// To include the shared config files, use
    /// [`ProviderConfig::resolve`](crate::ProviderConfig::resolve).
    pub fn resolve(&self, source: &dyn EnvironmentSource) -> Result<Option<T>, InvalidValue> {
        SettingResolver::standard().resolve(self, source)
    }
}

#[cfg(test)]
mod test {
    use super::{parse, Setting, SettingKeys};
    use aws_types::environment::PlatformEnvironment;
    use aws_types::os_shim_internal::{Env, SystemProperties};

    const NOWHERE: Setting<i64> = Setting::new(SettingKeys::new("nowhere"), parse::parse_int);
    const NOWHERE_WITH_DEFAULT: Setting<i64> =
        Setting::with_default(SettingKeys::new("nowhere"), 7, parse::parse_int);

    fn everything_set() -> PlatformEnvironment {
        PlatformEnvironment::new(
            Env::from_slice(&[("", "1"), ("AWS_NOWHERE", "2")]),
            SystemProperties::from_slice(&[("", "3"), ("aws.nowhere", "4")]),
        )
    }

    #[test]
    fn setting_without_keys_or_default_is_absent() {
        assert_eq!(NOWHERE.resolve(&everything_set()).unwrap(), None);
    }

    #[test]
    fn setting_without_keys_uses_default() {
        assert_eq!(NOWHERE_WITH_DEFAULT.resolve(&everything_set()).unwrap(), Some(7));
    }

    #[test]
    fn keys_builder() {
        let keys = SettingKeys::new("thing")
            .system_property("aws.thing")
            .env("AWS_THING")
            .profile("thing");
        assert_eq!(keys.name(), "thing");
        assert_eq!(keys.system_property_key(), Some("aws.thing"));
        assert_eq!(keys.environment_variable_key(), Some("AWS_THING"));
        assert_eq!(keys.profile_key(), Some("thing"));
    }
}
