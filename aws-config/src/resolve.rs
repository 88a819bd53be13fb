/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Precedence-ordered setting resolution
//!
//! A [`SettingResolver`] holds an ordered list of [`SettingLookup`] strategies. The first strategy
//! that finds a setting decides its value, whether or not that value turns out to be valid.

use crate::error::InvalidValue;
use crate::profile::ProfileSet;
use crate::setting::{ParseSettingError, Setting, SettingKeys};
use aws_types::environment::EnvironmentSource;
use std::env::VarError;
use std::ffi::OsString;
use std::fmt;
use std::sync::Arc;

/// Where a raw setting value was found
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// A system property, e.g. `aws.profile`
    SystemProperty,
    /// An environment variable, e.g. `AWS_PROFILE`
    EnvironmentVariable,
    /// A property of a profile in the shared config or credentials files
    Profile {
        /// Name of the profile the value was read from
        name: String,
    },
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::SystemProperty => write!(f, "system property"),
            Origin::EnvironmentVariable => write!(f, "environment variable"),
            Origin::Profile { name } => write!(f, "profile `{}` key", name),
        }
    }
}

/// An uncoerced setting value, along with the key and source it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawValue {
    value: String,
    key: String,
    origin: Origin,
    unicode: bool,
}

impl RawValue {
    /// Create a raw value found under `key` in `origin`
    pub fn new(value: impl Into<String>, key: impl Into<String>, origin: Origin) -> Self {
        Self {
            value: value.into(),
            key: key.into(),
            origin,
            unicode: true,
        }
    }

    /// Create a raw value from an OS string that may not be valid unicode
    ///
    /// A value that is not unicode is still present. It fails coercion for every setting type.
    pub fn from_os_string(value: OsString, key: impl Into<String>, origin: Origin) -> Self {
        match value.into_string() {
            Ok(value) => Self::new(value, key, origin),
            Err(value) => Self {
                value: value.to_string_lossy().into_owned(),
                key: key.into(),
                origin,
                unicode: false,
            },
        }
    }

    /// The value as found, lossily converted if it was not valid unicode
    pub fn value(&self) -> &str {
        &self.value
    }

    /// False if the value was not valid unicode
    pub fn is_unicode(&self) -> bool {
        self.unicode
    }

    fn coerce<T>(&self, setting: &Setting<T>) -> Result<T, ParseSettingError> {
        if self.unicode {
            setting.parse(&self.value)
        } else {
            Err(ParseSettingError::NotUnicode {
                value: self.value.clone(),
            })
        }
    }

    /// The key the value was found under
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Where the value was found
    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    pub(crate) fn into_parts(self) -> (String, String, Origin) {
        (self.key, self.value, self.origin)
    }
}

/// A single level of the precedence chain
///
/// Implementations report whether a setting is present in their source. They never coerce values,
/// so a present-but-invalid value is still "found".
pub trait SettingLookup: Send + Sync + fmt::Debug {
    /// Look up the raw value for `keys`, or `None` if this source does not have it
    fn lookup(&self, keys: &SettingKeys, source: &dyn EnvironmentSource) -> Option<RawValue>;
}

/// Reads settings from system properties
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemPropertyLookup;

impl SettingLookup for SystemPropertyLookup {
    fn lookup(&self, keys: &SettingKeys, source: &dyn EnvironmentSource) -> Option<RawValue> {
        let key = keys.system_property_key()?;
        let value = source.system_property(key)?;
        Some(RawValue::new(value, key, Origin::SystemProperty))
    }
}

/// Reads settings from environment variables
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvironmentVariableLookup;

impl SettingLookup for EnvironmentVariableLookup {
    fn lookup(&self, keys: &SettingKeys, source: &dyn EnvironmentSource) -> Option<RawValue> {
        let key = keys.environment_variable_key()?;
        match source.env_var(key) {
            Ok(value) => Some(RawValue::new(value, key, Origin::EnvironmentVariable)),
            Err(VarError::NotUnicode(value)) => Some(RawValue::from_os_string(
                value,
                key,
                Origin::EnvironmentVariable,
            )),
            Err(VarError::NotPresent) => None,
        }
    }
}

/// Reads settings from the selected profile of already loaded profile files
#[derive(Debug, Clone)]
pub struct ProfileFileLookup {
    profiles: Arc<ProfileSet>,
}

impl ProfileFileLookup {
    /// Look settings up in the selected profile of `profiles`
    pub fn new(profiles: impl Into<Arc<ProfileSet>>) -> Self {
        Self {
            profiles: profiles.into(),
        }
    }
}

impl SettingLookup for ProfileFileLookup {
    fn lookup(&self, keys: &SettingKeys, _source: &dyn EnvironmentSource) -> Option<RawValue> {
        let key = keys.profile_key()?;
        let value = self.profiles.get(key)?;
        Some(RawValue::new(
            value,
            key,
            Origin::Profile {
                name: self.profiles.selected_profile().to_owned(),
            },
        ))
    }
}

/// Resolve settings by checking a series of sources in order
///
/// # Examples
/// ```rust
/// use aws_config::resolve::{EnvironmentVariableLookup, SettingResolver, SystemPropertyLookup};
/// use aws_config::AwsSdkSetting;
/// use aws_types::environment::PlatformEnvironment;
/// use aws_types::os_shim_internal::{Env, SystemProperties};
///
/// // environment variables win over system properties with this chain
/// let resolver =
///     SettingResolver::first_try(EnvironmentVariableLookup).or_else(SystemPropertyLookup);
/// let platform = PlatformEnvironment::new(
///     Env::from_slice(&[("AWS_MAX_ATTEMPTS", "2")]),
///     SystemProperties::from_slice(&[("aws.maxAttempts", "5")]),
/// );
/// assert_eq!(resolver.resolve(&AwsSdkSetting::MAX_ATTEMPTS, &platform).unwrap(), Some(2));
/// ```
#[derive(Debug)]
pub struct SettingResolver {
    lookups: Vec<Box<dyn SettingLookup>>,
}

impl Default for SettingResolver {
    fn default() -> Self {
        Self::standard()
    }
}

impl SettingResolver {
    /// A resolver with no sources. Every setting resolves to its default.
    pub fn empty() -> Self {
        Self {
            lookups: Vec::new(),
        }
    }

    /// Create a resolver that starts by checking `lookup`
    pub fn first_try(lookup: impl SettingLookup + 'static) -> Self {
        Self::empty().or_else(lookup)
    }

    /// Add a lower-precedence source to the chain
    pub fn or_else(mut self, lookup: impl SettingLookup + 'static) -> Self {
        self.lookups.push(Box::new(lookup));
        self
    }

    /// System properties, then environment variables
    pub fn standard() -> Self {
        Self::first_try(SystemPropertyLookup).or_else(EnvironmentVariableLookup)
    }

    /// System properties, then environment variables, then the selected profile of `profiles`
    pub fn with_profile(profiles: impl Into<Arc<ProfileSet>>) -> Self {
        Self::standard().or_else(ProfileFileLookup::new(profiles))
    }

    /// Find the raw value of a setting from the highest precedence source that has it
    pub fn load(&self, keys: &SettingKeys, source: &dyn EnvironmentSource) -> Option<RawValue> {
        self.lookups.iter().find_map(|lookup| {
            let found = lookup.lookup(keys, source);
            tracing::trace!(setting = keys.name(), lookup = ?lookup, found = found.is_some(), "checked source");
            found
        })
    }

    /// Resolve a setting
    ///
    /// Returns the coerced value from the first source that has the setting, otherwise the
    /// setting's default, otherwise `None`. If the first source that has the setting holds a
    /// value that cannot be coerced, resolution fails: later sources and the default are not
    /// consulted.
    pub fn resolve<T: Clone>(
        &self,
        setting: &Setting<T>,
        source: &dyn EnvironmentSource,
    ) -> Result<Option<T>, InvalidValue> {
        match self.load(setting.keys(), source) {
            Some(raw) => match raw.coerce(setting) {
                Ok(value) => {
                    tracing::debug!(setting = setting.name(), origin = %raw.origin(), key = raw.key(), "resolved setting");
                    Ok(Some(value))
                }
                Err(err) => {
                    tracing::debug!(setting = setting.name(), origin = %raw.origin(), key = raw.key(), error = %err, "invalid setting value");
                    Err(InvalidValue::new(raw, err))
                }
            },
            None => {
                tracing::debug!(
                    setting = setting.name(),
                    has_default = setting.default_value().is_some(),
                    "setting not configured"
                );
                Ok(setting.default_value().cloned())
            }
        }
    }
}
