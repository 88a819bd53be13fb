/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::error::InvalidValue;
use crate::provider_config::ProviderConfig;
use std::collections::HashMap;

mod normalize;
mod parse;
mod source;

pub use parse::ProfileParseError;

/// Read the shared config and credentials files and select a profile
///
/// The selected profile is the profile name set on `config`, if any, otherwise the resolved
/// [`PROFILE`](crate::AwsSdkSetting::PROFILE) setting. Properties in the credentials file take
/// precedence over properties of the same profile in the config file.
///
/// Missing or unreadable files are treated as empty. Files that cannot be parsed are an error.
pub fn load(config: &ProviderConfig) -> Result<ProfileSet, ProfileFileLoadError> {
    let source = source::load(config)?;
    let mut profiles = ProfileSet::empty(source.profile);
    for file in &source.files {
        let raw = tracing::info_span!("parse_profile_file", path = %file.path)
            .in_scope(|| parse::parse_profile_file(file))?;
        profiles = normalize::merge_in(profiles, raw, file.kind);
    }
    if profiles.get_profile(profiles.selected_profile()).is_none() {
        tracing::debug!(profile = %profiles.selected_profile(), "selected profile is not defined");
    }
    Ok(profiles)
}

/// Failure to load profile files
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ProfileFileLoadError {
    /// The profile name or a profile file location could not be resolved
    #[error("failed to determine which profile files to load")]
    InvalidSetting(#[from] InvalidValue),

    /// A profile file was not valid
    #[error(transparent)]
    ParseError(#[from] ProfileParseError),
}

/// Key-Value property pair
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Property {
    key: String,
    value: String,
}

impl Property {
    /// Value of this property
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Name of this property
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Creates a new property
    pub fn new(key: String, value: String) -> Self {
        Property { key, value }
    }
}

/// An individual configuration profile
///
/// An AWS config may be composed of a multiple named profiles within a [`ProfileSet`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Profile {
    name: String,
    properties: HashMap<String, Property>,
}

impl Profile {
    /// Create a new profile
    pub fn new(name: impl Into<String>, properties: HashMap<String, Property>) -> Self {
        Self {
            name: name.into(),
            properties,
        }
    }

    /// The name of this profile
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a reference to the property named `name`
    ///
    /// Property names are not case sensitive.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.properties
            .get(&name.to_ascii_lowercase())
            .map(|prop| prop.value())
    }

    /// Number of properties in this profile
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// True if this profile has no properties
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub(super) fn insert(&mut self, key: &str, value: &str) {
        let key = key.to_ascii_lowercase();
        if self.properties.contains_key(&key) {
            // values may be secrets, only log the key
            tracing::trace!(profile = %self.name, key = %key, "overwriting property");
        }
        self.properties
            .insert(key.clone(), Property::new(key, value.to_owned()));
    }
}

/// A parsed set of profiles with one of them selected
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ProfileSet {
    profiles: HashMap<String, Profile>,
    selected_profile: String,
}

impl ProfileSet {
    /// Create a profile set from `{ profile name: { key: value } }`
    ///
    /// # Example
    /// ```rust
    /// use aws_config::profile::ProfileSet;
    /// use std::collections::HashMap;
    /// let profiles = ProfileSet::new(
    ///     HashMap::from([("dev", HashMap::from([("region", "us-west-2")]))]),
    ///     "dev",
    /// );
    /// assert_eq!(profiles.get("region"), Some("us-west-2"));
    /// ```
    pub fn new(
        profiles: HashMap<&str, HashMap<&str, &str>>,
        selected_profile: impl Into<String>,
    ) -> Self {
        let mut base = Self::empty(selected_profile);
        for (name, properties) in profiles {
            let profile = base
                .profiles
                .entry(name.to_owned())
                .or_insert_with(|| Profile::new(name, HashMap::new()));
            for (k, v) in properties {
                profile.insert(k, v);
            }
        }
        base
    }

    pub(super) fn empty(selected_profile: impl Into<String>) -> Self {
        Self {
            profiles: HashMap::new(),
            selected_profile: selected_profile.into(),
        }
    }

    /// Retrieves a key-value pair from the currently selected profile
    pub fn get(&self, key: &str) -> Option<&str> {
        self.get_profile(&self.selected_profile)?.get(key)
    }

    /// Retrieve a named profile from the profile set
    pub fn get_profile(&self, profile_name: &str) -> Option<&Profile> {
        self.profiles.get(profile_name)
    }

    /// The name of the currently selected profile
    pub fn selected_profile(&self) -> &str {
        &self.selected_profile
    }

    /// Returns true if no profiles are contained in this profile set
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Returns the names of the profiles in this profile set
    pub fn profiles(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    pub(super) fn profile_mut(&mut self, name: &str) -> &mut Profile {
        self.profiles
            .entry(name.to_owned())
            .or_insert_with(|| Profile::new(name, HashMap::new()))
    }

    pub(super) fn remove_profile(&mut self, name: &str) -> Option<Profile> {
        self.profiles.remove(name)
    }
}
