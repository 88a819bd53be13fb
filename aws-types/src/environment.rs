/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Read-only access to the process environment and system properties.

use crate::os_shim_internal::{Env, SystemProperties};
use std::collections::HashMap;
use std::env::VarError;

/// Read-only view of the settings sources of a process
///
/// Implementations must be free of side effects.
pub trait EnvironmentSource: Send + Sync {
    /// All environment variables
    fn env_vars(&self) -> HashMap<String, String>;

    /// Look up a single environment variable
    ///
    /// A variable that is set to a value that is not valid unicode is
    /// [`VarError::NotUnicode`], never [`VarError::NotPresent`].
    fn env_var(&self, name: &str) -> Result<String, VarError>;

    /// All system properties
    fn system_properties(&self) -> HashMap<String, String>;

    /// Look up a single system property
    fn system_property(&self, name: &str) -> Option<String>;
}

/// [`EnvironmentSource`] backed by an [`Env`] and [`SystemProperties`]
///
/// # Example
/// ```rust
/// use aws_types::environment::{EnvironmentSource, PlatformEnvironment};
/// use aws_types::os_shim_internal::{Env, SystemProperties};
///
/// let platform = PlatformEnvironment::new(
///     Env::from_slice(&[("AWS_PROFILE", "env")]),
///     SystemProperties::from_slice(&[("aws.profile", "jvm")]),
/// );
/// assert_eq!(platform.env_var("AWS_PROFILE").as_deref(), Ok("env"));
/// assert_eq!(platform.system_property("aws.profile").as_deref(), Some("jvm"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct PlatformEnvironment {
    env: Env,
    properties: SystemProperties,
}

impl PlatformEnvironment {
    /// Create a platform environment from its parts
    pub fn new(env: Env, properties: SystemProperties) -> Self {
        Self { env, properties }
    }

    /// The real process environment and process-wide system properties
    pub fn real() -> Self {
        Self::new(Env::real(), SystemProperties::real())
    }

    /// Freeze environment variables and system properties as they are right now
    pub fn snapshot(&self) -> Self {
        Self::new(self.env.snapshot(), self.properties.snapshot())
    }

    /// The environment variables of this platform
    pub fn env(&self) -> &Env {
        &self.env
    }

    /// The system properties of this platform
    pub fn properties(&self) -> &SystemProperties {
        &self.properties
    }
}

impl EnvironmentSource for PlatformEnvironment {
    fn env_vars(&self) -> HashMap<String, String> {
        self.env.vars()
    }

    fn env_var(&self, name: &str) -> Result<String, VarError> {
        self.env.get(name)
    }

    fn system_properties(&self) -> HashMap<String, String> {
        self.properties.all()
    }

    fn system_property(&self, name: &str) -> Option<String> {
        self.properties.get(name)
    }
}
