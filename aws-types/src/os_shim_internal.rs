/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Abstractions for testing code that interacts with the operating system:
//! - Reading environment variables
//! - Reading process-level system properties
//! - Reading from the file system

use std::collections::HashMap;
use std::env::VarError;
use std::ffi::OsString;
use std::fmt;
use std::path::Path;
use std::sync::{Arc, RwLock};

/// File system abstraction
///
/// Simple abstraction enabling in-memory mocking of the file system
///
/// # Example
/// Construct a file system which delegates to `std::fs`:
/// ```rust
/// let fs = aws_types::os_shim_internal::Fs::real();
/// ```
///
/// Construct an in-memory file system for testing:
/// ```rust
/// let fs = aws_types::os_shim_internal::Fs::from_slice(&[
///     ("/home/.aws/config", "[default]\nregion = us-east-1"),
/// ]);
/// assert!(fs.read_to_end("/home/.aws/config").is_ok());
/// ```
#[derive(Clone)]
pub struct Fs(Arc<fs::Inner>);

impl Default for Fs {
    fn default() -> Self {
        Fs::real()
    }
}

impl fmt::Debug for Fs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_ref() {
            fs::Inner::Real => f.write_str("Fs::Real"),
            fs::Inner::Fake { fs } => f
                .debug_struct("Fs::Fake")
                .field("files", &fs.keys().collect::<Vec<_>>())
                .finish(),
        }
    }
}

impl Fs {
    /// A file system that delegates to `std::fs`
    pub fn real() -> Self {
        Fs(Arc::new(fs::Inner::Real))
    }

    /// An in-memory file system keyed by raw paths
    pub fn from_raw_map(fs: HashMap<OsString, Vec<u8>>) -> Self {
        Fs(Arc::new(fs::Inner::Fake { fs }))
    }

    /// An in-memory file system keyed by path strings
    pub fn from_map(data: HashMap<String, Vec<u8>>) -> Self {
        let fs = data.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Fs(Arc::new(fs::Inner::Fake { fs }))
    }

    /// An in-memory file system from `(path, contents)` pairs
    pub fn from_slice<'a>(files: &[(&'a str, &'a str)]) -> Self {
        let fs = files
            .iter()
            .map(|(path, contents)| (OsString::from(path), contents.as_bytes().to_vec()))
            .collect();
        Fs(Arc::new(fs::Inner::Fake { fs }))
    }

    /// Read the full contents of the file at `path`
    pub fn read_to_end(&self, path: impl AsRef<Path>) -> std::io::Result<Vec<u8>> {
        use fs::Inner;
        let path = path.as_ref();
        match self.0.as_ref() {
            Inner::Real => std::fs::read(path),
            Inner::Fake { fs } => fs
                .get(path.as_os_str())
                .cloned()
                .ok_or_else(|| std::io::ErrorKind::NotFound.into()),
        }
    }
}

mod fs {
    use std::collections::HashMap;
    use std::ffi::OsString;

    pub(super) enum Inner {
        Real,
        Fake { fs: HashMap<OsString, Vec<u8>> },
    }
}

/// Environment variable abstraction
///
/// Environment variables are global to a process, and, as such, are difficult to test with a multi-
/// threaded test runner like Rust's. This enables loading environment variables either from the
/// actual process environment ([`std::env::var`](std::env::var)) or from a hash map.
///
/// Process environments are cheap to clone:
/// - Faked process environments are wrapped in an internal Arc
/// - Real process environments are pointer-sized
#[derive(Clone)]
pub struct Env(Arc<env::Inner>);

impl Default for Env {
    fn default() -> Self {
        Self::real()
    }
}

impl fmt::Debug for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_ref() {
            env::Inner::Real => f.write_str("Env::Real"),
            // values may hold secrets, only print the names
            env::Inner::Fake(map) => f
                .debug_struct("Env::Fake")
                .field("vars", &map.keys().collect::<Vec<_>>())
                .finish(),
        }
    }
}

impl Env {
    /// Look up a single environment variable
    pub fn get(&self, k: &str) -> Result<String, VarError> {
        use env::Inner;
        match self.0.as_ref() {
            Inner::Real => std::env::var(k),
            Inner::Fake(map) => match map.get(k) {
                Some(value) => value.clone().into_string().map_err(VarError::NotUnicode),
                None => Err(VarError::NotPresent),
            },
        }
    }

    /// All environment variables visible to this environment
    ///
    /// Variables whose name or value is not valid unicode are skipped.
    pub fn vars(&self) -> HashMap<String, String> {
        self.vars_os()
            .into_iter()
            .filter_map(|(k, v)| Some((k, v.into_string().ok()?)))
            .collect()
    }

    fn vars_os(&self) -> HashMap<String, OsString> {
        use env::Inner;
        match self.0.as_ref() {
            Inner::Real => std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v)))
                .collect(),
            Inner::Fake(map) => map.clone(),
        }
    }

    /// Create a fake process environment from a slice of tuples.
    ///
    /// # Example
    /// ```rust
    /// use aws_types::os_shim_internal::Env;
    /// let mock_env = Env::from_slice(&[
    ///     ("HOME", "/home/myname"),
    ///     ("AWS_REGION", "us-west-2")
    /// ]);
    /// assert_eq!(mock_env.get("HOME").unwrap(), "/home/myname");
    /// ```
    pub fn from_slice<'a>(vars: &[(&'a str, &'a str)]) -> Self {
        use env::Inner;
        Self(Arc::new(Inner::Fake(
            vars.iter()
                .map(|(k, v)| (k.to_string(), OsString::from(v)))
                .collect(),
        )))
    }

    /// Create a process environment that uses the real process environment
    ///
    /// Calls will be delegated to [`std::env::var`](std::env::var).
    pub fn real() -> Self {
        Self(Arc::new(env::Inner::Real))
    }

    /// Freeze the current contents of this environment
    ///
    /// Later changes to the process environment are not visible through the returned `Env`.
    /// Values that are not valid unicode are kept, so they stay present in the snapshot.
    pub fn snapshot(&self) -> Self {
        Self::from(self.vars_os())
    }
}

impl From<HashMap<String, String>> for Env {
    fn from(hash_map: HashMap<String, String>) -> Self {
        Self::from(
            hash_map
                .into_iter()
                .map(|(k, v)| (k, OsString::from(v)))
                .collect::<HashMap<_, _>>(),
        )
    }
}

impl From<HashMap<String, OsString>> for Env {
    fn from(hash_map: HashMap<String, OsString>) -> Self {
        Self(Arc::new(env::Inner::Fake(hash_map)))
    }
}

mod env {
    use std::collections::HashMap;
    use std::ffi::OsString;

    pub(super) enum Inner {
        Real,
        Fake(HashMap<String, OsString>),
    }
}

lazy_static::lazy_static! {
    static ref PROCESS_PROPERTIES: RwLock<HashMap<String, String>> = RwLock::new(HashMap::new());
}

/// Set a process-wide system property
///
/// System properties take precedence over environment variables when resolving SDK settings.
/// Applications typically populate them once at startup.
pub fn set_system_property(key: impl Into<String>, value: impl Into<String>) {
    let (key, value) = (key.into(), value.into());
    tracing::debug!(key = %key, "setting system property");
    PROCESS_PROPERTIES
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .insert(key, value);
}

/// Remove a process-wide system property, returning its previous value
pub fn clear_system_property(key: &str) -> Option<String> {
    PROCESS_PROPERTIES
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .remove(key)
}

/// System property abstraction
///
/// System properties are process-level `key=value` pairs with dotted lower-camel-case names
/// (`aws.profile`, `aws.retryMode`). They are read either from the process-wide table
/// ([`set_system_property`]) or from a hash map.
#[derive(Clone)]
pub struct SystemProperties(Arc<properties::Inner>);

impl Default for SystemProperties {
    fn default() -> Self {
        Self::real()
    }
}

impl fmt::Debug for SystemProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_ref() {
            properties::Inner::Process => f.write_str("SystemProperties::Process"),
            properties::Inner::Fake(map) => f
                .debug_struct("SystemProperties::Fake")
                .field("keys", &map.keys().collect::<Vec<_>>())
                .finish(),
        }
    }
}

impl SystemProperties {
    /// Look up a single system property
    pub fn get(&self, k: &str) -> Option<String> {
        use properties::Inner;
        match self.0.as_ref() {
            Inner::Process => PROCESS_PROPERTIES
                .read()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .get(k)
                .cloned(),
            Inner::Fake(map) => map.get(k).cloned(),
        }
    }

    /// All system properties
    pub fn all(&self) -> HashMap<String, String> {
        use properties::Inner;
        match self.0.as_ref() {
            Inner::Process => PROCESS_PROPERTIES
                .read()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .clone(),
            Inner::Fake(map) => map.clone(),
        }
    }

    /// System properties backed by the process-wide table
    pub fn real() -> Self {
        Self(Arc::new(properties::Inner::Process))
    }

    /// Create fake system properties from a slice of tuples.
    ///
    /// # Example
    /// ```rust
    /// use aws_types::os_shim_internal::SystemProperties;
    /// let props = SystemProperties::from_slice(&[("aws.profile", "dev")]);
    /// assert_eq!(props.get("aws.profile").as_deref(), Some("dev"));
    /// ```
    pub fn from_slice<'a>(props: &[(&'a str, &'a str)]) -> Self {
        Self::from(
            props
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        )
    }

    /// Collect `-Dkey=value` flags from command line arguments
    ///
    /// Arguments that are not of that form are ignored. A flag without `=` sets an empty value.
    ///
    /// # Example
    /// ```rust
    /// use aws_types::os_shim_internal::SystemProperties;
    /// let props = SystemProperties::from_args(["app", "-Daws.region=us-west-2", "--verbose"]);
    /// assert_eq!(props.get("aws.region").as_deref(), Some("us-west-2"));
    /// ```
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let props = args
            .into_iter()
            .filter_map(|arg| {
                let flag = arg.as_ref().strip_prefix("-D")?;
                let (key, value) = flag.split_once('=').unwrap_or((flag, ""));
                (!key.is_empty()).then(|| (key.to_string(), value.to_string()))
            })
            .collect::<HashMap<_, _>>();
        Self::from(props)
    }

    /// Freeze the current contents of these properties
    pub fn snapshot(&self) -> Self {
        Self::from(self.all())
    }
}

impl From<HashMap<String, String>> for SystemProperties {
    fn from(hash_map: HashMap<String, String>) -> Self {
        Self(Arc::new(properties::Inner::Fake(hash_map)))
    }
}

mod properties {
    use std::collections::HashMap;

    pub(super) enum Inner {
        Process,
        Fake(HashMap<String, String>),
    }
}
