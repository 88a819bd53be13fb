/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::error::InvalidValue;
use crate::provider_config::ProviderConfig;
use crate::resolve::SettingResolver;
use crate::setting::{AwsSdkSetting, Setting};
use aws_types::os_shim_internal::{Env, Fs};
use std::borrow::Cow;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

/// In-memory source of profile data
pub(super) struct Source {
    /// Profile files in the order they are merged. Later files win.
    pub(super) files: Vec<File>,

    /// Profile to use
    pub(super) profile: String,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(super) enum FileKind {
    Config,
    Credentials,
}

/// In-memory profile file
pub(super) struct File {
    pub(super) kind: FileKind,
    pub(super) path: String,
    pub(super) contents: String,
}

/// Load a [`Source`] from the settings, environment, and file system of `config`
///
/// Profile file locations and the profile name never come from a profile file themselves.
pub(super) fn load(config: &ProviderConfig) -> Result<Source, InvalidValue> {
    let resolver = SettingResolver::standard();
    let config_path = resolve_path(&resolver, config, &AwsSdkSetting::CONFIG_FILE)?;
    let credentials_path =
        resolve_path(&resolver, config, &AwsSdkSetting::SHARED_CREDENTIALS_FILE)?;
    let profile = match config.profile_name_override() {
        Some(name) => name.to_owned(),
        None => resolver
            .resolve(&AwsSdkSetting::PROFILE, config)?
            .unwrap_or(Cow::Borrowed("default"))
            .into_owned(),
    };

    let config_file = tracing::info_span!("load_config_file").in_scope(|| {
        read(
            config.fs(),
            config.env(),
            FileKind::Config,
            &config_path,
            &AwsSdkSetting::CONFIG_FILE,
        )
    });
    let credentials_file = tracing::info_span!("load_credentials_file").in_scope(|| {
        read(
            config.fs(),
            config.env(),
            FileKind::Credentials,
            &credentials_path,
            &AwsSdkSetting::SHARED_CREDENTIALS_FILE,
        )
    });
    Ok(Source {
        files: vec![config_file, credentials_file],
        profile,
    })
}

fn resolve_path(
    resolver: &SettingResolver,
    config: &ProviderConfig,
    setting: &Setting<Cow<'static, str>>,
) -> Result<String, InvalidValue> {
    Ok(resolver
        .resolve(setting, config)?
        .unwrap_or_default()
        .into_owned())
}

/// Read a profile file, expanding a leading `~` to the home directory
///
/// A file that is missing or not valid UTF-8 is read as empty.
fn read(
    fs: &Fs,
    env: &Env,
    kind: FileKind,
    path: &str,
    setting: &Setting<Cow<'static, str>>,
) -> File {
    let overridden = setting.default_value().map(|default| &**default) != Some(path);
    let expanded = expand_home(path, env, Os::real());
    tracing::debug!(before = ?path, after = ?expanded, "home directory expanded");
    let data = match fs.read_to_end(&expanded) {
        Ok(data) => data,
        Err(e) => {
            match e.kind() {
                ErrorKind::NotFound if !overridden => {
                    tracing::info!(path = %path, "config file not found")
                }
                ErrorKind::NotFound => {
                    tracing::warn!(path = %path, setting = %setting.name(), "config file overridden via environment variable or system property not found")
                }
                _other => tracing::warn!(path = %path, error = %e, "failed to read config file"),
            };
            Default::default()
        }
    };
    let data = match String::from_utf8(data) {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!(path = %path, error = %e, "config file did not contain utf-8 encoded data");
            Default::default()
        }
    };
    tracing::info!(path = %path, size = ?data.len(), "config file loaded");
    File {
        kind,
        // only used in error messages
        path: expanded.to_string_lossy().into(),
        contents: data,
    }
}

fn expand_home(path: impl AsRef<Path>, env: &Env, os: Os) -> PathBuf {
    let path = path.as_ref();
    let mut components = path.components();
    match components.next() {
        None => path.into(),
        Some(Component::Normal(s)) if s == "~" => {
            let mut path = match home_dir(env, os) {
                Some(dir) => {
                    tracing::debug!(home = ?dir, "performing home directory substitution");
                    dir
                }
                None => {
                    tracing::warn!(
                        "could not determine home directory but home expansion was requested"
                    );
                    Default::default()
                }
            };
            // rewrite the path using system-specific path separators
            for component in components {
                path.push(component);
            }
            path
        }
        // paths set through settings already use the separators of the target platform
        _other => path.into(),
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Os {
    Windows,
    NotWindows,
}

impl Os {
    fn real() -> Self {
        match std::env::consts::OS {
            "windows" => Os::Windows,
            _ => Os::NotWindows,
        }
    }
}

/// Resolve a home directory given a set of environment variables
fn home_dir(env: &Env, os: Os) -> Option<PathBuf> {
    if let Ok(home) = env.get("HOME") {
        tracing::debug!(src = "HOME", "loaded home directory");
        return Some(PathBuf::from(home));
    }

    if os == Os::Windows {
        if let Ok(home) = env.get("USERPROFILE") {
            tracing::debug!(src = "USERPROFILE", "loaded home directory");
            return Some(PathBuf::from(home));
        }

        if let (Ok(mut drive), Ok(path)) = (env.get("HOMEDRIVE"), env.get("HOMEPATH")) {
            tracing::debug!(src = "HOMEDRIVE/HOMEPATH", "loaded home directory");
            drive.push_str(&path);
            return Some(drive.into());
        }
    }
    None
}

#[cfg(test)]
mod test {
    use super::{expand_home, home_dir, load, FileKind, Os};
    use crate::provider_config::ProviderConfig;
    use aws_types::os_shim_internal::{Env, Fs, SystemProperties};
    use std::path::PathBuf;
    use tracing_test::traced_test;

    #[test]
    fn only_expand_home_prefix() {
        // ~ is only expanded as a single component
        let env = Env::from_slice(&[("HOME", "/user/foo")]);
        assert_eq!(
            expand_home("~aws/config", &env, Os::NotWindows)
                .to_str()
                .unwrap(),
            "~aws/config"
        );
    }

    #[test]
    #[cfg(not(windows))]
    fn expands_leading_tilde() {
        let env = Env::from_slice(&[("HOME", "/user/foo")]);
        assert_eq!(
            expand_home("~/.aws/config", &env, Os::NotWindows),
            PathBuf::from("/user/foo/.aws/config")
        );
    }

    #[test]
    fn windows_home_fallbacks() {
        let env = Env::from_slice(&[("USERPROFILE", "C:\\Users\\foo")]);
        assert_eq!(home_dir(&env, Os::Windows), Some("C:\\Users\\foo".into()));
        assert_eq!(home_dir(&env, Os::NotWindows), None);

        let env = Env::from_slice(&[("HOMEDRIVE", "D:"), ("HOMEPATH", "\\foo")]);
        assert_eq!(home_dir(&env, Os::Windows), Some("D:\\foo".into()));
    }

    #[test]
    fn profile_name_precedence() {
        let config = ProviderConfig::empty();
        assert_eq!(load(&config).unwrap().profile, "default");

        let config = config.with_env(Env::from_slice(&[("AWS_PROFILE", "env")]));
        assert_eq!(load(&config).unwrap().profile, "env");

        let config = config
            .with_system_properties(SystemProperties::from_slice(&[("aws.profile", "prop")]));
        assert_eq!(load(&config).unwrap().profile, "prop");

        let config = config.with_profile_name("explicit");
        assert_eq!(load(&config).unwrap().profile, "explicit");
    }

    #[test]
    #[traced_test]
    fn files_are_read_in_order() {
        let config = ProviderConfig::empty()
            .with_env(Env::from_slice(&[
                ("HOME", "/home"),
                ("AWS_SHARED_CREDENTIALS_FILE", "/creds"),
            ]))
            .with_fs(Fs::from_slice(&[
                ("/home/.aws/config", "[default]"),
                ("/creds", "[default]\nregion = x"),
            ]));
        let source = load(&config).unwrap();
        let kinds: Vec<_> = source.files.iter().map(|f| f.kind).collect();
        assert_eq!(kinds, vec![FileKind::Config, FileKind::Credentials]);
        assert_eq!(source.files[1].contents, "[default]\nregion = x");
        assert!(logs_contain("config file loaded"));
    }

    #[test]
    #[traced_test]
    fn default_missing_file_is_not_a_warning() {
        let config = ProviderConfig::empty().with_env(Env::from_slice(&[("HOME", "/home")]));
        let source = load(&config).unwrap();
        assert!(source.files.iter().all(|f| f.contents.is_empty()));
        assert!(logs_contain("config file not found"));
        assert!(!logs_contain("overridden via environment variable"));
    }

    #[test]
    #[traced_test]
    fn non_utf8_file_is_empty() {
        let config = ProviderConfig::empty()
            .with_env(Env::from_slice(&[("AWS_CONFIG_FILE", "/config")]))
            .with_fs(Fs::from_raw_map(
                [("/config".into(), vec![0xff, 0xfe, 0xfd])]
                    .into_iter()
                    .collect(),
            ));
        let source = load(&config).unwrap();
        assert_eq!(source.files[0].contents, "");
        assert!(logs_contain("config file did not contain utf-8 encoded data"));
    }

    #[test]
    fn empty_file_location_reads_nothing() {
        let config = ProviderConfig::empty()
            .with_env(Env::from_slice(&[("AWS_CONFIG_FILE", "")]))
            .with_fs(Fs::from_slice(&[("/home/.aws/config", "[default]")]));
        let source = load(&config).unwrap();
        assert_eq!(source.files[0].path, "");
        assert_eq!(source.files[0].contents, "");
    }
}
