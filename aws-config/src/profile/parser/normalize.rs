/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use super::parse::RawProfileSet;
use super::source::FileKind;
use super::ProfileSet;

/// Normalize the profiles of one file and merge them into `base`
///
/// - In config files, `[profile foo]` names the profile `foo`. Other sections except `[default]`
///   are ignored.
/// - In config files, `[profile default]` takes priority over `[default]`.
/// - Credentials file sections are used as written.
/// - Profile names and property keys must be identifiers. Anything else is ignored.
/// - Profiles with identical names are merged. Properties merged later win.
pub(super) fn merge_in(
    mut base: ProfileSet,
    raw_profiles: RawProfileSet,
    kind: FileKind,
) -> ProfileSet {
    let mut default_has_profile_prefix = false;
    for (section, properties) in raw_profiles {
        let name = match (section, kind) {
            (any, FileKind::Credentials) => any,
            ("default", FileKind::Config) if default_has_profile_prefix => {
                tracing::warn!("profile `default` ignored because `[profile default]` was found which takes priority");
                continue;
            }
            ("default", FileKind::Config) => "default",
            (other, FileKind::Config) => match other
                .strip_prefix("profile")
                .filter(|rest| rest.starts_with([' ', '\t']))
                .map(str::trim)
            {
                Some("default") => {
                    if !default_has_profile_prefix {
                        if base.remove_profile("default").is_some() {
                            tracing::warn!("profile `default` ignored because `[profile default]` was found which takes priority");
                        }
                        default_has_profile_prefix = true;
                    }
                    "default"
                }
                Some(name) => name,
                None => {
                    tracing::warn!(profile = %other, "profile ignored: in config files, profiles MUST start with `profile `");
                    continue;
                }
            },
        };
        let name = match validate_identifier(name) {
            Some(name) => name,
            None => {
                tracing::warn!(name = ?name, "profile ignored because `{}` was not a valid identifier", name);
                continue;
            }
        };
        let profile = base.profile_mut(name);
        for (key, value) in properties {
            match validate_identifier(key) {
                Some(key) => profile.insert(key, &value),
                None => {
                    tracing::warn!(profile = %name, key = ?key, "key ignored because `{}` was not a valid identifier", key);
                }
            }
        }
    }
    base
}

/// Identifiers must match `[A-Za-z0-9_\-/.%@:+]+`
fn validate_identifier(input: &str) -> Option<&str> {
    (!input.is_empty()
        && input.chars().all(|ch| {
            ch.is_ascii_alphanumeric() || ['_', '-', '/', '.', '%', '@', ':', '+'].contains(&ch)
        }))
    .then(|| input)
}
