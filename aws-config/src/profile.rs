/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Load settings from the shared config and credentials files
//!
//! These files are typically stored in `~/.aws/config` and `~/.aws/credentials`. Their locations
//! can be overridden with the [`CONFIG_FILE`](crate::AwsSdkSetting::CONFIG_FILE) and
//! [`SHARED_CREDENTIALS_FILE`](crate::AwsSdkSetting::SHARED_CREDENTIALS_FILE) settings, and the
//! profile read from them is chosen by the [`PROFILE`](crate::AwsSdkSetting::PROFILE) setting.

mod parser;

pub use parser::{load, Profile, ProfileFileLoadError, ProfileParseError, ProfileSet, Property};
