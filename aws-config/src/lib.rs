/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Layered resolution of AWS SDK runtime settings.
//!
//! Every setting in [`AwsSdkSetting`] is resolved by checking, in order:
//! 1. system properties (`aws.profile`)
//! 2. environment variables (`AWS_PROFILE`)
//! 3. the selected profile of the shared config and credentials files, when loaded
//! 4. the setting's default
//!
//! The first source where the setting is present wins. A present value that cannot be coerced to
//! the setting's type is an [`InvalidValue`](error::InvalidValue) error; resolution never falls
//! through to a lower-precedence source.
//!
//! # Examples
//! ```rust
//! use aws_config::AwsSdkSetting;
//! use aws_types::environment::PlatformEnvironment;
//! use aws_types::os_shim_internal::{Env, SystemProperties};
//!
//! let platform = PlatformEnvironment::new(
//!     Env::from_slice(&[("AWS_PROFILE", "env")]),
//!     SystemProperties::from_slice(&[("aws.profile", "jvm")]),
//! );
//! let profile = AwsSdkSetting::PROFILE.resolve(&platform).unwrap();
//! assert_eq!(profile.as_deref(), Some("jvm"));
//! ```

#![warn(
    missing_debug_implementations,
    missing_docs,
    rustdoc::all,
    unreachable_pub
)]

pub mod error;
pub mod imds;
pub mod profile;
pub mod provider_config;
pub mod region;
pub mod resolve;
pub mod retry_config;
pub mod setting;

pub use provider_config::ProviderConfig;
pub use setting::{AwsSdkSetting, Setting};
