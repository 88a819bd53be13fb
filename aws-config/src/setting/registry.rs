/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use super::parse::{
    parse_bool, parse_endpoint_mode, parse_int, parse_region, parse_retry_mode, parse_string,
};
use super::{Setting, SettingKeys};
use crate::imds::EndpointMode;
use aws_types::region::Region;
use aws_types::retry::RetryMode;
use std::borrow::Cow;

const ACCESS_KEY_ID_KEYS: SettingKeys = SettingKeys::new("access key id")
    .system_property("aws.accessKeyId")
    .env("AWS_ACCESS_KEY_ID");
const SECRET_ACCESS_KEY_KEYS: SettingKeys = SettingKeys::new("secret access key")
    .system_property("aws.secretAccessKey")
    .env("AWS_SECRET_ACCESS_KEY");
const SESSION_TOKEN_KEYS: SettingKeys = SettingKeys::new("session token")
    .system_property("aws.sessionToken")
    .env("AWS_SESSION_TOKEN");
const REGION_KEYS: SettingKeys = SettingKeys::new("region")
    .system_property("aws.region")
    .env("AWS_REGION")
    .profile("region");
const PROFILE_KEYS: SettingKeys = SettingKeys::new("profile")
    .system_property("aws.profile")
    .env("AWS_PROFILE");
const CONFIG_FILE_KEYS: SettingKeys = SettingKeys::new("config file")
    .system_property("aws.configFile")
    .env("AWS_CONFIG_FILE");
const SHARED_CREDENTIALS_FILE_KEYS: SettingKeys = SettingKeys::new("shared credentials file")
    .system_property("aws.sharedCredentialsFile")
    .env("AWS_SHARED_CREDENTIALS_FILE");
const EC2_METADATA_DISABLED_KEYS: SettingKeys = SettingKeys::new("ec2 metadata disabled")
    .system_property("aws.disableEc2Metadata")
    .env("AWS_EC2_METADATA_DISABLED");
const EC2_METADATA_SERVICE_ENDPOINT_KEYS: SettingKeys =
    SettingKeys::new("ec2 metadata service endpoint")
        .system_property("aws.ec2MetadataServiceEndpoint")
        .env("AWS_EC2_METADATA_SERVICE_ENDPOINT")
        .profile("ec2_metadata_service_endpoint");
const EC2_METADATA_SERVICE_ENDPOINT_MODE_KEYS: SettingKeys =
    SettingKeys::new("ec2 metadata service endpoint mode")
        .system_property("aws.ec2MetadataServiceEndpointMode")
        .env("AWS_EC2_METADATA_SERVICE_ENDPOINT_MODE")
        .profile("ec2_metadata_service_endpoint_mode");
const ROLE_ARN_KEYS: SettingKeys = SettingKeys::new("role arn")
    .system_property("aws.roleArn")
    .env("AWS_ROLE_ARN")
    .profile("role_arn");
const ROLE_SESSION_NAME_KEYS: SettingKeys = SettingKeys::new("role session name")
    .system_property("aws.roleSessionName")
    .env("AWS_ROLE_SESSION_NAME")
    .profile("role_session_name");
const WEB_IDENTITY_TOKEN_FILE_KEYS: SettingKeys = SettingKeys::new("web identity token file")
    .system_property("aws.webIdentityTokenFile")
    .env("AWS_WEB_IDENTITY_TOKEN_FILE")
    .profile("web_identity_token_file");
const EXECUTION_ENV_KEYS: SettingKeys =
    SettingKeys::new("execution environment").env("AWS_EXECUTION_ENV");
const MAX_ATTEMPTS_KEYS: SettingKeys = SettingKeys::new("max attempts")
    .system_property("aws.maxAttempts")
    .env("AWS_MAX_ATTEMPTS")
    .profile("max_attempts");
const RETRY_MODE_KEYS: SettingKeys = SettingKeys::new("retry mode")
    .system_property("aws.retryMode")
    .env("AWS_RETRY_MODE")
    .profile("retry_mode");

/// Settings read by the AWS SDK
///
/// The system property and environment variable names are a public contract: external processes
/// configure the SDK by setting these exact names.
#[non_exhaustive]
#[derive(Debug)]
pub struct AwsSdkSetting;

impl AwsSdkSetting {
    /// `aws.accessKeyId` / `AWS_ACCESS_KEY_ID`
    pub const ACCESS_KEY_ID: Setting<Cow<'static, str>> =
        Setting::new(ACCESS_KEY_ID_KEYS, parse_string);

    /// `aws.secretAccessKey` / `AWS_SECRET_ACCESS_KEY`
    pub const SECRET_ACCESS_KEY: Setting<Cow<'static, str>> =
        Setting::new(SECRET_ACCESS_KEY_KEYS, parse_string);

    /// `aws.sessionToken` / `AWS_SESSION_TOKEN`
    pub const SESSION_TOKEN: Setting<Cow<'static, str>> =
        Setting::new(SESSION_TOKEN_KEYS, parse_string);

    /// `aws.region` / `AWS_REGION` / profile key `region`
    pub const REGION: Setting<Region> = Setting::new(REGION_KEYS, parse_region);

    /// `aws.profile` / `AWS_PROFILE`, defaults to `default`
    pub const PROFILE: Setting<Cow<'static, str>> =
        Setting::with_default(PROFILE_KEYS, Cow::Borrowed("default"), parse_string);

    /// `aws.configFile` / `AWS_CONFIG_FILE`, defaults to `~/.aws/config`
    pub const CONFIG_FILE: Setting<Cow<'static, str>> =
        Setting::with_default(CONFIG_FILE_KEYS, Cow::Borrowed("~/.aws/config"), parse_string);

    /// `aws.sharedCredentialsFile` / `AWS_SHARED_CREDENTIALS_FILE`
    ///
    /// Defaults to `~/.aws/credentials`.
    pub const SHARED_CREDENTIALS_FILE: Setting<Cow<'static, str>> = Setting::with_default(
        SHARED_CREDENTIALS_FILE_KEYS,
        Cow::Borrowed("~/.aws/credentials"),
        parse_string,
    );

    /// `aws.disableEc2Metadata` / `AWS_EC2_METADATA_DISABLED`, defaults to `false`
    pub const EC2_METADATA_DISABLED: Setting<bool> =
        Setting::with_default(EC2_METADATA_DISABLED_KEYS, false, parse_bool);

    /// `aws.ec2MetadataServiceEndpoint` / `AWS_EC2_METADATA_SERVICE_ENDPOINT`
    pub const EC2_METADATA_SERVICE_ENDPOINT: Setting<Cow<'static, str>> =
        Setting::new(EC2_METADATA_SERVICE_ENDPOINT_KEYS, parse_string);

    /// `aws.ec2MetadataServiceEndpointMode` / `AWS_EC2_METADATA_SERVICE_ENDPOINT_MODE`
    ///
    /// Defaults to `IPv4`.
    pub const EC2_METADATA_SERVICE_ENDPOINT_MODE: Setting<EndpointMode> = Setting::with_default(
        EC2_METADATA_SERVICE_ENDPOINT_MODE_KEYS,
        EndpointMode::IpV4,
        parse_endpoint_mode,
    );

    /// `aws.roleArn` / `AWS_ROLE_ARN`
    pub const ROLE_ARN: Setting<Cow<'static, str>> = Setting::new(ROLE_ARN_KEYS, parse_string);

    /// `aws.roleSessionName` / `AWS_ROLE_SESSION_NAME`
    pub const ROLE_SESSION_NAME: Setting<Cow<'static, str>> =
        Setting::new(ROLE_SESSION_NAME_KEYS, parse_string);

    /// `aws.webIdentityTokenFile` / `AWS_WEB_IDENTITY_TOKEN_FILE`
    pub const WEB_IDENTITY_TOKEN_FILE: Setting<Cow<'static, str>> =
        Setting::new(WEB_IDENTITY_TOKEN_FILE_KEYS, parse_string);

    /// `AWS_EXECUTION_ENV`, set by AWS compute environments such as Lambda
    pub const EXECUTION_ENV: Setting<Cow<'static, str>> =
        Setting::new(EXECUTION_ENV_KEYS, parse_string);

    /// `aws.maxAttempts` / `AWS_MAX_ATTEMPTS` / profile key `max_attempts`
    ///
    /// The value is not range checked here; see [`crate::retry_config`].
    pub const MAX_ATTEMPTS: Setting<i64> = Setting::new(MAX_ATTEMPTS_KEYS, parse_int);

    /// `aws.retryMode` / `AWS_RETRY_MODE` / profile key `retry_mode`
    pub const RETRY_MODE: Setting<RetryMode> = Setting::new(RETRY_MODE_KEYS, parse_retry_mode);

    /// Keys of every setting above
    pub const ALL: &'static [SettingKeys] = &[
        ACCESS_KEY_ID_KEYS,
        SECRET_ACCESS_KEY_KEYS,
        SESSION_TOKEN_KEYS,
        REGION_KEYS,
        PROFILE_KEYS,
        CONFIG_FILE_KEYS,
        SHARED_CREDENTIALS_FILE_KEYS,
        EC2_METADATA_DISABLED_KEYS,
        EC2_METADATA_SERVICE_ENDPOINT_KEYS,
        EC2_METADATA_SERVICE_ENDPOINT_MODE_KEYS,
        ROLE_ARN_KEYS,
        ROLE_SESSION_NAME_KEYS,
        WEB_IDENTITY_TOKEN_FILE_KEYS,
        EXECUTION_ENV_KEYS,
        MAX_ATTEMPTS_KEYS,
        RETRY_MODE_KEYS,
    ];
}
