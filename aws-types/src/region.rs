/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! AWS region names

use std::borrow::Cow;
use std::fmt;

/// An AWS region name, such as `us-east-1`
///
/// The name is not checked against a list of known regions. The value read from `aws.region`,
/// `AWS_REGION`, or a profile's `region` key becomes a `Region` as-is.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Region(Cow<'static, str>);

impl Region {
    /// Region from a borrowed or owned name
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// Region from a name known at compile time, usable in `const` items
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }
}

impl AsRef<str> for Region {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod test {
    use super::Region;

    const US_WEST_2: Region = Region::from_static("us-west-2");

    #[test]
    fn owned_and_static_names_compare_equal() {
        assert_eq!(Region::new(String::from("us-west-2")), US_WEST_2);
        assert_ne!(Region::new("us-west-1"), US_WEST_2);
    }

    #[test]
    fn displays_the_bare_name() {
        assert_eq!(US_WEST_2.to_string(), "us-west-2");
        assert_eq!(US_WEST_2.as_ref(), "us-west-2");
        assert_eq!(format!("{:?}", US_WEST_2), "Region(\"us-west-2\")");
    }
}
