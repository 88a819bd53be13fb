/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Profile file parsing
//!
//! A profile file is a series of `[section]` headers, each followed by `key = value` properties.
//! Lines starting with `#` or `;` are comments. In property values, a `#` or `;` preceded by
//! whitespace starts a trailing comment. Indented lines continue the value of the previous
//! property.

use super::source::File;
use std::borrow::Cow;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{self, Display, Formatter};

/// A set of profiles that still carries the section names and keys exactly as written
pub(super) type RawProfileSet<'a> = HashMap<&'a str, HashMap<&'a str, Cow<'a, str>>>;

const WHITESPACE: &[char] = &[' ', '\t'];
const COMMENT: &[char] = &['#', ';'];

/// Location of a parse error
#[derive(Debug, Clone, Eq, PartialEq)]
struct Location {
    line_number: usize,
    path: String,
}

/// An error encountered while parsing a profile file
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ProfileParseError {
    location: Location,
    message: String,
}

impl ProfileParseError {
    /// The file the error was found in
    pub fn path(&self) -> &str {
        &self.location.path
    }

    /// The 1-based line number of the error
    pub fn line_number(&self) -> usize {
        self.location.line_number
    }

    /// What was wrong with the line
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for ProfileParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "error parsing {} on line {}:\n  {}",
            self.location.path, self.location.line_number, self.message
        )
    }
}

impl Error for ProfileParseError {}

enum State<'a> {
    Starting,
    ReadingProfile {
        profile: &'a str,
        property: Option<&'a str>,
    },
}

struct Parser<'a> {
    data: RawProfileSet<'a>,
    state: State<'a>,
    location: Location,
}

/// Parse `file` into a [`RawProfileSet`]
///
/// Section names and keys are returned as written. Normalizing them is a separate step.
pub(super) fn parse_profile_file(file: &File) -> Result<RawProfileSet<'_>, ProfileParseError> {
    let mut parser = Parser {
        data: HashMap::new(),
        state: State::Starting,
        location: Location {
            line_number: 0,
            path: file.path.clone(),
        },
    };
    parser.parse_profile(&file.contents)?;
    Ok(parser.data)
}

impl<'a> Parser<'a> {
    fn parse_profile(&mut self, file: &'a str) -> Result<(), ProfileParseError> {
        for (line_number, line) in file.lines().enumerate() {
            self.location.line_number = line_number + 1;
            if is_empty_line(line) || is_comment_line(line) {
                continue;
            }
            if line.starts_with('[') {
                self.read_profile_line(line)?;
            } else if line.starts_with(WHITESPACE) {
                self.read_property_continuation(line)?;
            } else {
                self.read_property_line(line)?;
            }
        }
        Ok(())
    }

    /// `[profile name]`, optionally followed by a comment
    fn read_profile_line(&mut self, line: &'a str) -> Result<(), ProfileParseError> {
        let line = strip_comment(line, false).trim_end();
        let name = line
            .strip_prefix('[')
            .and_then(|line| line.strip_suffix(']'))
            .ok_or_else(|| self.make_error("profile definition must end with ']'"))?
            .trim_matches(WHITESPACE);
        if name.is_empty() {
            return Err(self.make_error("profile name must not be empty"));
        }
        self.data.entry(name).or_default();
        self.state = State::ReadingProfile {
            profile: name,
            property: None,
        };
        Ok(())
    }

    /// `key = value`
    fn read_property_line(&mut self, line: &'a str) -> Result<(), ProfileParseError> {
        let profile = match self.state {
            State::Starting => return Err(self.make_error("expected a profile definition")),
            State::ReadingProfile { profile, .. } => profile,
        };
        let (key, value) = line
            .split_once('=')
            .ok_or_else(|| self.make_error("expected an '=' sign defining a property"))?;
        let key = key.trim_matches(WHITESPACE);
        if key.is_empty() {
            return Err(self.make_error("property did not have a name"));
        }
        let value = strip_comment(value, true).trim_matches(WHITESPACE);
        self.data
            .entry(profile)
            .or_default()
            .insert(key, Cow::Borrowed(value));
        self.state = State::ReadingProfile {
            profile,
            property: Some(key),
        };
        Ok(())
    }

    /// An indented line extending the value of the previous property
    fn read_property_continuation(&mut self, line: &'a str) -> Result<(), ProfileParseError> {
        let (profile, property) = match self.state {
            State::ReadingProfile {
                profile,
                property: Some(property),
            } => (profile, property),
            State::ReadingProfile { property: None, .. } => {
                return Err(self.make_error(
                    "expected a property definition, found a property continuation",
                ))
            }
            State::Starting => return Err(self.make_error("expected a profile definition")),
        };
        let continuation = line.trim_matches(WHITESPACE);
        if let Some(value) = self
            .data
            .get_mut(profile)
            .and_then(|properties| properties.get_mut(property))
        {
            let value = value.to_mut();
            value.push('\n');
            value.push_str(continuation);
        }
        Ok(())
    }

    fn make_error(&self, message: &str) -> ProfileParseError {
        ProfileParseError {
            location: self.location.clone(),
            message: message.into(),
        }
    }
}

fn is_empty_line(line: &str) -> bool {
    line.trim_matches(WHITESPACE).is_empty()
}

fn is_comment_line(line: &str) -> bool {
    line.trim_start_matches(WHITESPACE).starts_with(COMMENT)
}

/// Strip a trailing comment from `line`
///
/// With `needs_whitespace`, a comment character only starts a comment when it follows a space or
/// a tab, so `a#b` is kept intact.
fn strip_comment(line: &str, needs_whitespace: bool) -> &str {
    let mut prev = None;
    for (idx, ch) in line.char_indices() {
        if COMMENT.contains(&ch)
            && (!needs_whitespace || prev.map_or(true, |p| WHITESPACE.contains(&p)))
        {
            return &line[..idx];
        }
        prev = Some(ch);
    }
    line
}

#[cfg(test)]
mod test {
    use super::{parse_profile_file, strip_comment, RawProfileSet};
    use crate::profile::parser::source::{File, FileKind};
    use std::borrow::Cow;
    use std::collections::HashMap;

    fn file(contents: &str) -> File {
        File {
            kind: FileKind::Config,
            path: "~/.aws/config".into(),
            contents: contents.into(),
        }
    }

    fn profile<'a>(name: &'a str, props: &[(&'a str, &'a str)]) -> RawProfileSet<'a> {
        let mut out = HashMap::new();
        out.insert(
            name,
            props
                .iter()
                .map(|(k, v)| (*k, Cow::Borrowed(*v)))
                .collect(),
        );
        out
    }

    #[test]
    fn comments() {
        assert_eq!(strip_comment("value # comment", true), "value ");
        assert_eq!(strip_comment("value#notcomment", true), "value#notcomment");
        assert_eq!(strip_comment("[profile a]# comment", false), "[profile a]");
        assert_eq!(strip_comment("; comment", true), "");
    }

    #[test]
    fn basic_file() {
        let file = file("# leading comment\n[default]\nregion = us-east-1 ; trailing\n\n  \n");
        assert_eq!(
            parse_profile_file(&file).unwrap(),
            profile("default", &[("region", "us-east-1")])
        );
    }

    #[test]
    fn keys_and_names_are_kept_as_written() {
        let file = file("[profile  Foo ]\nRegion=us-east-1");
        assert_eq!(
            parse_profile_file(&file).unwrap(),
            profile("profile  Foo", &[("Region", "us-east-1")])
        );
    }

    #[test]
    fn continuation_lines() {
        let file = file(
            "[default]\ns3 =\n  max_concurrent_requests = 10\n\tsignature_version = s3v4",
        );
        assert_eq!(
            parse_profile_file(&file).unwrap(),
            profile(
                "default",
                &[(
                    "s3",
                    "\nmax_concurrent_requests = 10\nsignature_version = s3v4"
                )]
            )
        );
    }

    #[test]
    fn value_may_contain_equals() {
        let file = file("[default]\nkey = a=b");
        assert_eq!(
            parse_profile_file(&file).unwrap(),
            profile("default", &[("key", "a=b")])
        );
    }

    #[test]
    fn errors_have_line_numbers() {
        let err = parse_profile_file(&file("region = us-east-1")).unwrap_err();
        assert_eq!(err.line_number(), 1);
        assert_eq!(err.message(), "expected a profile definition");

        let err = parse_profile_file(&file("[default]\n\n[default")).unwrap_err();
        assert_eq!(err.line_number(), 3);
        assert_eq!(
            err.to_string(),
            "error parsing ~/.aws/config on line 3:\n  profile definition must end with ']'"
        );

        let err = parse_profile_file(&file("[default]\n  continued")).unwrap_err();
        assert_eq!(err.line_number(), 2);

        let err = parse_profile_file(&file("[default]\n= value")).unwrap_err();
        assert_eq!(err.message(), "property did not have a name");
    }
}
