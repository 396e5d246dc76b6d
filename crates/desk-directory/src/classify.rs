//! Identifier classification by Slack's prefix convention.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of entity an opaque Slack identifier refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityKind {
    /// `U…` workspace user or `W…` enterprise-grid user.
    User,
    /// `S…` user group.
    Group,
    /// `B…` bot.
    Bot,
    /// Anything else. Never looked up.
    Unknown,
}

impl IdentityKind {
    /// Classify an identifier. Only the first character is inspected; the
    /// rest must be ASCII alphanumeric for the id to count as well-formed.
    #[must_use]
    pub fn classify(id: &str) -> Self {
        let mut chars = id.chars();
        let Some(prefix) = chars.next() else {
            return Self::Unknown;
        };
        let rest = chars.as_str();
        if rest.is_empty() || !rest.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Self::Unknown;
        }
        match prefix {
            'U' | 'W' => Self::User,
            'S' => Self::Group,
            'B' => Self::Bot,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Group => "group",
            Self::Bot => "bot",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for IdentityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("U024BE7LH", IdentityKind::User)]
    #[case("W012A3CDE", IdentityKind::User)]
    #[case("S08STJCNMHR", IdentityKind::Group)]
    #[case("B01234567", IdentityKind::Bot)]
    #[case("C0123ABCD", IdentityKind::Unknown)]
    #[case("", IdentityKind::Unknown)]
    #[case("U", IdentityKind::Unknown)]
    #[case("u024be7lh", IdentityKind::Unknown)]
    #[case("U024 BE7", IdentityKind::Unknown)]
    #[case("jane.doe@example.com", IdentityKind::Unknown)]
    fn classifies_by_prefix(#[case] id: &str, #[case] expected: IdentityKind) {
        assert_eq!(IdentityKind::classify(id), expected);
    }
}
