//! Activity kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    /// A sponsor booth; its operators may log in and scan attendees.
    Booth,
    /// A plain check-in point.
    Check,
    /// A challenge station.
    Challenge,
}

impl ActivityType {
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityType::Booth => "booth",
            ActivityType::Check => "check",
            ActivityType::Challenge => "challenge",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "booth" => Ok(ActivityType::Booth),
            "check" => Ok(ActivityType::Check),
            "challenge" => Ok(ActivityType::Challenge),
            other => Err(CoreError::Validation(format!(
                "unknown activity type '{other}'"
            ))),
        }
    }
}
