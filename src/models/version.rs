use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AztecMonError;

/// Strict `MAJOR.MINOR.PATCH` release version.
///
/// This is the only version grammar the crate accepts: exactly three
/// dot-separated decimal components, no prerelease suffix, no `v` prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl FromStr for NodeVersion {
    type Err = AztecMonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AztecMonError::InvalidVersionFormat(s.to_string());

        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() != 3 {
            return Err(invalid());
        }

        let mut components = [0u64; 3];
        for (slot, part) in components.iter_mut().zip(&parts) {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            *slot = part.parse().map_err(|_| invalid())?;
        }

        Ok(Self {
            major: components[0],
            minor: components[1],
            patch: components[2],
        })
    }
}

impl fmt::Display for NodeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
