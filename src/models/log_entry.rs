use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
        }
    }
}

impl FromStr for LogLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ERROR" => Ok(Self::Error),
            "WARN" | "WARNING" => Ok(Self::Warn),
            "INFO" => Ok(Self::Info),
            "DEBUG" | "VERBOSE" => Ok(Self::Debug),
            _ => Err(()),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One container log line after ANSI stripping and classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub line: String,
    pub level: Option<LogLevel>,
    pub component: Option<String>,
}

impl LogEntry {
    pub fn matches_level(&self, wanted: LogLevel) -> bool {
        self.level == Some(wanted)
    }

    pub fn matches_component(&self, wanted: &str) -> bool {
        self.component
            .as_deref()
            .is_some_and(|c| c.eq_ignore_ascii_case(wanted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_str() {
        assert_eq!("error".parse::<LogLevel>().unwrap(), LogLevel::Error);
        assert_eq!("WARNING".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!("Info".parse::<LogLevel>().unwrap(), LogLevel::Info);
        assert_eq!("verbose".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert!("trace2".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_matches_level() {
        let entry = LogEntry {
            line: "ERROR sequencer failed".to_string(),
            level: Some(LogLevel::Error),
            component: Some("sequencer".to_string()),
        };
        assert!(entry.matches_level(LogLevel::Error));
        assert!(!entry.matches_level(LogLevel::Info));
    }

    #[test]
    fn test_matches_component_case_insensitive() {
        let entry = LogEntry {
            line: "archiver synced".to_string(),
            level: None,
            component: Some("archiver".to_string()),
        };
        assert!(entry.matches_component("Archiver"));
        assert!(!entry.matches_component("sequencer"));
    }
}
