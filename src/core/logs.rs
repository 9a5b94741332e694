use crate::core::container;
use crate::error::Result;
use crate::models::{LogEntry, LogLevel, MonitorConfig};
use crate::utils::parse;

/// Pulls recent container log lines and classifies each one by severity
/// and emitting component before filtering.
pub struct LogInspector {
    container_image: String,
}

impl LogInspector {
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            container_image: config.container_image.clone(),
        }
    }

    pub async fn node_logs(
        &self,
        lines: usize,
        level: Option<LogLevel>,
        component: Option<&str>,
    ) -> Result<Vec<LogEntry>> {
        let container_id = container::find_container(&self.container_image).await?;
        let raw = container::tail_logs(&container_id, lines).await?;
        Ok(Self::parse_and_filter(&raw, level, component))
    }

    /// ANSI-strip, classify, filter. Blank lines are dropped; filters
    /// only apply when requested.
    pub fn parse_and_filter(
        raw: &str,
        level: Option<LogLevel>,
        component: Option<&str>,
    ) -> Vec<LogEntry> {
        raw.lines()
            .filter_map(|line| {
                let clean = parse::strip_ansi(line);
                let trimmed = clean.trim();
                if trimmed.is_empty() {
                    return None;
                }
                Some(LogEntry {
                    level: parse::detect_log_level(trimmed),
                    component: parse::extract_component(trimmed),
                    line: trimmed.to_string(),
                })
            })
            .filter(|entry| level.is_none_or(|wanted| entry.matches_level(wanted)))
            .filter(|entry| component.is_none_or(|wanted| entry.matches_component(wanted)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
archiver INFO synced to block 120
sequencer \x1b[31mERROR\x1b[0m failed to build block
p2p WARN peer disconnected

sequencer INFO built block 121
prover DEBUG proof queued";

    #[test]
    fn test_parse_all_lines() {
        let entries = LogInspector::parse_and_filter(SAMPLE, None, None);
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0].component.as_deref(), Some("archiver"));
        assert_eq!(entries[0].level, Some(LogLevel::Info));
    }

    #[test]
    fn test_ansi_codes_stripped() {
        let entries = LogInspector::parse_and_filter(SAMPLE, Some(LogLevel::Error), None);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].line, "sequencer ERROR failed to build block");
    }

    #[test]
    fn test_filter_by_level() {
        let entries = LogInspector::parse_and_filter(SAMPLE, Some(LogLevel::Warn), None);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].component.as_deref(), Some("p2p"));
    }

    #[test]
    fn test_filter_by_component() {
        let entries = LogInspector::parse_and_filter(SAMPLE, None, Some("sequencer"));
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.matches_component("sequencer")));
    }

    #[test]
    fn test_filter_by_level_and_component() {
        let entries =
            LogInspector::parse_and_filter(SAMPLE, Some(LogLevel::Info), Some("sequencer"));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].line, "sequencer INFO built block 121");
    }

    #[test]
    fn test_no_matches() {
        let entries = LogInspector::parse_and_filter(SAMPLE, Some(LogLevel::Error), Some("p2p"));
        assert!(entries.is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(LogInspector::parse_and_filter("", None, None).is_empty());
    }
}
