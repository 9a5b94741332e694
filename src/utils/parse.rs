//! Free-text extraction grammars.
//!
//! Every regex the crate applies to command output, container logs, or
//! third-party HTML lives here, so the extraction rules stay out of the
//! services themselves. Each function documents its pattern and the
//! fallback rule applied when the primary pattern misses.

use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::models::LogLevel;

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+\.\d+\.\d+)").unwrap());

static PEER_ID_JSON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)"peerId":"([^"]+)""#).unwrap());

static PEER_ID_LOOSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)peerId.*?([a-zA-Z0-9]{30,})").unwrap());

static OWNER_ADDRESS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)with owner (0x[a-fA-F0-9]{40})").unwrap());

static ANSI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*[mGKHfJABCD]|\x1b\[[0-9]+~").unwrap());

static LOG_LEVEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(ERROR|WARNING|WARN|INFO|DEBUG|VERBOSE)\b").unwrap());

static COMPONENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-zA-Z0-9_-]+)[\s:.]").unwrap());

static IPV4_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d{1,3}\.){3}\d{1,3}$").unwrap());

/// First `MAJOR.MINOR.PATCH` substring anywhere in `text`, as printed by
/// `aztec -V` style output. Returns the matched string, not a parsed
/// version; callers decide how strictly to treat it.
pub fn extract_version(text: &str) -> Option<&str> {
    VERSION_RE.find(text).map(|m| m.as_str())
}

/// Peer id from a container log excerpt. Primary grammar is the JSON
/// field `"peerId":"…"`; fallback is any ≥30-char alphanumeric run
/// following the word `peerId`.
pub fn extract_peer_id(text: &str) -> Option<String> {
    if let Some(caps) = PEER_ID_JSON_RE.captures(text) {
        return Some(caps[1].trim().to_string());
    }
    PEER_ID_LOOSE_RE
        .captures(text)
        .map(|caps| caps[1].trim().to_string())
}

/// Validator owner address from the node's startup log line
/// `… with owner 0x<40 hex chars> …`.
pub fn extract_owner_address(text: &str) -> Option<String> {
    OWNER_ADDRESS_RE
        .captures(text)
        .map(|caps| caps[1].to_string())
}

/// Remove ANSI escape sequences (SGR and cursor-control codes).
pub fn strip_ansi(text: &str) -> String {
    ANSI_RE.replace_all(text, "").into_owned()
}

/// First recognized severity word in the line, whole-word,
/// case-insensitive. `WARNING`/`VERBOSE` normalize to `WARN`/`DEBUG`.
pub fn detect_log_level(line: &str) -> Option<LogLevel> {
    LOG_LEVEL_RE
        .captures(line)
        .and_then(|caps| LogLevel::from_str(&caps[1]).ok())
}

/// Component name at the start of a log message: a leading identifier
/// terminated by whitespace, `:` or `.`. Fallback: the first word, if it
/// is a plain identifier longer than two characters.
pub fn extract_component(message: &str) -> Option<String> {
    let trimmed = message.trim();
    if let Some(caps) = COMPONENT_RE.captures(trimmed) {
        return Some(caps[1].to_ascii_lowercase());
    }

    let first = trimmed.split_whitespace().next()?;
    if first.len() > 2 && first.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
        Some(first.to_ascii_lowercase())
    } else {
        None
    }
}

/// Strict dotted-quad check for public-IP service responses.
pub fn is_ipv4(text: &str) -> bool {
    IPV4_RE.is_match(text)
}

/// Verdict from the port-check service's HTML response.
///
/// Open markers: the green flag image, or the phrase "is open".
/// Closed markers: the red flag image, or the phrase "is closed".
/// Open markers win over closed; `None` when neither appears.
pub fn parse_port_check_response(html: &str) -> Option<bool> {
    let lower = html.to_ascii_lowercase();
    if lower.contains("flag_green") || lower.contains("is open") {
        return Some(true);
    }
    if lower.contains("flag_red") || lower.contains("is closed") {
        return Some(false);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_version_from_probe_output() {
        assert_eq!(extract_version("aztec 0.87.8 (release)"), Some("0.87.8"));
        assert_eq!(extract_version("v1.2.3-dev"), Some("1.2.3"));
        assert_eq!(extract_version("no version here"), None);
    }

    #[test]
    fn test_extract_version_picks_first_match() {
        assert_eq!(extract_version("cli 0.1.0, node 0.87.8"), Some("0.1.0"));
    }

    #[test]
    fn test_extract_peer_id_json_form() {
        let line = r#"{"level":"info","peerId":"16Uiu2HAmAbCdEf","msg":"started"}"#;
        assert_eq!(extract_peer_id(line).unwrap(), "16Uiu2HAmAbCdEf");
    }

    #[test]
    fn test_extract_peer_id_loose_fallback() {
        let line = "INFO p2p peerId 16Uiu2HAm1234567890abcdefghijklmnop started";
        assert_eq!(
            extract_peer_id(line).unwrap(),
            "16Uiu2HAm1234567890abcdefghijklmnop"
        );
    }

    #[test]
    fn test_extract_peer_id_requires_long_run() {
        assert!(extract_peer_id("peerId short").is_none());
    }

    #[test]
    fn test_extract_owner_address() {
        let line = "Starting validator with owner 0xAbCdEf1234567890abcdef1234567890ABCDEF12 ok";
        assert_eq!(
            extract_owner_address(line).unwrap(),
            "0xAbCdEf1234567890abcdef1234567890ABCDEF12"
        );
    }

    #[test]
    fn test_extract_owner_address_rejects_short_hex() {
        assert!(extract_owner_address("with owner 0xabc123").is_none());
    }

    #[test]
    fn test_strip_ansi() {
        let colored = "\x1b[32mINFO\x1b[0m message \x1b[1;31mred\x1b[0m";
        assert_eq!(strip_ansi(colored), "INFO message red");
    }

    #[test]
    fn test_strip_ansi_plain_text_unchanged() {
        assert_eq!(strip_ansi("plain line"), "plain line");
    }

    #[test]
    fn test_detect_log_level() {
        assert_eq!(detect_log_level("ERROR: boom"), Some(LogLevel::Error));
        assert_eq!(detect_log_level("2025 warn slow block"), Some(LogLevel::Warn));
        assert_eq!(detect_log_level("WARNING disk"), Some(LogLevel::Warn));
        assert_eq!(detect_log_level("verbose trace"), Some(LogLevel::Debug));
        assert_eq!(detect_log_level("plain message"), None);
    }

    #[test]
    fn test_detect_log_level_whole_word_only() {
        // "infos" must not match INFO
        assert_eq!(detect_log_level("infos counter"), None);
    }

    #[test]
    fn test_extract_component_forms() {
        assert_eq!(extract_component("archiver synced to 100").unwrap(), "archiver");
        assert_eq!(extract_component("Sequencer: built block").unwrap(), "sequencer");
        assert_eq!(extract_component("p2p.discovery found peer").unwrap(), "p2p");
    }

    #[test]
    fn test_extract_component_fallback_word() {
        assert_eq!(extract_component("prover").unwrap(), "prover");
        assert_eq!(extract_component("ok").is_none(), true);
        assert_eq!(extract_component("").is_none(), true);
    }

    #[test]
    fn test_is_ipv4() {
        assert!(is_ipv4("203.0.113.7"));
        assert!(!is_ipv4("203.0.113"));
        assert!(!is_ipv4("not-an-ip"));
        assert!(!is_ipv4("203.0.113.7 "));
    }

    #[test]
    fn test_parse_port_check_open() {
        assert_eq!(parse_port_check_response("<img src=\"/img/flag_green.gif\">"), Some(true));
        assert_eq!(parse_port_check_response("Port 8080 is open on host"), Some(true));
    }

    #[test]
    fn test_parse_port_check_closed() {
        assert_eq!(parse_port_check_response("<img src=\"/img/flag_red.gif\">"), Some(false));
        assert_eq!(parse_port_check_response("Port 8080 is closed"), Some(false));
    }

    #[test]
    fn test_parse_port_check_unknown() {
        assert_eq!(parse_port_check_response("<html>capacity exceeded</html>"), None);
    }
}
