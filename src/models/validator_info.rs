use serde::{Deserialize, Serialize};

/// Validator record as served by the validator dashboard API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatorData {
    #[serde(default)]
    pub index: Option<u64>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub balance: Option<String>,
    #[serde(default)]
    pub slashed: bool,
    #[serde(default)]
    pub total_attestations_succeeded: u64,
    #[serde(default)]
    pub total_attestations_missed: u64,
    #[serde(default)]
    pub total_blocks_proposed: u64,
    #[serde(default)]
    pub total_blocks_mined: u64,
    #[serde(default)]
    pub total_blocks_missed: u64,
    #[serde(default)]
    pub total_participating_epochs: u64,
}

impl ValidatorData {
    pub fn total_attestations(&self) -> u64 {
        self.total_attestations_succeeded + self.total_attestations_missed
    }

    /// Attestation success percentage; 0 when no attestations recorded.
    pub fn attestation_success_rate(&self) -> f64 {
        let total = self.total_attestations();
        if total == 0 {
            return 0.0;
        }
        self.total_attestations_succeeded as f64 / total as f64 * 100.0
    }

    pub fn attestation_miss_rate(&self) -> f64 {
        100.0 - self.attestation_success_rate()
    }

    /// Missed-proposal percentage over proposed + mined + missed blocks.
    pub fn proposal_miss_rate(&self) -> f64 {
        let total = self.total_blocks_proposed + self.total_blocks_mined + self.total_blocks_missed;
        if total == 0 {
            return 0.0;
        }
        self.total_blocks_missed as f64 / total as f64 * 100.0
    }
}

/// Aggregate result of a validator-status check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorStatus {
    pub owner_address: Option<String>,
    pub validator_found: bool,
    pub validator: Option<ValidatorData>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ValidatorData {
        serde_json::from_str(
            r#"{
                "index": 42,
                "address": "0x1234567890abcdef1234567890abcdef12345678",
                "status": "Active",
                "balance": "100.00 STK",
                "slashed": false,
                "totalAttestationsSucceeded": 90,
                "totalAttestationsMissed": 10,
                "totalBlocksProposed": 5,
                "totalBlocksMined": 3,
                "totalBlocksMissed": 2,
                "totalParticipatingEpochs": 120
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_camel_case_deserialization() {
        let data = sample();
        assert_eq!(data.index, Some(42));
        assert_eq!(data.total_attestations_succeeded, 90);
        assert_eq!(data.total_participating_epochs, 120);
    }

    #[test]
    fn test_attestation_rates() {
        let data = sample();
        assert!((data.attestation_success_rate() - 90.0).abs() < 1e-9);
        assert!((data.attestation_miss_rate() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_proposal_miss_rate() {
        let data = sample();
        assert!((data.proposal_miss_rate() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_rates_with_zero_denominators() {
        let data: ValidatorData = serde_json::from_str("{}").unwrap();
        assert_eq!(data.attestation_success_rate(), 0.0);
        assert_eq!(data.attestation_miss_rate(), 100.0);
        assert_eq!(data.proposal_miss_rate(), 0.0);
    }

    #[test]
    fn test_missing_fields_default() {
        let data: ValidatorData = serde_json::from_str(r#"{"status": "Inactive"}"#).unwrap();
        assert_eq!(data.status.as_deref(), Some("Inactive"));
        assert!(!data.slashed);
        assert_eq!(data.total_attestations(), 0);
    }
}
