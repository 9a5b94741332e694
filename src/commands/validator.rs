use crate::core::ValidatorMonitor;
use crate::error::Result;
use crate::models::MonitorConfig;
use crate::utils::fmt::truncate_id;

pub async fn execute(config: &MonitorConfig) -> Result<()> {
    let monitor = ValidatorMonitor::new(config);
    let status = monitor.validator_status().await;

    let Some(address) = &status.owner_address else {
        println!("Validator owner address not found in container logs.");
        println!("Check that the container is running and registered a validator.");
        return Ok(());
    };
    println!("Owner address: {}", truncate_id(address, 10, 8));

    let Some(data) = status.validator else {
        println!("Validator not registered in the network for this address.");
        return Ok(());
    };

    println!("Status: {}", data.status.as_deref().unwrap_or("Unknown"));
    if let Some(index) = data.index {
        println!("Index: {}", index);
    }
    if let Some(balance) = &data.balance {
        println!("Balance: {}", balance);
    }
    println!("Slashed: {}", if data.slashed { "yes" } else { "no" });

    println!("\nAttestations:");
    println!("  Total:      {}", data.total_attestations());
    println!("  Successful: {}", data.total_attestations_succeeded);
    println!("  Missed:     {}", data.total_attestations_missed);
    println!("  Success rate: {:.1}%", data.attestation_success_rate());
    println!("  Miss rate:    {:.1}%", data.attestation_miss_rate());

    println!("\nProposals:");
    println!("  Epochs:   {}", data.total_participating_epochs);
    println!("  Proposed: {}", data.total_blocks_proposed);
    println!("  Mined:    {}", data.total_blocks_mined);
    println!("  Missed:   {}", data.total_blocks_missed);
    println!("  Miss rate: {:.1}%", data.proposal_miss_rate());

    Ok(())
}
