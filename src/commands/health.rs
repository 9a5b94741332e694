use crate::core::HealthChecker;
use crate::error::Result;

pub async fn execute(exec_rpc: &str, beacon: Option<&str>) -> Result<()> {
    let checker = HealthChecker::new();
    let report = checker.check_rpc_health(exec_rpc, beacon).await;

    if report.exec.healthy {
        println!(
            "Execution RPC: healthy (block {})",
            report.exec.block_number.unwrap_or(0)
        );
    } else {
        match report.exec.http_code {
            Some(code) => println!("Execution RPC: unhealthy (HTTP {})", code),
            None => println!("Execution RPC: unreachable"),
        }
    }

    let Some(beacon) = report.beacon else {
        println!("Beacon RPC: not provided");
        return Ok(());
    };

    if beacon.healthy {
        println!(
            "Beacon RPC: healthy (version {})",
            beacon.version.as_deref().unwrap_or("unknown")
        );
    } else {
        match beacon.http_code {
            Some(code) => println!("Beacon RPC: unhealthy (HTTP {})", code),
            None => println!("Beacon RPC: unreachable"),
        }
    }

    match (beacon.head_slot, beacon.blobs) {
        (Some(head_slot), Some(blobs)) => {
            println!("Head slot: {}", head_slot);
            println!(
                "Blob success: {}/{} slots ({:.1}%) - {}",
                blobs.slots_with_blobs,
                blobs.slots_checked,
                blobs.success_rate(),
                blobs.health().as_str()
            );
            println!(
                "Total blobs: {} | Errors: {}",
                blobs.total_blobs, blobs.errors
            );
        }
        _ if beacon.version.is_some() => println!("Blob check: could not get head slot"),
        _ => {}
    }

    Ok(())
}
