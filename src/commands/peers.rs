use crate::core::NetworkMonitor;
use crate::error::Result;
use crate::models::MonitorConfig;
use crate::utils::fmt::{format_timestamp, truncate_id};

pub async fn execute(config: &MonitorConfig) -> Result<()> {
    let monitor = NetworkMonitor::new(config);
    let status = monitor.peer_status().await;

    let Some(peer_id) = &status.local_peer_id else {
        println!("Could not retrieve the local peer ID.");
        println!("Check that the container is running and has logged its peerId.");
        return Ok(());
    };
    println!("Local peer ID: {}", truncate_id(peer_id, 16, 8));

    if !status.network_reachable {
        println!("Network API unreachable; the node may still be working correctly.");
        return Ok(());
    }
    println!("Network peers: {}", status.total_network_peers);

    match status.peer {
        Some(peer) => {
            println!("Peer status: CONNECTED ✓");
            if let Some(location) = peer.location() {
                println!("Location: {}", location);
            }
            if let Some(client) = &peer.client {
                println!("Client: {}", client);
            }
            if let Some(created) = &peer.created_at {
                println!("First seen: {}", format_timestamp(created));
            }
            if let Some(last_seen) = &peer.last_seen {
                println!("Last seen: {}", format_timestamp(last_seen));
            }
        }
        None => {
            println!("Peer status: NOT FOUND ✗");
            println!("The peer is not visible in the network yet.");
            println!("Discovery takes time after a restart; check firewall and sync state.");
        }
    }

    Ok(())
}
