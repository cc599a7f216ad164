use crate::state::messages::NetworkRequest;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

/// Periodic standings refresh — every 60 seconds while the console is open.
/// Only sends RefreshStandings; the tournament list is loaded once on
/// startup and again on demand.
pub struct PeriodicRefresher {
    network_requests: mpsc::Sender<NetworkRequest>,
}

impl PeriodicRefresher {
    pub fn new(network_requests: mpsc::Sender<NetworkRequest>) -> Self {
        Self { network_requests }
    }

    pub async fn run(self) {
        let mut standings_interval = interval(Duration::from_secs(60));
        // Skip the immediate first tick so startup loading isn't double-triggered.
        standings_interval.tick().await;

        loop {
            standings_interval.tick().await;
            let _ = self
                .network_requests
                .send(NetworkRequest::RefreshStandings)
                .await;
        }
    }
}
