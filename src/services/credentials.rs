use std::time::{Duration, Instant};

use crate::error::Result;
use crate::models::{ApiCredentials, ConnectionTestResult};

/// Simulated connection check: validates the fields, waits `delay`, and
/// reports success. No request is sent.
pub async fn test_connection(
    credentials: &ApiCredentials,
    delay: Duration,
) -> Result<ConnectionTestResult> {
    let credentials = credentials.validate()?;
    log::info!("Testing connection to {}", credentials.api_url);

    let started = Instant::now();
    tokio::time::sleep(delay).await;

    Ok(ConnectionTestResult {
        success: true,
        api_url: credentials.api_url,
        elapsed_ms: started.elapsed().as_millis() as u64,
    })
}
