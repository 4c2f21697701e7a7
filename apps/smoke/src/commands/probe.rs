use crate::error::SmokeError;

use smoke_core::config::SmokeConfig;
use smoke_core::error::CoreError;
use smoke_core::probe::{ProbeClient, ProbeParams, ProbeReport, run_probe};

use log::{debug, info};

/// Build the probe client from config and run the probe once.
///
/// # Returns
///
/// * `Ok(ProbeReport)` - The probe ran; the report holds data or the failure
/// * `Err(SmokeError)` - The client could not be built (bad base URL)
pub async fn run_probe_command(
    config: &SmokeConfig,
    params: ProbeParams,
) -> Result<ProbeReport, SmokeError> {
    let client = ProbeClient::new(&config.probe.base_url, config.transport.timeout())
        .map_err(CoreError::from)?;

    info!(
        "Probing {} with a={}, b={}",
        config.probe.base_url, params.a, params.b
    );
    let report = run_probe(&client, params).await;
    debug!("Probe finished: success={}", report.is_success());

    Ok(report)
}
