use crate::error::SmokeError;

use smoke_core::auth_flow::{AuthenticatedPostFlow, FlowRun};
use smoke_core::config::SmokeConfig;
use smoke_core::error::CoreError;
use smoke_core::graphql_client::GraphqlClient;

use log::{debug, info};

/// Run the login + create-post flow once against the configured endpoint.
///
/// # Returns
///
/// * `Ok(FlowRun)` - The flow reached a terminal state (success or failure)
/// * `Err(SmokeError)` - The client could not be built (bad endpoint)
pub async fn run_create_post_command(config: &SmokeConfig) -> Result<FlowRun, SmokeError> {
    let client = GraphqlClient::new(&config.graphql.endpoint, config.transport.timeout())
        .map_err(CoreError::from)?;

    info!(
        "Logging in as '{}' at {}",
        config.credentials.username,
        client.endpoint()
    );

    let run = AuthenticatedPostFlow::new(&client, &config.credentials, &config.post)
        .run()
        .await;

    debug!(
        "Flow finished: success={}, transitions={:?}",
        run.report.is_success(),
        run.transitions
    );
    Ok(run)
}
