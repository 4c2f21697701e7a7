//! Parameterized GET probe against `<base>/test?a=<a>&b=<b>`.

use crate::error::TransportError;

use common::{ErrorLocation, HttpStatusCode};

use std::fmt;
use std::panic::Location;
use std::time::Duration;

use log::{debug, error, info};
use reqwest::Client;
use serde_json::Value;
use url::Url;

const PROBE_ENDPOINT: &str = "test";

/// The two numbers sent as the `a` and `b` query parameters.
///
/// Values are written with `f64`'s `Display`, so whole numbers keep their
/// integer form (`5.0` is sent as `5`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeParams {
    pub a: f64,
    pub b: f64,
}

impl ProbeParams {
    pub fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }
}

#[derive(Clone)]
pub struct ProbeClient {
    base_url: Url,
    client: Client,
}

impl ProbeClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut base_url = Url::parse(base_url)?;

        // Url::join replaces the last segment unless the path ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { base_url, client })
    }

    pub fn probe_url(&self, params: ProbeParams) -> Result<Url, TransportError> {
        let mut url = self.base_url.join(PROBE_ENDPOINT)?;
        url.query_pairs_mut()
            .append_pair("a", &params.a.to_string())
            .append_pair("b", &params.b.to_string());
        Ok(url)
    }

    /// Issue the GET and parse a 2xx body as JSON.
    ///
    /// # Errors
    /// - [`TransportError::Request`] on a non-2xx status; the body is not parsed
    /// - [`TransportError::Network`] if the exchange never completed
    /// - [`TransportError::Json`] if a 2xx body is not JSON
    pub async fn probe(&self, params: ProbeParams) -> Result<Value, TransportError> {
        let url = self.probe_url(params)?;
        debug!("GET {url}");

        let response = self.client.get(url).send().await?;
        let status = HttpStatusCode::from(response.status().as_u16());

        if !status.is_success() {
            return Err(TransportError::Request {
                status,
                message: response
                    .status()
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let data: Value = response.json().await?;
        Ok(data)
    }
}

/// Terminal result of one probe run.
#[derive(Debug)]
pub enum ProbeReport {
    Data(Value),
    Failed(TransportError),
}

impl ProbeReport {
    pub fn is_success(&self) -> bool {
        matches!(self, ProbeReport::Data(_))
    }
}

impl fmt::Display for ProbeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeReport::Data(data) => write!(f, "Response data: {data}"),
            ProbeReport::Failed(e) => write!(f, "Error making GET request: {e}"),
        }
    }
}

/// Run the probe once and log the outcome.
pub async fn run_probe(client: &ProbeClient, params: ProbeParams) -> ProbeReport {
    let report = match client.probe(params).await {
        Ok(data) => ProbeReport::Data(data),
        Err(e) => ProbeReport::Failed(e),
    };

    match &report {
        ProbeReport::Data(_) => info!("{report}"),
        ProbeReport::Failed(_) => error!("{report}"),
    }

    report
}
