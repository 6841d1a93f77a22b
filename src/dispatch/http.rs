use std::time::Duration;

use reqwest::Client;
use tokio_util::sync::CancellationToken;

use crate::error::ParleyError;
use crate::provider::WireRequest;

/// Upper bound on response bodies read into memory.
const MAX_RESPONSE_BYTES: usize = 2 * 1024 * 1024; // 2MB

/// Thin reqwest wrapper: executes a built wire request and hands back the raw
/// status and body bytes for the adapter to interpret.
pub struct HttpTransport {
    client: Client,
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport {
    pub fn new() -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(4)
            .build()
            .expect("failed to build HTTP client");

        Self { client }
    }

    /// Run one exchange. The abort token is cooperative: a caller racing this
    /// future from a spawned task can cancel the token and the exchange stops
    /// at its next await point instead of finishing the round trip.
    pub async fn execute(
        &self,
        wire: &WireRequest,
        abort: &CancellationToken,
    ) -> Result<(u16, Vec<u8>), ParleyError> {
        let mut request = self.client.post(&wire.url);
        for (name, value) in &wire.headers {
            request = request.header(*name, value.as_str());
        }

        let exchange = async {
            let response = request.json(&wire.body).send().await?;
            let status = response.status().as_u16();
            let bytes = response.bytes().await?;
            Ok::<_, ParleyError>((status, bytes))
        };

        let (status, bytes) = tokio::select! {
            _ = abort.cancelled() => return Err(ParleyError::Timeout(0)),
            result = exchange => result?,
        };

        if bytes.len() > MAX_RESPONSE_BYTES {
            return Err(ParleyError::MalformedResponse(format!(
                "response too large: {} bytes (max {MAX_RESPONSE_BYTES})",
                bytes.len()
            )));
        }

        Ok((status, bytes.to_vec()))
    }
}
