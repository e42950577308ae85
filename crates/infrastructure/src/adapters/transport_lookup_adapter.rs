//! Transport lookup adapter - Implements TransportLookupPort using integration_transport

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::{TransportLookupPort, TransportRequest, TransportResponse};
use async_trait::async_trait;
use integration_transport::{OptionsRequest, OptionsResponse, TransportClient, TransportError};
use tracing::{debug, instrument};

use super::{CircuitBreaker, CircuitBreakerConfig, CircuitBreakerError};

/// Error text used when the service only had placeholder options
const PLACEHOLDER_ANSWER: &str = "transport service returned placeholder options";

/// Adapter for the live transport-information service
pub struct TransportLookupAdapter {
    client: Arc<dyn TransportClient>,
    circuit_breaker: Option<CircuitBreaker>,
}

impl std::fmt::Debug for TransportLookupAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportLookupAdapter")
            .field(
                "circuit_breaker",
                &self.circuit_breaker.as_ref().map(CircuitBreaker::state),
            )
            .finish_non_exhaustive()
    }
}

impl TransportLookupAdapter {
    /// Create a new adapter around a transport client
    #[must_use]
    pub fn new(client: Arc<dyn TransportClient>) -> Self {
        Self {
            client,
            circuit_breaker: None,
        }
    }

    /// Enable circuit breaker with default configuration
    #[must_use]
    pub fn with_circuit_breaker(self) -> Self {
        self.with_circuit_breaker_config(CircuitBreakerConfig::default())
    }

    /// Enable circuit breaker with custom configuration
    #[must_use]
    pub fn with_circuit_breaker_config(mut self, config: CircuitBreakerConfig) -> Self {
        self.circuit_breaker = Some(CircuitBreaker::with_config("transport", config));
        self
    }

    fn map_error(error: TransportError) -> ApplicationError {
        match error {
            TransportError::Timeout { timeout_secs } => ApplicationError::Timeout { timeout_secs },
            TransportError::RateLimitExceeded { .. } => ApplicationError::RateLimited,
            TransportError::InvalidRequest(message) => ApplicationError::InvalidRequest(message),
            other => ApplicationError::ExternalService(format!("Transport lookup failed: {other}")),
        }
    }

    fn convert_response(request: &TransportRequest, response: OptionsResponse) -> TransportResponse {
        let error = match (response.error, response.fallback) {
            (Some(error), _) => Some(error),
            (None, true) => Some(PLACEHOLDER_ANSWER.to_string()),
            (None, false) => None,
        };
        TransportResponse {
            step_id: response.step_id.unwrap_or(request.step_id),
            options: response.options,
            error,
        }
    }
}

#[async_trait]
impl TransportLookupPort for TransportLookupAdapter {
    #[instrument(skip(self, request), fields(step_id = request.step_id))]
    async fn lookup(
        &self,
        request: &TransportRequest,
    ) -> Result<TransportResponse, ApplicationError> {
        let options_request =
            OptionsRequest::new(&request.origin, &request.destination, request.step_id);
        let call = || self.client.request_options(&options_request);

        let response = match &self.circuit_breaker {
            Some(cb) => cb.call(call).await.map_err(|e| match e {
                CircuitBreakerError::CircuitOpen(_) => ApplicationError::ExternalService(
                    "Transport service circuit breaker is open".to_string(),
                ),
                CircuitBreakerError::ServiceError(e) => Self::map_error(e),
            })?,
            None => call().await.map_err(Self::map_error)?,
        };

        debug!(
            options = response.options.len(),
            fallback = response.fallback,
            "Transport service answered"
        );
        Ok(Self::convert_response(request, response))
    }
}
