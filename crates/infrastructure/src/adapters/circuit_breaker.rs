//! Circuit breaker for the live transport service
//!
//! After repeated failures the lookup is skipped entirely for a cool-down
//! period, so itinerary legs go straight to the local estimate instead of
//! each waiting for the lookup timeout.
//!
//! # States
//!
//! - **Closed**: calls pass through
//! - **Open**: calls fail fast
//! - **Half-Open**: a trial call decides whether to close again

use std::fmt;
use std::future::Future;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tracing::{debug, info, warn};

/// Thresholds of a circuit breaker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircuitBreakerConfig {
    /// Consecutive failures before opening
    pub failure_threshold: u32,
    /// Consecutive half-open successes before closing
    pub success_threshold: u32,
    /// Time spent open before allowing a trial call
    pub open_duration: Duration,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            success_threshold: 2,
            open_duration: Duration::from_secs(30),
        }
    }
}

/// State of a circuit breaker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    /// Calls pass through
    Closed,
    /// Calls fail fast
    Open,
    /// Testing if the service has recovered
    HalfOpen,
}

impl fmt::Display for CircuitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "closed"),
            Self::Open => write!(f, "open"),
            Self::HalfOpen => write!(f, "half-open"),
        }
    }
}

/// Error of a call made through the breaker
#[derive(Debug)]
pub enum CircuitBreakerError<E> {
    /// The circuit is open and the call was not made
    CircuitOpen(String),
    /// The call was made and failed
    ServiceError(E),
}

impl<E: fmt::Display> fmt::Display for CircuitBreakerError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CircuitOpen(name) => write!(
                f,
                "Circuit breaker open for '{name}': service is temporarily unavailable"
            ),
            Self::ServiceError(e) => write!(f, "{e}"),
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for CircuitBreakerError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CircuitOpen(_) => None,
            Self::ServiceError(e) => Some(e),
        }
    }
}

#[derive(Debug)]
struct Counters {
    state: CircuitState,
    failures: u32,
    successes: u32,
    opened_at: Option<Instant>,
}

impl Counters {
    const fn closed() -> Self {
        Self {
            state: CircuitState::Closed,
            failures: 0,
            successes: 0,
            opened_at: None,
        }
    }

    fn open(&mut self) {
        self.state = CircuitState::Open;
        self.failures = 0;
        self.successes = 0;
        self.opened_at = Some(Instant::now());
    }
}

/// Fail-fast guard around calls to one external service
pub struct CircuitBreaker {
    name: String,
    config: CircuitBreakerConfig,
    counters: RwLock<Counters>,
}

impl fmt::Debug for CircuitBreaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CircuitBreaker")
            .field("name", &self.name)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl CircuitBreaker {
    /// Create a breaker with default thresholds
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, CircuitBreakerConfig::default())
    }

    /// Create a breaker with custom thresholds
    #[must_use]
    pub fn with_config(name: impl Into<String>, config: CircuitBreakerConfig) -> Self {
        Self {
            name: name.into(),
            config,
            counters: RwLock::new(Counters::closed()),
        }
    }

    /// Name of the guarded service
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current state, moving from Open to Half-Open once the cool-down is over
    #[must_use]
    pub fn state(&self) -> CircuitState {
        let mut counters = self.counters.write();
        if counters.state == CircuitState::Open
            && counters
                .opened_at
                .is_some_and(|at| at.elapsed() >= self.config.open_duration)
        {
            debug!(service = %self.name, "Circuit half-open");
            counters.state = CircuitState::HalfOpen;
            counters.successes = 0;
        }
        counters.state
    }

    /// Whether calls are currently refused
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state() == CircuitState::Open
    }

    fn record_success(&self) {
        let mut counters = self.counters.write();
        counters.failures = 0;
        if counters.state == CircuitState::HalfOpen {
            counters.successes += 1;
            if counters.successes >= self.config.success_threshold {
                info!(service = %self.name, "Circuit closed");
                *counters = Counters::closed();
            }
        }
    }

    fn record_failure(&self) {
        let mut counters = self.counters.write();
        match counters.state {
            CircuitState::Closed => {
                counters.failures += 1;
                if counters.failures >= self.config.failure_threshold {
                    warn!(
                        service = %self.name,
                        failures = counters.failures,
                        "Circuit opened"
                    );
                    counters.open();
                }
            },
            CircuitState::HalfOpen => {
                warn!(service = %self.name, "Trial call failed, circuit reopened");
                counters.open();
            },
            CircuitState::Open => {},
        }
    }

    /// Run `f` unless the circuit is open, recording its outcome
    pub async fn call<F, Fut, T, E>(&self, f: F) -> Result<T, CircuitBreakerError<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        if self.is_open() {
            debug!(service = %self.name, "Circuit open, skipping call");
            return Err(CircuitBreakerError::CircuitOpen(self.name.clone()));
        }

        match f().await {
            Ok(value) => {
                self.record_success();
                Ok(value)
            },
            Err(e) => {
                debug!(service = %self.name, error = %e, "Call failed");
                self.record_failure();
                Err(CircuitBreakerError::ServiceError(e))
            },
        }
    }
}
