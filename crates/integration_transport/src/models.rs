//! Wire models for the transport-options endpoint

use serde::{Deserialize, Serialize};

/// Body of `POST /transport-options`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionsRequest {
    /// Departure address
    pub origin: String,
    /// Arrival address
    pub destination: String,
    /// Leg the request belongs to
    pub step_id: u32,
}

impl OptionsRequest {
    /// Create a new request
    #[must_use]
    pub fn new(origin: impl Into<String>, destination: impl Into<String>, step_id: u32) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            step_id,
        }
    }

    /// Cache key shared by requests for the same address pair
    #[must_use]
    pub fn cache_key(&self) -> String {
        format!("{}_{}", self.origin.trim(), self.destination.trim()).to_lowercase()
    }
}

/// Answer of the transport service
///
/// Older deployments answer with a bare array of option strings; newer ones
/// wrap the options in an object carrying the step id and status flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawOptionsResponse")]
pub struct OptionsResponse {
    /// Leg the answer belongs to, when the service echoes it
    pub step_id: Option<u32>,
    /// Free-text option descriptions
    pub options: Vec<String>,
    /// Error reported by the service
    pub error: Option<String>,
    /// The service replaced its lookup with placeholder options
    pub fallback: bool,
}

impl OptionsResponse {
    /// Whether the service reported a failure
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.error.as_deref().is_some_and(|e| !e.trim().is_empty())
    }
}

/// Option tails the service sends when its own lookup came up empty
///
/// The full strings are prefixed with `"Adresse: <origin> → <destination> | "`.
const PLACEHOLDER_TAILS: [&str; 2] = [
    "Moyen: Marche à pied | Temps: 30min | Prix: 0€",
    "Moyen: Taxi | Temps: 10min | Prix: 15€",
];

/// Whether the options are exactly the service's canned walk/taxi pair
fn is_placeholder_pair(options: &[String]) -> bool {
    let tail_of = |option: &String| {
        PLACEHOLDER_TAILS
            .iter()
            .position(|tail| option.trim_end().ends_with(tail))
    };
    let mut seen = [false; PLACEHOLDER_TAILS.len()];
    for option in options {
        match tail_of(option) {
            Some(i) => seen[i] = true,
            None => return false,
        }
    }
    seen.iter().all(|s| *s)
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawOptionsResponse {
    List(Vec<String>),
    Envelope {
        #[serde(default)]
        step_id: Option<u32>,
        #[serde(default)]
        options: Vec<String>,
        #[serde(default)]
        error: Option<String>,
        #[serde(default)]
        success: Option<bool>,
        #[serde(default)]
        fallback: bool,
    },
}

impl From<RawOptionsResponse> for OptionsResponse {
    fn from(raw: RawOptionsResponse) -> Self {
        match raw {
            RawOptionsResponse::List(options) => Self {
                step_id: None,
                fallback: is_placeholder_pair(&options),
                options,
                error: None,
            },
            RawOptionsResponse::Envelope {
                step_id,
                options,
                error,
                success,
                fallback,
            } => {
                let error = match (error, success) {
                    (Some(e), _) => Some(e),
                    (None, Some(false)) => Some("transport service reported failure".to_string()),
                    (None, _) => None,
                };
                Self {
                    step_id,
                    fallback: fallback || is_placeholder_pair(&options),
                    options,
                    error,
                }
            },
        }
    }
}
