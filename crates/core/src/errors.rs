use thiserror::Error;

/// Unified error type for the entire courtside-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Contract violations ─────────────────────────────────────────
    /// Malformed arguments to a pure function (degenerate series,
    /// undefined anchor target, zero-width domain).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ── API / Network ───────────────────────────────────────────────
    /// The detail-query collaborator was unreachable or reported failure.
    #[error("Transport failure: {0}")]
    TransportFailure(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── Configuration ───────────────────────────────────────────────
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Message used when the collaborator fails without saying why.
pub const GENERIC_FETCH_FAILURE: &str = "Failed to load games";

impl CoreError {
    /// Build a transport failure from an optional collaborator message,
    /// falling back to [`GENERIC_FETCH_FAILURE`].
    pub fn transport(message: Option<String>) -> Self {
        match message {
            Some(msg) if !msg.trim().is_empty() => CoreError::TransportFailure(msg),
            _ => CoreError::TransportFailure(GENERIC_FETCH_FAILURE.to_string()),
        }
    }

    /// Whether the UI can recover by letting the user retry.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CoreError::TransportFailure(_) | CoreError::Deserialization(_)
        )
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Strip query parameters so filter values and tokens stay out of
        // user-visible messages.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::TransportFailure(sanitized)
    }
}
