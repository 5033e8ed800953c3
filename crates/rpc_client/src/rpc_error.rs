use artist_token_core::ProviderError;
use thiserror::Error;

/// Invalid JSON was received by the server
pub const PARSE_ERROR: i64 = -32700;
/// Internal JSON-RPC error; also used for HTTP failures
pub const INTERNAL_ERROR: i64 = -32603;
/// Generic server error; Ganache and geth report reverts with it
pub const SERVER_ERROR: i64 = -32000;
/// Execution reverted (EIP-1474)
pub const EXECUTION_REVERTED: i64 = 3;
/// The user rejected the request (EIP-1193)
pub const USER_REJECTED: i64 = 4001;

/// JSON-RPC error object, or a transport failure mapped to one
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("RPC error {code}: {message}")]
pub struct RpcError {
    /// Error code
    pub code: i64,

    /// Error message
    pub message: String,
}

impl RpcError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Whether the node or the user refused the request itself, as opposed
    /// to the request never reaching it
    pub fn is_rejection(&self) -> bool {
        matches!(self.code, USER_REJECTED | EXECUTION_REVERTED | SERVER_ERROR)
    }
}

impl From<RpcError> for ProviderError {
    fn from(err: RpcError) -> Self {
        if err.is_rejection() {
            ProviderError::Rejected {
                code: err.code,
                message: err.message,
            }
        } else {
            ProviderError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_codes_map_to_rejected() {
        for code in [USER_REJECTED, EXECUTION_REVERTED, SERVER_ERROR] {
            let err: ProviderError = RpcError::new(code, "nope").into();
            assert!(matches!(err, ProviderError::Rejected { .. }), "{}", code);
        }

        let err: ProviderError = RpcError::new(INTERNAL_ERROR, "HTTP error: refused").into();
        assert_eq!(
            err,
            ProviderError::Transport("RPC error -32603: HTTP error: refused".to_string())
        );
    }
}
