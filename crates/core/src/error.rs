use crate::abi::AbiError;
use crate::types::NetworkId;
use thiserror::Error;

/// Errors surfaced by session resolution and contract actions
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DappError {
    /// The provider authorized no account
    #[error("no authorized account available from the provider")]
    NoAccount,

    /// The contract has no deployment on the provider's network
    #[error("contract not deployed on network {network_id}")]
    UnsupportedNetwork { network_id: NetworkId },

    /// An action was attempted before the session reached Ready
    #[error("session is not ready")]
    SessionNotReady,

    /// The state-changing call was reverted or refused
    #[error("call rejected: {reason}")]
    CallRejected { reason: String },

    /// Network or provider failure
    #[error("transport error: {0}")]
    Transport(String),

    /// Deployment metadata could not be read or parsed
    #[error("invalid deployment metadata: {0}")]
    Metadata(String),

    #[error(transparent)]
    Abi(#[from] AbiError),

    /// User supplied amount or count could not be parsed exactly
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// Resolution was started on a context that already left Uninitialized
    #[error("connection resolver already ran for this session context")]
    ResolverReentered,

    /// A submission was made outside a tokio runtime
    #[error("no tokio runtime available to drive the submission")]
    RuntimeUnavailable,
}

/// Failure reported by a [`Provider`](crate::Provider)
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// The provider or the user refused the request, or execution reverted
    #[error("rejected ({code}): {message}")]
    Rejected { code: i64, message: String },

    #[error("{0}")]
    Transport(String),
}

impl From<ProviderError> for DappError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Rejected { code, message } => DappError::CallRejected {
                reason: format!("{} (code {})", message, code),
            },
            ProviderError::Transport(message) => DappError::Transport(message),
        }
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, DappError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_rejection_maps_to_call_rejected() {
        let err: DappError = ProviderError::Rejected {
            code: 4001,
            message: "User denied transaction signature".to_string(),
        }
        .into();
        assert!(matches!(err, DappError::CallRejected { .. }));
        assert!(err.to_string().contains("4001"));

        let err: DappError = ProviderError::Transport("connection refused".to_string()).into();
        assert_eq!(err, DappError::Transport("connection refused".to_string()));
    }
}
