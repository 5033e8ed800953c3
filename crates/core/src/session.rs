//! Session state shared by the resolver (single writer) and the invoker.

use crate::contract::ContractHandle;
use crate::error::{DappError, Result};
use crate::types::{Address, NetworkId};
use parking_lot::Mutex;
use std::sync::Arc;

/// Resolved connection: who sends, on which network, to which contract
#[derive(Debug, Clone)]
pub struct Session {
    active_account: Address,
    network_id: NetworkId,
    contract: ContractHandle,
}

impl Session {
    pub fn new(active_account: Address, network_id: NetworkId, contract: ContractHandle) -> Self {
        Self {
            active_account,
            network_id,
            contract,
        }
    }

    pub fn active_account(&self) -> &Address {
        &self.active_account
    }

    pub fn network_id(&self) -> &NetworkId {
        &self.network_id
    }

    pub fn contract(&self) -> &ContractHandle {
        &self.contract
    }
}

/// `Uninitialized → Resolving → Ready | Failed`; Ready and Failed are final.
#[derive(Debug, Clone, Default)]
pub enum SessionState {
    #[default]
    Uninitialized,
    Resolving,
    Ready(Arc<Session>),
    Failed(DappError),
}

/// Discriminant of [`SessionState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Uninitialized,
    Resolving,
    Ready,
    Failed,
}

/// Owner of the session state for one page/process.
#[derive(Debug, Default)]
pub struct SessionContext {
    state: Mutex<SessionState>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> SessionStatus {
        match &*self.state.lock() {
            SessionState::Uninitialized => SessionStatus::Uninitialized,
            SessionState::Resolving => SessionStatus::Resolving,
            SessionState::Ready(_) => SessionStatus::Ready,
            SessionState::Failed(_) => SessionStatus::Failed,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status() == SessionStatus::Ready
    }

    /// The session, or [`DappError::SessionNotReady`] in any other state.
    pub fn session(&self) -> Result<Arc<Session>> {
        match &*self.state.lock() {
            SessionState::Ready(session) => Ok(Arc::clone(session)),
            _ => Err(DappError::SessionNotReady),
        }
    }

    /// Why resolution failed, once in the Failed state
    pub fn failure(&self) -> Option<DappError> {
        match &*self.state.lock() {
            SessionState::Failed(err) => Some(err.clone()),
            _ => None,
        }
    }

    pub(crate) fn begin_resolving(&self) -> Result<()> {
        let mut state = self.state.lock();
        match *state {
            SessionState::Uninitialized => {
                *state = SessionState::Resolving;
                Ok(())
            }
            _ => Err(DappError::ResolverReentered),
        }
    }

    pub(crate) fn complete(&self, outcome: Result<Session>) -> Result<Arc<Session>> {
        let mut state = self.state.lock();
        debug_assert!(matches!(*state, SessionState::Resolving));
        match outcome {
            Ok(session) => {
                let session = Arc::new(session);
                *state = SessionState::Ready(Arc::clone(&session));
                Ok(session)
            }
            Err(err) => {
                *state = SessionState::Failed(err.clone());
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uninitialized_context_is_not_ready() {
        let context = SessionContext::new();
        assert_eq!(context.status(), SessionStatus::Uninitialized);
        assert_eq!(context.session().unwrap_err(), DappError::SessionNotReady);
        assert!(context.failure().is_none());
    }

    #[test]
    fn failed_resolution_is_terminal() {
        let context = SessionContext::new();
        context.begin_resolving().unwrap();
        assert_eq!(context.status(), SessionStatus::Resolving);
        assert_eq!(context.session().unwrap_err(), DappError::SessionNotReady);

        let err = context.complete(Err(DappError::NoAccount)).unwrap_err();
        assert_eq!(err, DappError::NoAccount);
        assert_eq!(context.status(), SessionStatus::Failed);
        assert_eq!(context.failure(), Some(DappError::NoAccount));

        assert_eq!(
            context.begin_resolving().unwrap_err(),
            DappError::ResolverReentered
        );
        assert_eq!(context.status(), SessionStatus::Failed);
    }
}
