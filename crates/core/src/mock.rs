//! In-memory provider used by the unit tests.

use crate::abi::{self, DynSolValue, EvmAddress, JsonAbi, U256};
use crate::error::ProviderError;
use crate::metadata::{DeploymentMetadata, NetworkDeployment};
use crate::provider::Provider;
use crate::types::{Address, CallRequest, NetworkId, Receipt, TransactionRequest, TxHash};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub(crate) const ARTIST_ABI: &str = r#"[
    {"inputs": [{"name": "_name", "type": "bytes32"}, {"name": "_count", "type": "uint256"}, {"name": "_minPrice", "type": "uint256"}],
     "name": "registerArtist", "outputs": [], "stateMutability": "payable", "type": "function"},
    {"inputs": [], "name": "numArtists", "outputs": [{"name": "", "type": "uint256"}], "stateMutability": "view", "type": "function"},
    {"inputs": [{"name": "", "type": "uint256"}], "name": "artistToAddresses", "outputs": [{"name": "", "type": "address"}], "stateMutability": "view", "type": "function"}
]"#;

pub(crate) fn artist_interface() -> JsonAbi {
    serde_json::from_str(ARTIST_ABI).unwrap()
}

pub(crate) fn sample_metadata(network_id: &str, address: &str) -> DeploymentMetadata {
    let mut networks = HashMap::new();
    networks.insert(
        NetworkId::from(network_id),
        NetworkDeployment {
            address: Address::from(address),
            transaction_hash: None,
        },
    );
    DeploymentMetadata {
        contract_name: Some("ArtistTokenContract".to_string()),
        networks,
        abi: artist_interface(),
    }
}

/// Address bytes the mock registry stores at `index`
fn artist_bytes(index: u64) -> [u8; 20] {
    let mut bytes = [0u8; 20];
    bytes[12..].copy_from_slice(&index.to_be_bytes());
    bytes
}

/// Decoded address the mock registry stores at `index`
pub(crate) fn artist_value(index: u64) -> DynSolValue {
    DynSolValue::Address(EvmAddress::from(artist_bytes(index)))
}

/// 32-byte big-endian word
fn word(value: U256) -> Vec<u8> {
    value.to_be_bytes::<32>().to_vec()
}

/// Provider answering the artist registry calls from memory and recording
/// every request it receives.
pub(crate) struct MockProvider {
    network_id: Result<NetworkId, ProviderError>,
    accounts: Result<Vec<Address>, ProviderError>,
    artist_count: u64,
    failing_lookup: Option<u64>,
    lookup_delays: Vec<Duration>,
    fetch_delay: Option<Duration>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
    send_result: Result<TxHash, ProviderError>,
    receipt_success: bool,
    pending_polls: Mutex<usize>,
    requests: Mutex<Vec<String>>,
    calls: Mutex<Vec<CallRequest>>,
    sent: Mutex<Vec<TransactionRequest>>,
}

impl MockProvider {
    pub(crate) fn new() -> Self {
        Self {
            network_id: Ok(NetworkId::from("5777")),
            accounts: Ok(vec![Address::from("0xABC")]),
            artist_count: 0,
            failing_lookup: None,
            lookup_delays: Vec::new(),
            fetch_delay: None,
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
            send_result: Ok(TxHash::new("0xfeed")),
            receipt_success: true,
            pending_polls: Mutex::new(0),
            requests: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_network_id(mut self, network_id: Result<NetworkId, ProviderError>) -> Self {
        self.network_id = network_id;
        self
    }

    pub(crate) fn with_accounts(mut self, accounts: Result<Vec<Address>, ProviderError>) -> Self {
        self.accounts = accounts;
        self
    }

    pub(crate) fn with_artists(mut self, count: u64) -> Self {
        self.artist_count = count;
        self
    }

    pub(crate) fn with_failing_lookup(mut self, index: u64) -> Self {
        self.failing_lookup = Some(index);
        self
    }

    /// Lookup of index `i` answers after `delays[i]`
    pub(crate) fn with_lookup_delays(mut self, delays: Vec<Duration>) -> Self {
        self.lookup_delays = delays;
        self
    }

    /// Delay applied to both the network id and the accounts fetch
    pub(crate) fn with_fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = Some(delay);
        self
    }

    pub(crate) fn with_send_result(mut self, result: Result<TxHash, ProviderError>) -> Self {
        self.send_result = result;
        self
    }

    /// Receipt status, reported after `pending_polls` polls returned `None`
    pub(crate) fn with_receipt(mut self, success: bool, pending_polls: usize) -> Self {
        self.receipt_success = success;
        self.pending_polls = Mutex::new(pending_polls);
        self
    }

    pub(crate) fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }

    pub(crate) fn calls(&self) -> Vec<CallRequest> {
        self.calls.lock().clone()
    }

    /// Highest number of lookups observed waiting at the same time
    pub(crate) fn peak_lookups_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    pub(crate) fn sent(&self) -> Vec<TransactionRequest> {
        self.sent.lock().clone()
    }

    fn record(&self, request: &str) {
        self.requests.lock().push(request.to_string());
    }

    async fn fetch_delay(&self) {
        if let Some(delay) = self.fetch_delay {
            tokio::time::sleep(delay).await;
        }
    }

    async fn lookup_delay(&self, index: u64) {
        let Some(delay) = self.lookup_delays.get(index as usize).copied() else {
            return;
        };
        let in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(in_flight, Ordering::SeqCst);
        tokio::time::sleep(delay).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn network_id(&self) -> Result<NetworkId, ProviderError> {
        self.record("network_id");
        self.fetch_delay().await;
        self.network_id.clone()
    }

    async fn accounts(&self) -> Result<Vec<Address>, ProviderError> {
        self.record("accounts");
        self.fetch_delay().await;
        self.accounts.clone()
    }

    async fn call(&self, request: &CallRequest) -> Result<Vec<u8>, ProviderError> {
        self.calls.lock().push(request.clone());
        let interface = artist_interface();
        let count = abi::function(&interface, "numArtists").unwrap();
        let lookup = abi::function(&interface, "artistToAddresses").unwrap();
        let selector = &request.data[..4];

        if selector == count.selector().as_slice() {
            self.record("numArtists");
            return Ok(word(U256::from(self.artist_count)));
        }

        if selector == lookup.selector().as_slice() {
            self.record("artistToAddresses");
            let index = u64::try_from(U256::from_be_slice(&request.data[4..36])).unwrap();
            self.lookup_delay(index).await;
            if Some(index) == self.failing_lookup || index >= self.artist_count {
                return Err(ProviderError::Rejected {
                    code: -32000,
                    message: "execution reverted".to_string(),
                });
            }
            let mut output = vec![0u8; 12];
            output.extend_from_slice(&artist_bytes(index));
            return Ok(output);
        }

        Err(ProviderError::Transport("unexpected call".to_string()))
    }

    async fn send_transaction(
        &self,
        request: &TransactionRequest,
    ) -> Result<TxHash, ProviderError> {
        self.record("send_transaction");
        self.sent.lock().push(request.clone());
        self.send_result.clone()
    }

    async fn transaction_receipt(&self, hash: &TxHash) -> Result<Option<Receipt>, ProviderError> {
        self.record("transaction_receipt");
        let mut pending = self.pending_polls.lock();
        if *pending > 0 {
            *pending -= 1;
            return Ok(None);
        }
        Ok(Some(Receipt {
            transaction_hash: hash.clone(),
            block_number: Some(1),
            success: self.receipt_success,
        }))
    }
}
