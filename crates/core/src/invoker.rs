//! Contract actions: registration, redeem and the refresh read path.

use crate::abi::{self, AbiError, DynSolType, DynSolValue, B256, U256};
use crate::amount::{format_ether, parse_count, parse_ether, registration_value};
use crate::contract::{ContractHandle, SendOptions};
use crate::error::{DappError, Result};
use crate::session::SessionContext;
use crate::types::Receipt;
use artist_token_config::{ContractConfig, RedeemConfig};
use futures::stream::{FuturesUnordered, StreamExt};
use num_bigint::BigUint;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Parameters of one state-changing registration call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRequest {
    pub name: String,
    pub count: u64,
    /// Minimum token price in wei
    pub min_price: BigUint,
    /// Value attached to the call in wei
    pub value: BigUint,
    pub gas_limit: u64,
}

/// Hooks fired when an action completes. Refreshing displayed state after a
/// confirmed registration belongs in `on_confirmed`.
pub trait ActionObserver: Send + Sync {
    fn on_confirmed(&self, _request: &ActionRequest, _receipt: &Receipt) {}

    fn on_failed(&self, _request: &ActionRequest, _error: &DappError) {}

    fn on_redeemed(&self, _notice: &str) {}
}

/// Observer that only logs
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingObserver;

impl ActionObserver for LoggingObserver {
    fn on_confirmed(&self, request: &ActionRequest, receipt: &Receipt) {
        info!(
            target: "artist_token",
            name = %request.name,
            tx = %receipt.transaction_hash,
            "artist has successfully been created"
        );
    }

    fn on_redeemed(&self, notice: &str) {
        info!(target: "artist_token", "{}", notice);
    }
}

/// Submitted action; `outcome` fires once when the call is mined or fails.
#[derive(Debug)]
pub struct Submission {
    request: ActionRequest,
    outcome: oneshot::Receiver<Result<Receipt>>,
}

impl Submission {
    pub fn request(&self) -> &ActionRequest {
        &self.request
    }

    /// Waits for the one-shot completion notification.
    pub async fn outcome(self) -> Result<Receipt> {
        self.outcome.await.unwrap_or_else(|_| {
            Err(DappError::Transport(
                "submission task ended without reporting".to_string(),
            ))
        })
    }
}

/// Redeem submission plus the delayed redemption notice
#[derive(Debug)]
pub struct Redemption {
    pub submission: Submission,
    pub notice: JoinHandle<()>,
}

impl Redemption {
    /// Waits for both the registration outcome and the notice. The notice
    /// fires whether or not the registration succeeds.
    pub async fn completed(self) -> Result<Receipt> {
        let (outcome, notice) = tokio::join!(self.submission.outcome(), self.notice);
        if let Err(err) = notice {
            warn!(target: "artist_token", error = %err, "redemption notice task failed");
        }
        outcome
    }
}

/// Result of one lookup of the refresh fan-out
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshEntry {
    pub index: u64,
    pub result: Result<Vec<DynSolValue>>,
}

/// Result of [`ActionInvoker::refresh_all`]; entries are in completion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Refresh {
    pub count: u64,
    pub entries: Vec<RefreshEntry>,
}

impl Refresh {
    /// Entries sorted by index
    pub fn sorted(mut self) -> Vec<RefreshEntry> {
        self.entries.sort_by_key(|entry| entry.index);
        self.entries
    }
}

/// Issues contract actions against a Ready session.
pub struct ActionInvoker {
    contract: ContractConfig,
    redeem: RedeemConfig,
    observer: Arc<dyn ActionObserver>,
}

impl ActionInvoker {
    pub fn new(contract: ContractConfig, redeem: RedeemConfig) -> Self {
        Self {
            contract,
            redeem,
            observer: Arc::new(LoggingObserver),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn ActionObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Registers `name` with `count` tokens at `min_price` wei, attaching
    /// `value` wei.
    ///
    /// Fails fast with [`DappError::SessionNotReady`] before touching the
    /// provider, and with [`DappError::RuntimeUnavailable`] when called
    /// outside a tokio runtime. Send and confirmation errors arrive through
    /// the returned [`Submission`].
    pub fn submit(
        &self,
        context: &SessionContext,
        name: &str,
        count: u64,
        min_price: BigUint,
        value: BigUint,
    ) -> Result<Submission> {
        let session = context.session()?;
        let runtime = current_runtime()?;
        let contract = session.contract().clone();

        let function = contract.function(&self.contract.register_method)?;
        let name_param = function
            .inputs
            .first()
            .ok_or_else(|| AbiError::ArgumentCount {
                expected: 3,
                got: function.inputs.len(),
            })?;
        let name_token = encode_name(name, &abi::param_type(&name_param.ty)?)?;

        let request = ActionRequest {
            name: name.to_string(),
            count,
            min_price,
            value,
            gas_limit: self.contract.gas_limit,
        };
        let args = vec![
            name_token,
            DynSolValue::Uint(U256::from(request.count), 256),
            abi::uint(&request.min_price)?,
        ];
        let options = SendOptions {
            from: session.active_account().clone(),
            value: request.value.clone(),
            gas: request.gas_limit,
        };

        let (notify, outcome) = oneshot::channel();
        let method = self.contract.register_method.clone();
        let observer = Arc::clone(&self.observer);
        let task_request = request.clone();

        runtime.spawn(async move {
            let result = send_and_confirm(&contract, &method, &args, options).await;
            match &result {
                Ok(receipt) => {
                    debug!(
                        target: "artist_token",
                        tx = %receipt.transaction_hash,
                        block = ?receipt.block_number,
                        "registration confirmed"
                    );
                    observer.on_confirmed(&task_request, receipt);
                }
                Err(err) => {
                    warn!(
                        target: "artist_token",
                        name = %encoded_name_hex(&task_request.name),
                        count = task_request.count,
                        value = %task_request.value,
                        error = %err,
                        "registration failed"
                    );
                    observer.on_failed(&task_request, err);
                }
            }
            if notify.send(result).is_err() {
                debug!(target: "artist_token", "submission outcome dropped by caller");
            }
        });

        Ok(Submission { request, outcome })
    }

    /// Registration from raw form input: `price` is in ether, the attached
    /// value is the per-token fee times `count` plus the configured margin.
    pub fn register_from_form(
        &self,
        context: &SessionContext,
        name: &str,
        count: &str,
        price: &str,
    ) -> Result<Submission> {
        context.session()?;
        let count = parse_count(count)?;
        let min_price = parse_ether(price)?;
        let value = registration_value(
            count,
            self.contract.fee_per_token_wei,
            self.contract.value_margin_wei,
        );

        info!(
            target: "artist_token",
            name,
            count,
            min_price = %format_ether(&min_price),
            value = %format_ether(&value),
            "registering artist"
        );
        self.submit(context, name, count, min_price, value)
    }

    /// Preset redeem: a fixed registration followed, after the configured
    /// delay, by the redemption notice.
    pub fn redeem(&self, context: &SessionContext) -> Result<Redemption> {
        context.session()?;
        let runtime = current_runtime()?;
        let redeem = &self.redeem;
        let submission =
            self.register_from_form(context, &redeem.name, &redeem.count.to_string(), &redeem.price)?;

        let observer = Arc::clone(&self.observer);
        let delay = Duration::from_millis(redeem.notice_delay_ms);
        let notice_text = redeem.notice.clone();
        let notice = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            observer.on_redeemed(&notice_text);
        });

        Ok(Redemption { submission, notice })
    }

    /// Reads the count accessor, then issues one independent lookup per
    /// index. Lookups run concurrently and complete in any order; a failed
    /// lookup is recorded in its entry without affecting the others.
    pub async fn refresh_all(&self, context: &SessionContext) -> Result<Refresh> {
        let session = context.session()?;
        let contract = session.contract();

        let count_tokens = contract.call(&self.contract.count_method, &[]).await?;
        let count = count_tokens
            .into_iter()
            .next()
            .as_ref()
            .and_then(abi::to_u64)
            .ok_or_else(|| AbiError::Decode {
                function: self.contract.count_method.clone(),
                reason: "expected a uint count".to_string(),
            })?;
        debug!(target: "artist_token", count, "refreshing artists");

        let method = self.contract.lookup_method.as_str();
        let mut lookups: FuturesUnordered<_> = (0..count)
            .map(|index| async move {
                let result = contract
                    .call(method, &[DynSolValue::Uint(U256::from(index), 256)])
                    .await;
                RefreshEntry { index, result }
            })
            .collect();

        let mut entries = Vec::with_capacity(count.min(1024) as usize);
        while let Some(entry) = lookups.next().await {
            match &entry.result {
                Ok(tokens) => debug!(
                    target: "artist_token",
                    index = entry.index,
                    value = %join_values(tokens),
                    "artist lookup"
                ),
                Err(err) => warn!(
                    target: "artist_token",
                    index = entry.index,
                    error = %err,
                    "artist lookup failed"
                ),
            }
            entries.push(entry);
        }

        Ok(Refresh { count, entries })
    }
}

async fn send_and_confirm(
    contract: &ContractHandle,
    method: &str,
    args: &[DynSolValue],
    options: SendOptions,
) -> Result<Receipt> {
    contract.send(method, args, options).await?.confirmed().await
}

/// Encodes a name as its ASCII bytes in the form the interface expects.
pub fn encode_name(name: &str, kind: &DynSolType) -> Result<DynSolValue> {
    let bytes = name.as_bytes();
    match kind {
        DynSolType::FixedBytes(size) if bytes.len() > *size => {
            Err(AbiError::ValueOutOfRange(format!("bytes{}", size)).into())
        }
        DynSolType::FixedBytes(size) => {
            let mut word = [0u8; 32];
            word[..bytes.len()].copy_from_slice(bytes);
            Ok(DynSolValue::FixedBytes(B256::from(word), *size))
        }
        DynSolType::Bytes => Ok(DynSolValue::Bytes(bytes.to_vec())),
        DynSolType::String => Ok(DynSolValue::String(name.to_string())),
        other => Err(AbiError::TypeMismatch {
            index: 0,
            expected: format!("{:?}", other),
            got: "string".to_string(),
        }
        .into()),
    }
}

fn current_runtime() -> Result<Handle> {
    Handle::try_current().map_err(|_| DappError::RuntimeUnavailable)
}

fn encoded_name_hex(name: &str) -> String {
    format!("0x{}", hex::encode(name.as_bytes()))
}

fn join_values(values: &[DynSolValue]) -> String {
    values
        .iter()
        .map(abi::format_value)
        .collect::<Vec<_>>()
        .join(", ")
}
