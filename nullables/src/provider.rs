//! Scripted provider — programmed reads, recorded writes.

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;

use vaultops_gate::SessionState;
use vaultops_provider::{CallValue, ContractCall, Provider, ProviderError, Receipt};
use vaultops_types::{ChainId, TxHash};

/// A test provider that answers reads from a script and records writes
/// instead of sending them.
pub struct NullProvider {
    session: Mutex<SessionState>,
    reads: Mutex<HashMap<String, Value>>,
    read_failures: Mutex<HashMap<String, String>>,
    send_failures: Mutex<HashMap<String, String>>,
    send_failures_once: Mutex<HashMap<String, String>>,
    sent: Mutex<Vec<ContractCall>>,
    switched: Mutex<Vec<ChainId>>,
    tx_counter: Mutex<u64>,
    receipt_success: Mutex<bool>,
}

fn key(contract: &str, function: &str) -> String {
    format!("{contract}::{function}")
}

fn key_with_args(contract: &str, function: &str, args: &Value) -> String {
    format!("{contract}::{function}::{args}")
}

impl NullProvider {
    pub fn new(session: SessionState) -> Self {
        Self {
            session: Mutex::new(session),
            reads: Mutex::new(HashMap::new()),
            read_failures: Mutex::new(HashMap::new()),
            send_failures: Mutex::new(HashMap::new()),
            send_failures_once: Mutex::new(HashMap::new()),
            sent: Mutex::new(Vec::new()),
            switched: Mutex::new(Vec::new()),
            tx_counter: Mutex::new(0),
            receipt_success: Mutex::new(true),
        }
    }

    pub fn set_session(&self, session: SessionState) {
        *self.session.lock().unwrap() = session;
    }

    /// Program the result of a read, regardless of arguments.
    pub fn stub_read(&self, contract: &str, function: &str, value: Value) {
        self.reads
            .lock()
            .unwrap()
            .insert(key(contract, function), value);
    }

    /// Program the result of a read for one exact argument list.
    pub fn stub_read_with_args(&self, contract: &str, function: &str, args: Value, value: Value) {
        self.reads
            .lock()
            .unwrap()
            .insert(key_with_args(contract, function, &args), value);
    }

    /// Make a read fail with a bridge error.
    pub fn fail_read(&self, contract: &str, function: &str, message: &str) {
        self.read_failures
            .lock()
            .unwrap()
            .insert(key(contract, function), message.to_string());
    }

    /// Make a write revert.
    pub fn fail_send(&self, contract: &str, function: &str, message: &str) {
        self.send_failures
            .lock()
            .unwrap()
            .insert(key(contract, function), message.to_string());
    }

    /// Make only the next matching write revert; later ones succeed.
    pub fn fail_send_once(&self, contract: &str, function: &str, message: &str) {
        self.send_failures_once
            .lock()
            .unwrap()
            .insert(key(contract, function), message.to_string());
    }

    /// Make every receipt report failure.
    pub fn fail_receipts(&self) {
        *self.receipt_success.lock().unwrap() = false;
    }

    /// Every transaction submitted so far, in order.
    pub fn sent_calls(&self) -> Vec<ContractCall> {
        self.sent.lock().unwrap().clone()
    }

    /// Every chain switch requested so far, in order.
    pub fn switched_chains(&self) -> Vec<ChainId> {
        self.switched.lock().unwrap().clone()
    }
}

impl Provider for NullProvider {
    async fn session(&self) -> Result<SessionState, ProviderError> {
        Ok(self.session.lock().unwrap().clone())
    }

    async fn call(&self, call: &ContractCall) -> Result<CallValue, ProviderError> {
        let contract = call.contract.as_str();
        if let Some(msg) = self
            .read_failures
            .lock()
            .unwrap()
            .get(&key(contract, &call.function))
        {
            return Err(ProviderError::Bridge(msg.clone()));
        }

        let args: Value = call
            .args
            .iter()
            .map(|a| a.to_json())
            .collect::<Vec<_>>()
            .into();
        let reads = self.reads.lock().unwrap();
        reads
            .get(&key_with_args(contract, &call.function, &args))
            .or_else(|| reads.get(&key(contract, &call.function)))
            .cloned()
            .map(CallValue)
            .ok_or_else(|| {
                ProviderError::Bridge(format!("no stub for {}::{}", contract, call.function))
            })
    }

    async fn send(&self, call: &ContractCall) -> Result<TxHash, ProviderError> {
        let contract = call.contract.as_str();
        if let Some(msg) = self
            .send_failures_once
            .lock()
            .unwrap()
            .remove(&key(contract, &call.function))
        {
            return Err(ProviderError::Reverted(msg));
        }
        if let Some(msg) = self
            .send_failures
            .lock()
            .unwrap()
            .get(&key(contract, &call.function))
        {
            return Err(ProviderError::Reverted(msg.clone()));
        }

        self.sent.lock().unwrap().push(call.clone());
        let mut counter = self.tx_counter.lock().unwrap();
        *counter += 1;
        let hash = format!("0x{:064x}", *counter);
        Ok(TxHash::parse(&hash).expect("synthesized hash is well-formed"))
    }

    async fn wait_for_receipt(&self, hash: &TxHash) -> Result<Receipt, ProviderError> {
        Ok(Receipt {
            tx_hash: hash.clone(),
            success: *self.receipt_success.lock().unwrap(),
            block_number: 1,
        })
    }

    async fn switch_chain(&self, chain: ChainId) -> Result<(), ProviderError> {
        self.switched.lock().unwrap().push(chain);
        let mut session = self.session.lock().unwrap();
        session.chain_id = Some(chain);
        Ok(())
    }
}
