//! Nullable ledger context: thread-safe in-memory global state for tests.

use obol_store::{LedgerContext, StateEntry, StoreError};
use obol_types::{Address, NodeAccount};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

/// An in-memory [`LedgerContext`] for testing.
///
/// By default every address is readable and writable. [`NullContext::declared`]
/// restricts reads to the given inputs and writes to the given outputs, the way
/// the validator scopes a context to a transaction header.
pub struct NullContext {
    state: Mutex<BTreeMap<Address, Vec<u8>>>,
    inputs: Option<BTreeSet<Address>>,
    outputs: Option<BTreeSet<Address>>,
    time_out_next: Mutex<bool>,
    write_batches: Mutex<Vec<Vec<Address>>>,
}

impl NullContext {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(BTreeMap::new()),
            inputs: None,
            outputs: None,
            time_out_next: Mutex::new(false),
            write_batches: Mutex::new(Vec::new()),
        }
    }

    /// Restrict reads to `inputs` and writes to `outputs`.
    pub fn declared(
        mut self,
        inputs: impl IntoIterator<Item = Address>,
        outputs: impl IntoIterator<Item = Address>,
    ) -> Self {
        self.inputs = Some(inputs.into_iter().collect());
        self.outputs = Some(outputs.into_iter().collect());
        self
    }

    /// Seed raw bytes at an address, bypassing scoping and write tracking.
    pub fn insert(&self, address: Address, data: Vec<u8>) {
        self.state.lock().unwrap().insert(address, data);
    }

    /// Seed a node account at an address.
    pub fn insert_account(&self, address: &Address, account: &NodeAccount) {
        let bytes = account.to_bytes().expect("node account always encodes");
        self.insert(address.clone(), bytes);
    }

    /// Raw bytes at an address, bypassing scoping.
    pub fn get(&self, address: &Address) -> Option<Vec<u8>> {
        self.state.lock().unwrap().get(address).cloned()
    }

    /// Decoded node account at an address, if one was written.
    pub fn account(&self, address: &Address) -> Option<NodeAccount> {
        self.get(address)
            .map(|bytes| NodeAccount::from_bytes(&bytes).expect("stored node account decodes"))
    }

    /// Copy of the whole state.
    pub fn snapshot(&self) -> BTreeMap<Address, Vec<u8>> {
        self.state.lock().unwrap().clone()
    }

    /// Make the next context call fail with [`StoreError::Timeout`].
    pub fn time_out_next_call(&self) {
        *self.time_out_next.lock().unwrap() = true;
    }

    /// Addresses of every successful `set_state` batch, in call order.
    pub fn write_batches(&self) -> Vec<Vec<Address>> {
        self.write_batches.lock().unwrap().clone()
    }

    fn check_timeout(&self, operation: &str) -> Result<(), StoreError> {
        let mut flag = self.time_out_next.lock().unwrap();
        if *flag {
            *flag = false;
            return Err(StoreError::Timeout(operation.to_string()));
        }
        Ok(())
    }

    fn check_declared<'a>(
        declared: &Option<BTreeSet<Address>>,
        mut addresses: impl Iterator<Item = &'a Address>,
    ) -> Result<(), StoreError> {
        let Some(declared) = declared else {
            return Ok(());
        };
        match addresses.find(|address| !declared.contains(*address)) {
            Some(address) => Err(StoreError::UndeclaredAddress(address.clone())),
            None => Ok(()),
        }
    }
}

fn poisoned(operation: &str) -> StoreError {
    StoreError::Backend(format!("{operation}: state lock poisoned"))
}

impl Default for NullContext {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerContext for NullContext {
    fn get_state(&self, addresses: &[Address]) -> Result<Vec<StateEntry>, StoreError> {
        self.check_timeout("get_state")?;
        Self::check_declared(&self.inputs, addresses.iter())?;
        let state = self.state.lock().map_err(|_| poisoned("get_state"))?;
        Ok(addresses
            .iter()
            .filter_map(|address| {
                state
                    .get(address)
                    .map(|data| StateEntry::new(address.clone(), data.clone()))
            })
            .collect())
    }

    fn set_state(&self, entries: Vec<StateEntry>) -> Result<Vec<Address>, StoreError> {
        self.check_timeout("set_state")?;
        Self::check_declared(&self.outputs, entries.iter().map(|entry| &entry.address))?;
        let mut state = self.state.lock().map_err(|_| poisoned("set_state"))?;
        let mut written = Vec::with_capacity(entries.len());
        for entry in entries {
            written.push(entry.address.clone());
            state.insert(entry.address, entry.data);
        }
        self.write_batches.lock().unwrap().push(written.clone());
        Ok(written)
    }
}
