//! Scoped read/write access to global state.

use crate::StoreError;
use obol_types::Address;

/// One address/value pair of global state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateEntry {
    pub address: Address,
    pub data: Vec<u8>,
}

impl StateEntry {
    pub fn new(address: Address, data: Vec<u8>) -> Self {
        Self { address, data }
    }
}

/// Capability granting a single transaction access to the addresses it declared.
///
/// Implementations may be network calls into the validator, so every call can
/// block and can fail with [`StoreError::Timeout`]. Reading an address outside
/// the declared inputs, or writing one outside the declared outputs, fails with
/// [`StoreError::UndeclaredAddress`].
pub trait LedgerContext {
    /// Read the current values of `addresses`.
    ///
    /// Addresses without a value are omitted from the result.
    fn get_state(&self, addresses: &[Address]) -> Result<Vec<StateEntry>, StoreError>;

    /// Write `entries` as one batch and return the addresses written.
    fn set_state(&self, entries: Vec<StateEntry>) -> Result<Vec<Address>, StoreError>;

    /// Read a single address.
    fn get_one(&self, address: &Address) -> Result<Option<Vec<u8>>, StoreError> {
        let entries = self.get_state(std::slice::from_ref(address))?;
        Ok(entries
            .into_iter()
            .find(|entry| entry.address == *address)
            .map(|entry| entry.data))
    }
}
