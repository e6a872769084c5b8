//! Staged node accounts for one transaction.
//!
//! Accounts are loaded with a single state read, mutated in memory and
//! written back with a single `set_state`, so a rejected transaction leaves
//! global state untouched.

use obol_store::{LedgerContext, StateEntry};
use obol_types::{Address, NodeAccount};

use crate::ProcessorError;

struct Staged {
    address: Address,
    account: NodeAccount,
    existed: bool,
}

pub struct AccountStage {
    staged: Vec<Staged>,
}

impl AccountStage {
    /// Load `addresses` in one read. Absent accounts start zeroed in state `New`.
    pub fn load<C: LedgerContext + ?Sized>(
        context: &C,
        addresses: &[Address],
    ) -> Result<Self, ProcessorError> {
        let mut unique: Vec<Address> = Vec::with_capacity(addresses.len());
        for address in addresses {
            if !unique.contains(address) {
                unique.push(address.clone());
            }
        }

        let entries = context.get_state(&unique)?;
        let mut staged = Vec::with_capacity(unique.len());
        for address in unique {
            let stored = entries.iter().find(|entry| entry.address == address);
            let staged_account = match stored {
                Some(entry) => Staged {
                    account: NodeAccount::from_bytes(&entry.data)?,
                    address,
                    existed: true,
                },
                None => Staged {
                    account: NodeAccount::default(),
                    address,
                    existed: false,
                },
            };
            staged.push(staged_account);
        }
        Ok(Self { staged })
    }

    pub fn get(&self, address: &Address) -> Result<&NodeAccount, ProcessorError> {
        self.find(address).map(|staged| &staged.account)
    }

    pub fn get_mut(&mut self, address: &Address) -> Result<&mut NodeAccount, ProcessorError> {
        self.staged
            .iter_mut()
            .find(|staged| staged.address == *address)
            .map(|staged| &mut staged.account)
            .ok_or_else(|| not_staged(address))
    }

    /// Whether the account was present in global state when loaded.
    pub fn existed(&self, address: &Address) -> Result<bool, ProcessorError> {
        self.find(address).map(|staged| staged.existed)
    }

    pub fn addresses(&self) -> impl Iterator<Item = &Address> {
        self.staged.iter().map(|staged| &staged.address)
    }

    /// Write every staged account, in load order, with one `set_state`.
    pub fn commit<C: LedgerContext + ?Sized>(self, context: &C) -> Result<Vec<Address>, ProcessorError> {
        let mut entries = Vec::with_capacity(self.staged.len());
        for staged in self.staged {
            entries.push(StateEntry::new(staged.address, staged.account.to_bytes()?));
        }
        Ok(context.set_state(entries)?)
    }

    fn find(&self, address: &Address) -> Result<&Staged, ProcessorError> {
        self.staged
            .iter()
            .find(|staged| staged.address == *address)
            .ok_or_else(|| not_staged(address))
    }
}

fn not_staged(address: &Address) -> ProcessorError {
    ProcessorError::Storage(format!("account {address} was not loaded"))
}
