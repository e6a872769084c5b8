//! Committee resolution for the obligatory payment.

use std::collections::HashSet;

use obol_crypto::address_for;
use obol_types::{Address, PublicKey};
use tracing::debug;

use crate::settings::Settings;
use crate::ProcessorError;

/// Ordered, duplicate-free set of node addresses containing the block winner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Committee {
    members: Vec<Address>,
    winner: Address,
}

impl Committee {
    pub fn members(&self) -> &[Address] {
        &self.members
    }

    pub fn winner(&self) -> &Address {
        &self.winner
    }

    /// Members other than the winner, in committee order.
    pub fn payers(&self) -> impl Iterator<Item = &Address> {
        self.members.iter().filter(move |member| **member != self.winner)
    }
}

pub struct CommitteeResolver;

impl CommitteeResolver {
    /// Build the committee from the allowed validators and designate the
    /// signer's node account as winner.
    ///
    /// Rejected with [`ProcessorError::MalformedCommittee`] when the list does
    /// not hold exactly `expected_size` entries (checked first), an entry is
    /// not a public key, two entries map to the same address, or the signer is
    /// not a member.
    pub fn resolve(
        settings: &Settings,
        expected_size: usize,
        signer: &PublicKey,
    ) -> Result<Committee, ProcessorError> {
        let validators = &settings.allowed_validators;
        if validators.len() != expected_size {
            debug!(
                expected = expected_size,
                actual = validators.len(),
                "committee size mismatch"
            );
            return Err(ProcessorError::MalformedCommittee);
        }

        let mut seen = HashSet::with_capacity(validators.len());
        let mut members = Vec::with_capacity(validators.len());
        for raw in validators {
            let key = PublicKey::from_hex(raw).map_err(|_| {
                debug!(entry = %raw, "committee entry is not a public key");
                ProcessorError::MalformedCommittee
            })?;
            let address = address_for(&key);
            if !seen.insert(address.clone()) {
                debug!(%address, "duplicate committee member");
                return Err(ProcessorError::MalformedCommittee);
            }
            members.push(address);
        }

        let winner = address_for(signer);
        if !seen.contains(&winner) {
            debug!(%winner, "signer is not a committee member");
            return Err(ProcessorError::MalformedCommittee);
        }

        Ok(Committee { members, winner })
    }
}
