//! Obligatory payment: every committee member except the block winner pays a
//! fixed amount, drawn tier by tier, into the winner's unfrozen reputation.

use obol_store::LedgerContext;
use obol_types::{Address, NodeAccount};
use tracing::{debug, info};

use crate::committee::Committee;
use crate::state::AccountStage;
use crate::ProcessorError;

/// Amounts taken from each tier of one paying member.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TierWithdrawal {
    pub from_balance: u64,
    pub from_unfrozen: u64,
    pub from_frozen: u64,
}

impl TierWithdrawal {
    pub fn total(&self) -> u64 {
        // Each part is bounded by the amount requested, so the sum cannot exceed it.
        self.from_balance + self.from_unfrozen + self.from_frozen
    }
}

/// Outcome of a committed distribution.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Distribution {
    /// Per payer, in committee order.
    pub payments: Vec<(Address, TierWithdrawal)>,
    /// Amount added to the winner's unfrozen reputation.
    pub credited: u64,
}

impl Distribution {
    /// True when nothing was moved (single-member committee).
    pub fn is_empty(&self) -> bool {
        self.payments.is_empty()
    }
}

/// Take `amount` from `account`: operational balance first, then unfrozen,
/// then frozen reputation.
///
/// Returns `None`, leaving the account untouched, when the three tiers
/// together hold less than `amount`.
pub fn withdraw_tiered(account: &mut NodeAccount, amount: u64) -> Option<TierWithdrawal> {
    let mut remaining = amount;
    let from_balance = remaining.min(account.balance);
    remaining -= from_balance;
    let from_unfrozen = remaining.min(account.reputation.unfrozen);
    remaining -= from_unfrozen;
    let from_frozen = remaining.min(account.reputation.frozen);
    remaining -= from_frozen;

    if remaining > 0 {
        return None;
    }

    account.balance -= from_balance;
    account.reputation.unfrozen -= from_unfrozen;
    account.reputation.frozen -= from_frozen;
    Some(TierWithdrawal {
        from_balance,
        from_unfrozen,
        from_frozen,
    })
}

pub struct ObligatoryPaymentEngine;

impl ObligatoryPaymentEngine {
    /// Charge every payer `per_member_amount` and credit the winner.
    ///
    /// All committee accounts are read with one `get_state` and written with
    /// one `set_state`. Any insolvent payer aborts the whole distribution
    /// before anything is written. A single-member committee is a no-op that
    /// does not touch the context, and a zero payment writes nothing.
    pub fn distribute<C: LedgerContext + ?Sized>(
        committee: &Committee,
        per_member_amount: u64,
        context: &C,
    ) -> Result<Distribution, ProcessorError> {
        if committee.members().len() <= 1 {
            debug!(winner = %committee.winner(), "single-member committee, nothing to distribute");
            return Ok(Distribution::default());
        }

        let mut stage = AccountStage::load(context, committee.members())?;
        let mut distribution = Distribution::default();

        for payer in committee.payers() {
            let account = stage.get_mut(payer)?;
            let withdrawal = withdraw_tiered(account, per_member_amount).ok_or_else(|| {
                debug!(
                    %payer,
                    amount = per_member_amount,
                    balance = account.balance,
                    unfrozen = account.reputation.unfrozen,
                    frozen = account.reputation.frozen,
                    "committee member cannot cover obligatory payment"
                );
                ProcessorError::InsufficientFunds
            })?;
            debug!(
                %payer,
                from_balance = withdrawal.from_balance,
                from_unfrozen = withdrawal.from_unfrozen,
                from_frozen = withdrawal.from_frozen,
                "obligatory payment withdrawn"
            );
            distribution.credited = distribution
                .credited
                .checked_add(withdrawal.total())
                .ok_or(ProcessorError::Overflow)?;
            distribution.payments.push((payer.clone(), withdrawal));
        }

        if distribution.credited == 0 {
            debug!(winner = %committee.winner(), "obligatory payment is zero, nothing to write");
            return Ok(distribution);
        }

        let winner = stage.get_mut(committee.winner())?;
        winner.reputation.unfrozen = winner
            .reputation
            .unfrozen
            .checked_add(distribution.credited)
            .ok_or(ProcessorError::Overflow)?;

        stage.commit(context)?;
        info!(
            winner = %committee.winner(),
            amount = per_member_amount,
            credited = distribution.credited,
            payers = distribution.payments.len(),
            "obligatory payment distributed"
        );
        Ok(distribution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use obol_types::Reputation;

    fn account(balance: u64, unfrozen: u64, frozen: u64) -> NodeAccount {
        NodeAccount {
            balance,
            reputation: Reputation { frozen, unfrozen },
            ..NodeAccount::default()
        }
    }

    #[test]
    fn draws_balance_first() {
        let mut acc = account(10_000, 5, 5);
        let taken = withdraw_tiered(&mut acc, 2000).unwrap();
        assert_eq!(taken.from_balance, 2000);
        assert_eq!(taken.total(), 2000);
        assert_eq!(acc, account(8000, 5, 5));
    }

    #[test]
    fn spills_into_unfrozen_then_frozen() {
        let mut acc = account(500, 1000, 5000);
        let taken = withdraw_tiered(&mut acc, 2000).unwrap();
        assert_eq!(
            taken,
            TierWithdrawal {
                from_balance: 500,
                from_unfrozen: 1000,
                from_frozen: 500,
            }
        );
        assert_eq!(acc, account(0, 0, 4500));
    }

    #[test]
    fn exact_total_empties_all_tiers() {
        let mut acc = account(1, 1, 1);
        assert!(withdraw_tiered(&mut acc, 3).is_some());
        assert_eq!(acc, account(0, 0, 0));
    }

    #[test]
    fn insufficient_leaves_account_untouched() {
        let mut acc = account(1, 1, 1);
        assert_eq!(withdraw_tiered(&mut acc, 4), None);
        assert_eq!(acc, account(1, 1, 1));
    }

    #[test]
    fn zero_amount_is_free() {
        let mut acc = account(0, 0, 0);
        assert_eq!(withdraw_tiered(&mut acc, 0), Some(TierWithdrawal::default()));
    }
}
