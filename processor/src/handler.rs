//! The node-account transaction handler.

use obol_crypto::{namespace_prefix, settings_address};
use obol_store::LedgerContext;
use obol_transactions::validation::{
    validate_address, validate_amount, validate_envelope, INVALID_ADDRESS,
};
use obol_transactions::{
    CloseMasternodePayload, GenesisPayload, InitializeMasternodePayload, InternalTransferPayload,
    NodeAccountMethod, ObligatoryPaymentPayload, TransactionEnvelope, TransactionHeader,
    TransactionPayload, TransferFromUnfrozenToOperationalPayload,
};
use obol_types::{Address, NodeState, PublicKey};
use tracing::{field, info, info_span, warn};

use crate::committee::CommitteeResolver;
use crate::config::ProcessorConfig;
use crate::obligatory_payment::ObligatoryPaymentEngine;
use crate::settings::{obligatory_payment_addresses, SettingsReader, MINIMUM_STAKE_KEY};
use crate::state::AccountStage;
use crate::ProcessorError;

/// Applies node-account transactions to global state.
///
/// Holds configuration only; every call to [`NodeAccountHandler::apply`]
/// loads what it needs from the context it is given and writes back with at
/// most one `set_state`.
#[derive(Clone, Debug)]
pub struct NodeAccountHandler {
    family_name: String,
    family_version: String,
    genesis_authority: Option<PublicKey>,
}

impl NodeAccountHandler {
    /// Handler for the default family, with an optional genesis authority.
    pub fn new(genesis_authority: Option<PublicKey>) -> Self {
        let defaults = ProcessorConfig::default();
        Self {
            family_name: defaults.family_name,
            family_version: defaults.family_version,
            genesis_authority,
        }
    }

    pub fn from_config(config: &ProcessorConfig) -> Result<Self, ProcessorError> {
        Ok(Self {
            family_name: config.family_name.clone(),
            family_version: config.family_version.clone(),
            genesis_authority: config.genesis_authority_key()?,
        })
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    pub fn family_version(&self) -> &str {
        &self.family_version
    }

    /// Hex namespace prefix of the addresses this family owns.
    pub fn namespace(&self) -> String {
        hex::encode(namespace_prefix(&self.family_name))
    }

    /// Validate and execute one transaction.
    ///
    /// Either every write of the transaction is issued in one `set_state`, or
    /// none is. Rejections are logged at `warn` and returned; nothing panics.
    pub fn apply<C: LedgerContext + ?Sized>(
        &self,
        transaction: &TransactionEnvelope,
        context: &C,
    ) -> Result<(), ProcessorError> {
        let span = info_span!(
            "apply",
            method = field::Empty,
            signer = %transaction.signer(),
        );
        let _enter = span.enter();

        let result = self.dispatch(transaction, context, &span);
        if let Err(err) = &result {
            warn!(error = %err, kind = ?err.kind(), "transaction rejected");
        }
        result
    }

    fn dispatch<C: LedgerContext + ?Sized>(
        &self,
        transaction: &TransactionEnvelope,
        context: &C,
        span: &tracing::Span,
    ) -> Result<(), ProcessorError> {
        validate_envelope(transaction, &self.family_name, &self.family_version)?;
        let payload = transaction.decode_payload()?;
        let method = payload.method()?;
        span.record("method", method.name());

        let header = &transaction.header;
        match method {
            NodeAccountMethod::Genesis => self.genesis(header, &payload, context),
            NodeAccountMethod::InternalTransfer => internal_transfer(header, &payload, context),
            NodeAccountMethod::InitializeMasternode => {
                initialize_masternode(header, &payload, context)
            }
            NodeAccountMethod::CloseMasternode => close_masternode(header, &payload, context),
            NodeAccountMethod::TransferFromUnfrozenToOperational => {
                transfer_from_unfrozen(header, &payload, context)
            }
            NodeAccountMethod::PayObligatoryPayment => {
                pay_obligatory_payment(header, &payload, context)
            }
        }
    }

    fn genesis<C: LedgerContext + ?Sized>(
        &self,
        header: &TransactionHeader,
        payload: &TransactionPayload,
        context: &C,
    ) -> Result<(), ProcessorError> {
        let GenesisPayload { total_supply } = payload.decode_data()?;
        let Some(authority) = self.genesis_authority else {
            return Err(ProcessorError::invalid("Genesis authority is not configured."));
        };
        if header.signer_public_key != authority {
            return Err(ProcessorError::invalid(
                "Genesis can only be issued by the genesis authority.",
            ));
        }
        if total_supply == 0 {
            return Err(ProcessorError::invalid("Genesis total supply must be positive."));
        }

        let signer = header.signer_address();
        require_declared(header, &[signer.clone()], &[signer.clone()])?;
        let mut stage = AccountStage::load(context, &[signer.clone()])?;
        if stage.existed(&signer)? {
            return Err(ProcessorError::invalid("Genesis is already initialized."));
        }
        stage.get_mut(&signer)?.balance = total_supply;
        stage.commit(context)?;
        info!(%signer, amount = total_supply, "genesis issued");
        Ok(())
    }
}

fn internal_transfer<C: LedgerContext + ?Sized>(
    header: &TransactionHeader,
    payload: &TransactionPayload,
    context: &C,
) -> Result<(), ProcessorError> {
    let InternalTransferPayload { address_to, value } = payload.decode_data()?;
    let value = validate_amount(value)?;
    let receiver = validate_address(&address_to)?;
    let sender = header.signer_address();
    if receiver.namespace() != sender.namespace() {
        return Err(ProcessorError::invalid(INVALID_ADDRESS));
    }
    if receiver == sender {
        return Err(ProcessorError::invalid("Could not transfer to the sender's own account."));
    }

    let touched = [sender.clone(), receiver.clone()];
    require_declared(header, &touched, &touched)?;
    let mut stage = AccountStage::load(context, &touched)?;

    let from = stage.get_mut(&sender)?;
    if from.balance < value {
        return Err(insufficient_balance(from.balance));
    }
    from.balance -= value;

    let to = stage.get_mut(&receiver)?;
    to.balance = to.balance.checked_add(value).ok_or(ProcessorError::Overflow)?;

    stage.commit(context)?;
    info!(%sender, %receiver, amount = value, "internal transfer");
    Ok(())
}

fn initialize_masternode<C: LedgerContext + ?Sized>(
    header: &TransactionHeader,
    payload: &TransactionPayload,
    context: &C,
) -> Result<(), ProcessorError> {
    let InitializeMasternodePayload { value } = payload.decode_data()?;
    let value = validate_amount(value)?;
    let signer = header.signer_address();
    require_declared(
        header,
        &[signer.clone(), settings_address(MINIMUM_STAKE_KEY)],
        &[signer.clone()],
    )?;

    let minimum_stake = SettingsReader::new(context).minimum_stake()?;
    if value < minimum_stake {
        return Err(ProcessorError::invalid(format!(
            "Initial stake is less than the minimum stake: {minimum_stake}."
        )));
    }

    let mut stage = AccountStage::load(context, &[signer.clone()])?;
    let account = stage.get_mut(&signer)?;
    if !account.node_state.can_open() {
        return Err(ProcessorError::invalid(format!(
            "Masternode cannot be opened from state {}.",
            account.node_state.as_str()
        )));
    }
    if account.balance < value {
        return Err(insufficient_balance(account.balance));
    }
    account.balance -= value;
    account.reputation.frozen = account
        .reputation
        .frozen
        .checked_add(value)
        .ok_or(ProcessorError::Overflow)?;
    account.node_state = NodeState::Opened;

    stage.commit(context)?;
    info!(%signer, amount = value, "masternode opened");
    Ok(())
}

fn close_masternode<C: LedgerContext + ?Sized>(
    header: &TransactionHeader,
    payload: &TransactionPayload,
    context: &C,
) -> Result<(), ProcessorError> {
    let CloseMasternodePayload {} = payload.decode_data()?;
    let signer = header.signer_address();
    require_declared(header, &[signer.clone()], &[signer.clone()])?;

    let mut stage = AccountStage::load(context, &[signer.clone()])?;
    let account = stage.get_mut(&signer)?;
    if !account.node_state.can_close() {
        return Err(ProcessorError::invalid(format!(
            "Masternode cannot be closed from state {}.",
            account.node_state.as_str()
        )));
    }
    account.node_state = NodeState::Closed;

    stage.commit(context)?;
    info!(%signer, "masternode closed");
    Ok(())
}

fn transfer_from_unfrozen<C: LedgerContext + ?Sized>(
    header: &TransactionHeader,
    payload: &TransactionPayload,
    context: &C,
) -> Result<(), ProcessorError> {
    let TransferFromUnfrozenToOperationalPayload { value } = payload.decode_data()?;
    let value = validate_amount(value)?;
    let signer = header.signer_address();
    require_declared(header, &[signer.clone()], &[signer.clone()])?;

    let mut stage = AccountStage::load(context, &[signer.clone()])?;
    let account = stage.get_mut(&signer)?;
    if account.reputation.unfrozen < value {
        return Err(ProcessorError::invalid(format!(
            "Not enough unfrozen reputation. Current unfrozen reputation: {}.",
            account.reputation.unfrozen
        )));
    }
    account.reputation.unfrozen -= value;
    account.balance = account
        .balance
        .checked_add(value)
        .ok_or(ProcessorError::Overflow)?;

    stage.commit(context)?;
    info!(%signer, amount = value, "unfrozen reputation released");
    Ok(())
}

fn pay_obligatory_payment<C: LedgerContext + ?Sized>(
    header: &TransactionHeader,
    payload: &TransactionPayload,
    context: &C,
) -> Result<(), ProcessorError> {
    let ObligatoryPaymentPayload {} = payload.decode_data()?;
    require_declared(header, &obligatory_payment_addresses(), &[])?;

    let settings = SettingsReader::new(context).read()?;
    let committee =
        CommitteeResolver::resolve(&settings, settings.committee_size, &header.signer_public_key)?;
    require_declared(header, committee.members(), committee.members())?;

    ObligatoryPaymentEngine::distribute(&committee, settings.obligatory_payment, context)?;
    Ok(())
}

fn insufficient_balance(balance: u64) -> ProcessorError {
    ProcessorError::invalid(format!(
        "Not enough transferable balance. Sender's current balance: {balance}."
    ))
}

/// Reject before touching state when the header does not declare every
/// address that will be read or written.
fn require_declared(
    header: &TransactionHeader,
    reads: &[Address],
    writes: &[Address],
) -> Result<(), ProcessorError> {
    if let Some(address) = reads.iter().find(|a| !header.declares_input(a)) {
        return Err(ProcessorError::invalid(format!(
            "Address {address} is not declared as a transaction input."
        )));
    }
    if let Some(address) = writes.iter().find(|a| !header.declares_output(a)) {
        return Err(ProcessorError::invalid(format!(
            "Address {address} is not declared as a transaction output."
        )));
    }
    Ok(())
}
