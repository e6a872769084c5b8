//! Node-account transactions: the signed envelope, method payloads, the
//! payload codec and stateless validation.
//!
//! Methods:
//! - **Genesis**: one-time issuance of the total supply to the genesis authority
//! - **InternalTransfer**: move operational balance between node accounts
//! - **InitializeMasternode**: freeze a stake and open a masternode
//! - **CloseMasternode**: close an opened masternode
//! - **TransferFromUnfrozenToOperational**: release liquid reputation
//! - **PayObligatoryPayment**: committee-wide redistribution to the block winner

pub mod codec;
pub mod envelope;
pub mod error;
pub mod payload;
pub mod validation;

pub use envelope::{TransactionBuilder, TransactionEnvelope, TransactionHeader, NODE_ACCOUNT_VERSION};
pub use error::TransactionError;
pub use payload::{
    CloseMasternodePayload, GenesisPayload, InitializeMasternodePayload, InternalTransferPayload,
    NodeAccountMethod, ObligatoryPaymentPayload, TransactionPayload,
    TransferFromUnfrozenToOperationalPayload,
};
