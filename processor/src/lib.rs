//! Node-account transaction processor.
//!
//! A deterministic state-transition function over node accounts:
//! - [`NodeAccountHandler`] validates an envelope and dispatches its method
//! - [`SettingsReader`] loads chain settings (committee size, obligatory
//!   payment, allowed validators, minimum stake)
//! - [`CommitteeResolver`] turns the allowed validators into a committee and
//!   designates the signer as block winner
//! - [`ObligatoryPaymentEngine`] charges committee members tier by tier and
//!   credits the winner in one atomic write

pub mod committee;
pub mod config;
pub mod error;
pub mod handler;
pub mod obligatory_payment;
pub mod settings;
pub mod state;

pub use committee::{Committee, CommitteeResolver};
pub use config::ProcessorConfig;
pub use error::{ErrorKind, ProcessorError};
pub use handler::NodeAccountHandler;
pub use obligatory_payment::{withdraw_tiered, Distribution, ObligatoryPaymentEngine, TierWithdrawal};
pub use settings::{Setting, SettingEntry, Settings, SettingsReader};
pub use state::AccountStage;
