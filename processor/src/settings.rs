//! Chain settings read from the reserved settings namespace.

use std::collections::HashMap;

use obol_crypto::settings_address;
use obol_store::LedgerContext;
use obol_transactions::{codec, TransactionError};
use obol_types::Address;
use serde::{Deserialize, Serialize};

use crate::ProcessorError;

pub const COMMITTEE_SIZE_KEY: &str = "obol.settings.committee_size";
pub const OBLIGATORY_PAYMENT_KEY: &str = "obol.settings.obligatory_payment";
pub const ALLOWED_VALIDATORS_KEY: &str = "consensus.allowed_validators";
pub const MINIMUM_STAKE_KEY: &str = "obol.settings.minimum_stake";

/// Separator of entries in [`ALLOWED_VALIDATORS_KEY`].
pub const VALIDATOR_SEPARATOR: char = ';';

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingEntry {
    pub key: String,
    pub value: String,
}

/// Value stored at a settings address.
///
/// Keys whose addresses collide share one record, hence the list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setting {
    pub entries: Vec<SettingEntry>,
}

impl Setting {
    pub fn single(key: &str, value: &str) -> Self {
        Self {
            entries: vec![SettingEntry {
                key: key.to_string(),
                value: value.to_string(),
            }],
        }
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.value.as_str())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, TransactionError> {
        codec::encode(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransactionError> {
        codec::decode(bytes)
    }
}

/// Settings consumed by the obligatory payment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub committee_size: usize,
    pub obligatory_payment: u64,
    /// Validator public keys as written in the setting, in order.
    pub allowed_validators: Vec<String>,
}

/// Addresses read by [`SettingsReader::read`].
pub fn obligatory_payment_addresses() -> Vec<Address> {
    let mut addresses = Vec::with_capacity(3);
    for key in [COMMITTEE_SIZE_KEY, OBLIGATORY_PAYMENT_KEY, ALLOWED_VALIDATORS_KEY] {
        let address = settings_address(key);
        if !addresses.contains(&address) {
            addresses.push(address);
        }
    }
    addresses
}

/// Reads and parses chain settings through a [`LedgerContext`].
pub struct SettingsReader<'a, C: LedgerContext + ?Sized> {
    context: &'a C,
}

impl<'a, C: LedgerContext + ?Sized> SettingsReader<'a, C> {
    pub fn new(context: &'a C) -> Self {
        Self { context }
    }

    /// Raw value of one setting, `None` when unset.
    pub fn get(&self, key: &str) -> Result<Option<String>, ProcessorError> {
        let Some(bytes) = self.context.get_one(&settings_address(key))? else {
            return Ok(None);
        };
        let setting = decode_setting(key, &bytes)?;
        Ok(setting.value(key).map(str::to_string))
    }

    /// Load the obligatory-payment settings with a single state read.
    pub fn read(&self) -> Result<Settings, ProcessorError> {
        let entries = self.context.get_state(&obligatory_payment_addresses())?;
        let by_address: HashMap<Address, Vec<u8>> = entries
            .into_iter()
            .map(|entry| (entry.address, entry.data))
            .collect();

        let value = |key: &str| -> Result<String, ProcessorError> {
            let bytes = by_address
                .get(&settings_address(key))
                .ok_or_else(|| unavailable(key))?;
            decode_setting(key, bytes)?
                .value(key)
                .map(str::to_string)
                .ok_or_else(|| unavailable(key))
        };

        let committee_size = parse_number::<usize>(COMMITTEE_SIZE_KEY, &value(COMMITTEE_SIZE_KEY)?)?;
        if committee_size == 0 {
            return Err(malformed(COMMITTEE_SIZE_KEY, "committee size must be at least 1"));
        }
        let obligatory_payment =
            parse_number::<u64>(OBLIGATORY_PAYMENT_KEY, &value(OBLIGATORY_PAYMENT_KEY)?)?;
        let allowed_validators = parse_validators(&value(ALLOWED_VALIDATORS_KEY)?)?;

        Ok(Settings {
            committee_size,
            obligatory_payment,
            allowed_validators,
        })
    }

    /// Minimum stake required to open a masternode.
    pub fn minimum_stake(&self) -> Result<u64, ProcessorError> {
        let raw = self
            .get(MINIMUM_STAKE_KEY)?
            .ok_or_else(|| unavailable(MINIMUM_STAKE_KEY))?;
        parse_number(MINIMUM_STAKE_KEY, &raw)
    }
}

fn decode_setting(key: &str, bytes: &[u8]) -> Result<Setting, ProcessorError> {
    Setting::from_bytes(bytes).map_err(|e| malformed(key, &e.to_string()))
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ProcessorError>
where
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e: T::Err| malformed(key, &format!("{raw:?} is not a number: {e}")))
}

fn parse_validators(raw: &str) -> Result<Vec<String>, ProcessorError> {
    if raw.trim().is_empty() {
        return Err(malformed(ALLOWED_VALIDATORS_KEY, "validator list is empty"));
    }
    raw.split(VALIDATOR_SEPARATOR)
        .map(|entry| {
            let entry = entry.trim();
            if entry.is_empty() {
                Err(malformed(ALLOWED_VALIDATORS_KEY, "validator list has an empty entry"))
            } else {
                Ok(entry.to_string())
            }
        })
        .collect()
}

fn unavailable(key: &str) -> ProcessorError {
    ProcessorError::SettingsUnavailable {
        key: key.to_string(),
    }
}

fn malformed(key: &str, reason: &str) -> ProcessorError {
    ProcessorError::MalformedSettings {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
