use proptest::prelude::*;

use obol_types::{Address, NodeAccount, NodeState, PublicKey, Reputation};

fn node_state() -> impl Strategy<Value = NodeState> {
    prop_oneof![
        Just(NodeState::New),
        Just(NodeState::Opened),
        Just(NodeState::Closed),
    ]
}

proptest! {
    /// Canonical account bytes decode back to the same account.
    #[test]
    fn node_account_bytes_roundtrip(
        balance in any::<u64>(),
        frozen in any::<u64>(),
        unfrozen in any::<u64>(),
        state in node_state(),
    ) {
        let account = NodeAccount {
            balance,
            reputation: Reputation { frozen, unfrozen },
            node_state: state,
        };
        let bytes = account.to_bytes().unwrap();
        let decoded = NodeAccount::from_bytes(&bytes).unwrap();
        prop_assert_eq!(decoded, account);
    }

    /// Every account of the same shape encodes to the same length.
    #[test]
    fn node_account_encoding_has_fixed_width(
        balance in any::<u64>(),
        frozen in any::<u64>(),
        state in node_state(),
    ) {
        let a = NodeAccount::default().to_bytes().unwrap();
        let b = NodeAccount {
            balance,
            reputation: Reputation { frozen, unfrozen: 0 },
            node_state: state,
        }
        .to_bytes()
        .unwrap();
        prop_assert_eq!(a.len(), b.len());
    }

    /// Any 35 raw bytes form a valid address that parses back unchanged.
    #[test]
    fn address_from_bytes_parses(bytes in prop::collection::vec(any::<u8>(), 35)) {
        let raw: [u8; 35] = bytes.try_into().unwrap();
        let address = Address::from_bytes(&raw);
        let parsed = Address::parse(address.as_str()).unwrap();
        prop_assert_eq!(parsed, address);
    }

    /// Public key hex encoding roundtrips.
    #[test]
    fn public_key_hex_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let key = PublicKey(bytes);
        prop_assert_eq!(PublicKey::from_hex(&key.to_hex()).unwrap(), key);
    }

    /// Strings of the wrong length are never addresses.
    #[test]
    fn wrong_length_is_never_an_address(s in "[0-9a-f]{0,69}") {
        prop_assert!(Address::parse(&s).is_err());
    }
}
