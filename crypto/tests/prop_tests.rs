use proptest::prelude::*;

use fairroll_crypto::{address_from_private, recover, sign_hash, solidity_sha3};
use fairroll_types::{Address, PrivateKey, TypedValue, Uint};

fn typed_value() -> impl Strategy<Value = TypedValue> {
    prop_oneof![
        prop::array::uniform32(any::<u8>()).prop_map(TypedValue::bytes32),
        prop::array::uniform20(any::<u8>()).prop_map(|b| TypedValue::address(&Address::new(b))),
        prop::array::uniform32(any::<u8>()).prop_map(|b| TypedValue::uint(Uint::from_be_bytes(&b))),
        prop::collection::vec(any::<u8>(), 0..64).prop_map(TypedValue::bytes),
        any::<bool>().prop_map(TypedValue::bool),
    ]
}

/// Scalars in [1, 2^248) are always below the secp256k1 group order.
fn private_key() -> impl Strategy<Value = [u8; 32]> {
    prop::array::uniform31(any::<u8>())
        .prop_filter("non-zero scalar", |b| b.iter().any(|x| *x != 0))
        .prop_map(|tail| {
            let mut key = [0u8; 32];
            key[1..].copy_from_slice(&tail);
            key
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// recover(hash(values), sign(hash(values), key)) is the key's address.
    #[test]
    fn signature_round_trip(
        values in prop::collection::vec(typed_value(), 0..6),
        key in private_key(),
    ) {
        let key = PrivateKey(key);
        let digest = solidity_sha3(&values).unwrap();
        let sig = sign_hash(&digest, &key).unwrap();
        prop_assert_eq!(recover(&digest, &sig).unwrap(), address_from_private(&key).unwrap());
    }

    /// Hashing is a pure function of the encoded values.
    #[test]
    fn hash_deterministic(values in prop::collection::vec(typed_value(), 0..6)) {
        prop_assert_eq!(solidity_sha3(&values).unwrap(), solidity_sha3(&values).unwrap());
    }
}
