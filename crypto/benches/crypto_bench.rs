use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fairroll_types::{PrivateKey, TypedValue, H256};

fn key() -> PrivateKey {
    let mut bytes = [0u8; 32];
    bytes[31] = 42;
    PrivateKey(bytes)
}

fn keccak256_bench(c: &mut Criterion) {
    let data = [0xABu8; 64];

    c.bench_function("keccak256_64B", |b| {
        b.iter(|| fairroll_crypto::keccak256(black_box(&data)))
    });
}

fn solidity_sha3_bench(c: &mut Criterion) {
    let values = vec![TypedValue::bytes32([0x11u8; 32]), TypedValue::uint(7u64)];

    c.bench_function("solidity_sha3_bytes32_uint", |b| {
        b.iter(|| fairroll_crypto::solidity_sha3(black_box(&values)))
    });
}

fn sign_bench(c: &mut Criterion) {
    let key = key();
    let digest = H256::new([42u8; 32]);

    c.bench_function("secp256k1_sign_digest", |b| {
        b.iter(|| fairroll_crypto::sign_hash(black_box(&digest), &key))
    });
}

fn recover_bench(c: &mut Criterion) {
    let digest = H256::new([42u8; 32]);
    let sig = fairroll_crypto::sign_hash(&digest, &key()).unwrap();

    c.bench_function("secp256k1_recover", |b| {
        b.iter(|| fairroll_crypto::recover(black_box(&digest), &sig))
    });
}

criterion_group!(
    benches,
    keccak256_bench,
    solidity_sha3_bench,
    sign_bench,
    recover_bench
);
criterion_main!(benches);
