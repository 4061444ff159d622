//! Benchmarks for ECDSA over secp256k1 and the engine facade.
//!
//! Covers key generation, signing and verification across message sizes,
//! plus DER parsing on the verify path.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dsig_api::Signature;
use dsig_sign::engine::SignatureScheme;
use dsig_sign::traditional::ecdsa::{Ecdsa, EcdsaSignature};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Message sizes to benchmark (in bytes)
const MESSAGE_SIZES: &[usize] = &[32, 1024, 16384];

fn bench_keypair(c: &mut Criterion) {
    let ecdsa = Ecdsa::default();
    let mut rng = ChaCha20Rng::from_seed([42u8; 32]);

    c.bench_function("ecdsa_keypair", |b| {
        b.iter(|| black_box(ecdsa.keypair(&mut rng).unwrap()))
    });
}

fn bench_sign(c: &mut Criterion) {
    let mut group = c.benchmark_group("ecdsa_sign");
    let ecdsa = Ecdsa::default();
    let mut rng = ChaCha20Rng::from_seed([42u8; 32]);
    let kp = ecdsa.keypair(&mut rng).unwrap();

    for &size in MESSAGE_SIZES {
        let message = vec![0x5au8; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &message, |b, msg| {
            b.iter(|| black_box(ecdsa.sign(msg, &kp.secret).unwrap()))
        });
    }
    group.finish();
}

fn bench_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("ecdsa_verify");
    let ecdsa = Ecdsa::default();
    let mut rng = ChaCha20Rng::from_seed([42u8; 32]);
    let kp = ecdsa.keypair(&mut rng).unwrap();

    for &size in MESSAGE_SIZES {
        let message = vec![0x5au8; size];
        let sig = ecdsa.sign(&message, &kp.secret).unwrap();
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &message, |b, msg| {
            b.iter(|| black_box(ecdsa.verify(msg, &sig, &kp.public).is_ok()))
        });
    }

    let sig = ecdsa.sign(b"der", &kp.secret).unwrap();
    group.bench_function("der_parse", |b| {
        b.iter(|| black_box(EcdsaSignature::from_der(black_box(&sig.der)).unwrap()))
    });
    group.bench_function("verify_der", |b| {
        b.iter(|| black_box(ecdsa.verify_der(b"der", &sig.der, &kp.public).is_ok()))
    });
    group.finish();
}

fn bench_facade(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_ecdsa");
    let scheme = SignatureScheme::from_name("ECDSA").unwrap();
    let mut rng = ChaCha20Rng::from_seed([7u8; 32]);
    let keys = scheme.generate_keys_with_rng(&mut rng).unwrap();
    let sig = scheme.sign("facade", &keys).unwrap();

    group.bench_function("sign", |b| {
        b.iter(|| black_box(scheme.sign("facade", &keys).unwrap()))
    });
    group.bench_function("verify", |b| {
        b.iter(|| black_box(scheme.verify("facade", &sig, &keys)))
    });
    group.finish();
}

criterion_group!(benches, bench_keypair, bench_sign, bench_verify, bench_facade);
criterion_main!(benches);
