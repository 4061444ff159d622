//! Benchmarks for secp256k1 point arithmetic and the primitive helpers
//! ECDSA leans on

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dsig_algorithms::ec::k256::{
    base_point_g, double_scalar_mult, generate_keypair, scalar_mult, scalar_mult_base_g,
    FieldElement, Point, Scalar, K256_FIELD_ELEMENT_SIZE,
};
use dsig_algorithms::hash::{HashFunction, Sha256};
use dsig_algorithms::nonce::Rfc6979;
use rand::rngs::OsRng;
use rand::RngCore;

/// Generate a random field element for benchmarking
fn random_field_element() -> FieldElement {
    let mut bytes = [0u8; K256_FIELD_ELEMENT_SIZE];
    loop {
        OsRng.fill_bytes(&mut bytes);
        if let Ok(fe) = FieldElement::from_bytes(&bytes) {
            return fe;
        }
    }
}

/// Generate a random scalar and its public point for benchmarking
fn random_keypair() -> (Scalar, Point) {
    generate_keypair(&mut OsRng).expect("key generation should succeed")
}

fn bench_field_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("k256_field");
    let a = random_field_element();
    let b = random_field_element();

    group.bench_function("mul", |bench| bench.iter(|| black_box(&a).mul(black_box(&b))));
    group.bench_function("square", |bench| bench.iter(|| black_box(&a).square()));
    group.bench_function("invert", |bench| bench.iter(|| black_box(&a).invert()));
    group.bench_function("sqrt", |bench| bench.iter(|| black_box(&a).sqrt()));
    group.finish();
}

fn bench_point_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("k256_point");
    let (_, p) = random_keypair();
    let (_, q) = random_keypair();

    group.bench_function("add", |bench| bench.iter(|| black_box(&p).add(black_box(&q))));
    group.bench_function("double", |bench| bench.iter(|| black_box(&p).double()));
    let compressed = p.serialize_compressed();
    group.bench_function("deserialize_compressed", |bench| {
        bench.iter(|| Point::deserialize_compressed(black_box(&compressed)))
    });
    group.finish();
}

fn bench_scalar_multiplication(c: &mut Criterion) {
    let mut group = c.benchmark_group("k256_scalar_mult");
    let (k, q) = random_keypair();
    let (u2, _) = random_keypair();
    let g = base_point_g();

    group.bench_function("base_point_table", |bench| {
        bench.iter(|| scalar_mult_base_g(black_box(&k)))
    });
    group.bench_function("base_point_double_and_add", |bench| {
        bench.iter(|| g.mul(black_box(&k)))
    });
    group.bench_function("random_point", |bench| {
        bench.iter(|| scalar_mult(black_box(&k), black_box(&q)))
    });
    group.bench_function("double_scalar_shamir", |bench| {
        bench.iter(|| double_scalar_mult(black_box(&k), black_box(&u2), black_box(&q)))
    });
    group.finish();
}

fn bench_nonce_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("k256_rfc6979");
    let (d, _) = random_keypair();
    let gen = Rfc6979::<Sha256>::new(Scalar::order()).expect("order is valid");
    let digest = Sha256::digest(b"benchmark message").expect("hashing succeeds");

    group.bench_function("generate_k", |bench| {
        bench.iter(|| gen.generate_k(black_box(d.as_biguint()), black_box(&digest)))
    });
    group.bench_function("generate_keypair", |bench| {
        bench.iter(|| generate_keypair(&mut OsRng))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_field_arithmetic,
    bench_point_operations,
    bench_scalar_multiplication,
    bench_nonce_generation,
);
criterion_main!(benches);
