//! Benchmarks for token building, parsing and verification
//!
//! Throughput across algorithm families and claims sizes.

use compact_jwt::{
    AlgorithmName, EcdsaAlgorithm, EdDsaAlgorithm, HmacAlgorithm, RsaAlgorithm, Signer,
    TokenBuilder, Verifier, parse, parse_and_verify,
};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

const RSA_PRIVATE: &[u8] = include_bytes!("../tests/fixtures/rsa_private.pk8");
const P256_PRIVATE: &[u8] = include_bytes!("../tests/fixtures/ec_p256_private.pk8");

fn claims_of_size(size: usize) -> String {
    let filler = "x".repeat(size.saturating_sub(12));
    format!(r#"{{"data":"{filler}"}}"#)
}

/// Benchmark HMAC build and verify across claims sizes
fn benchmark_hmac(c: &mut Criterion) {
    let alg = HmacAlgorithm::new(AlgorithmName::HS256, b"benchmark-secret-key")
        .expect("HS256 key should be accepted");
    let builder = TokenBuilder::new(&alg).expect("builder should be created");
    let mut group = c.benchmark_group("hs256");

    for size in [64usize, 1024, 16_384] {
        let claims = claims_of_size(size);
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("build", size), &claims, |b, claims| {
            b.iter(|| {
                let token = builder.build(claims.as_str()).expect("build should succeed");
                std::hint::black_box(token);
            });
        });

        let raw = builder.build_bytes(claims.as_str()).expect("build should succeed");
        group.bench_with_input(BenchmarkId::new("parse", size), &raw, |b, raw| {
            b.iter(|| std::hint::black_box(parse(raw).expect("parse should succeed")));
        });
        group.bench_with_input(BenchmarkId::new("parse_and_verify", size), &raw, |b, raw| {
            b.iter(|| {
                std::hint::black_box(parse_and_verify(raw, &alg).expect("verify should succeed"))
            });
        });
    }
    group.finish();
}

fn bench_family<A: Signer + Verifier>(c: &mut Criterion, label: &str, alg: &A) {
    let builder = TokenBuilder::new(alg).expect("builder should be created");
    let claims = claims_of_size(256);
    let raw = builder.build_bytes(claims.as_str()).expect("build should succeed");

    let mut group = c.benchmark_group(label);
    group.bench_function("build", |b| {
        b.iter(|| std::hint::black_box(builder.build(claims.as_str()).expect("build should succeed")));
    });
    group.bench_function("parse_and_verify", |b| {
        b.iter(|| std::hint::black_box(parse_and_verify(&raw, alg).expect("verify should succeed")));
    });
    group.finish();
}

/// Benchmark the asymmetric families on a fixed claims size
fn benchmark_asymmetric(c: &mut Criterion) {
    let rs256 = RsaAlgorithm::from_pkcs8_der(AlgorithmName::RS256, RSA_PRIVATE)
        .expect("RSA fixture should load");
    let es256 = EcdsaAlgorithm::from_pkcs8_der(AlgorithmName::ES256, P256_PRIVATE)
        .expect("P-256 fixture should load");
    let eddsa = EdDsaAlgorithm::from_secret_bytes(&[42u8; 32]).expect("seed should be accepted");

    bench_family(c, "rs256", &rs256);
    bench_family(c, "es256", &es256);
    bench_family(c, "eddsa", &eddsa);
}

criterion_group!(benches, benchmark_hmac, benchmark_asymmetric);
criterion_main!(benches);
