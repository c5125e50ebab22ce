//! Benchmarks for token issue/verify hot paths

use campus_auth_core::{AuthConfig, TokenIssuer, TokenValidator};
use campus_types::{Role, User, UserId};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_token_operations(c: &mut Criterion) {
    let config = AuthConfig::try_new("bench-secret-0123456789abcdef-0123").unwrap();
    let issuer = TokenIssuer::new(&config).unwrap();
    let validator = TokenValidator::new(&config).unwrap();
    let user = User::new(UserId(101), "student1", Role::Student);

    let mut group = c.benchmark_group("token");

    group.bench_function("issue", |b| {
        b.iter(|| issuer.issue(black_box(&user)).unwrap());
    });

    let token = issuer.issue(&user).unwrap().token;
    group.bench_function("verify_valid", |b| {
        b.iter(|| validator.verify(black_box(&token)).unwrap());
    });

    let mut tampered = token.clone();
    let last = tampered.pop().unwrap();
    tampered.push(if last == 'A' { 'B' } else { 'A' });
    group.bench_function("verify_tampered", |b| {
        b.iter(|| validator.verify(black_box(&tampered)).unwrap_err());
    });

    group.finish();
}

criterion_group!(benches, bench_token_operations);
criterion_main!(benches);
