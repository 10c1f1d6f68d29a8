use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use callboard::auth::{TokenService, User};
use callboard::config::AuthConfig;

fn service() -> TokenService {
    let auth = AuthConfig {
        secret: Some("bench-secret".to_string()),
        token_ttl_minutes: 60,
    };
    TokenService::from_config(&auth, false).unwrap()
}

fn bench_user(c: &mut Criterion) {
    c.bench_function("user_new", |b| {
        b.iter(|| {
            User::new(
                black_box("alto@example.com".to_string()),
                "Alice".to_string(),
                "Alto".to_string(),
                "hash".to_string(),
            )
        })
    });
}

fn bench_token_issue_and_verify(c: &mut Criterion) {
    let service = service();
    let user = User::new(
        "alto@example.com".to_string(),
        "Alice".to_string(),
        "Alto".to_string(),
        "hash".to_string(),
    );

    c.bench_function("token_issue", |b| {
        b.iter(|| service.issue(black_box(&user)).unwrap())
    });

    let token = service.issue(&user).unwrap();
    c.bench_function("token_verify", |b| {
        b.iter(|| service.verify(black_box(&token)).unwrap())
    });
}

fn bench_password_hashing(c: &mut Criterion) {
    // Low cost keeps the bench iteration time sane; relative changes still show
    c.bench_function("bcrypt_hash_cost4", |b| {
        b.iter(|| bcrypt::hash(black_box("downbeat7"), 4).unwrap())
    });

    let hash = bcrypt::hash("downbeat7", 4).unwrap();
    c.bench_function("bcrypt_verify_cost4", |b| {
        b.iter(|| bcrypt::verify(black_box("downbeat7"), &hash).unwrap())
    });
}

criterion_group!(
    benches,
    bench_user,
    bench_token_issue_and_verify,
    bench_password_hashing
);
criterion_main!(benches);
