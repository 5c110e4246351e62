use criterion::{criterion_group, criterion_main, Criterion};
use filecpt::aes::{aes_encrypt, KeySize};
use filecpt::sha256::sha256;
use filecpt::sym::sym_encrypt;
use filecpt::traits::{KeyGen, Open, Seal};
use filecpt::{base64, rsa_1024, rsa_512};
use rand_chacha::rand_core::SeedableRng;
use rand_core::RngCore;


pub fn criterion_benchmark(c: &mut Criterion) {
    let mut bench_rng = rand_chacha::ChaCha8Rng::seed_from_u64(42);

    let mut payload = vec![0u8; 1024];
    bench_rng.fill_bytes(&mut payload);

    let (pkey_512, skey_512) = rsa_512::KG::try_keygen_with_rng(&mut bench_rng).unwrap();
    let container_512 = pkey_512.try_seal_with_rng(&mut bench_rng, &payload).unwrap();
    let (pkey_1024, skey_1024) = rsa_1024::KG::try_keygen_with_rng(&mut bench_rng).unwrap();
    let container_1024 = pkey_1024.try_seal_with_rng(&mut bench_rng, &payload).unwrap();

    c.bench_function("rsa_512  KeyGen", |b| {
        b.iter(|| rsa_512::KG::try_keygen_with_rng(&mut bench_rng))
    });
    c.bench_function("rsa_1024 KeyGen", |b| {
        b.iter(|| rsa_1024::KG::try_keygen_with_rng(&mut bench_rng))
    });

    c.bench_function("rsa_512  Seal 1KiB", |b| {
        b.iter(|| pkey_512.try_seal_with_rng(&mut bench_rng, &payload))
    });
    c.bench_function("rsa_1024 Seal 1KiB", |b| {
        b.iter(|| pkey_1024.try_seal_with_rng(&mut bench_rng, &payload))
    });

    c.bench_function("rsa_512  Open 1KiB", |b| b.iter(|| skey_512.try_open(&container_512)));
    c.bench_function("rsa_1024 Open 1KiB", |b| b.iter(|| skey_1024.try_open(&container_1024)));

    c.bench_function("aes256 ECB 1KiB", |b| {
        b.iter(|| aes_encrypt(&payload, &payload[..32], KeySize::Aes256))
    });
    c.bench_function("sym_encrypt 1KiB", |b| {
        b.iter(|| sym_encrypt(&payload, b"a passable password", KeySize::Aes256))
    });
    c.bench_function("sha256 1KiB", |b| b.iter(|| sha256(&payload)));
    c.bench_function("base64 encode 1KiB", |b| b.iter(|| base64::encode(&payload)));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
