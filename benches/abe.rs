use abe::schemes::{fame, gpsw};
use abe::utils::gaussian;
use abe::utils::linalg::Matrix;
use abe::{boolean_to_msp, utils::field::sample_uniform};
use criterion::{criterion_group, criterion_main, Criterion};
use rand::thread_rng;

fn bench_gpsw_roundtrip(c: &mut Criterion) {
    let (pk, msk) = gpsw::setup(10);
    let gamma = vec![0u64, 4, 5];
    let plaintext = b"Attack at dawn!".to_vec();
    let msp = boolean_to_msp::<u64>("(1 OR 4) AND (2 OR (0 AND 5))", true).unwrap();
    let full_key = gpsw::generate_policy_key(&msp, &msk);
    let key = gpsw::delegate_key(&full_key, &gamma);

    c.bench_function("gpsw encrypt", |b| {
        b.iter(|| gpsw::encrypt(&pk, &gamma, &plaintext).unwrap())
    });

    let ct = gpsw::encrypt(&pk, &gamma, &plaintext).unwrap();
    c.bench_function("gpsw decrypt", |b| b.iter(|| gpsw::decrypt(&ct, &key).unwrap()));
}

fn bench_fame_roundtrip(c: &mut Criterion) {
    let (pk, msk) = fame::setup();
    let msp = boolean_to_msp::<String>("((0 AND 1) OR (2 AND 3)) AND 5", false).unwrap();
    let plaintext = b"fast ciphertext-policy decryption".to_vec();
    let gamma: Vec<String> = [0, 2, 3, 5].iter().map(|a| a.to_string()).collect();
    let key = fame::generate_attrib_key(&gamma, &msk).unwrap();

    c.bench_function("fame encrypt", |b| {
        b.iter(|| fame::encrypt(&pk, &msp, &plaintext).unwrap())
    });

    let ct = fame::encrypt(&pk, &msp, &plaintext).unwrap();
    c.bench_function("fame decrypt", |b| b.iter(|| fame::decrypt(&ct, &key).unwrap()));
}

fn bench_gaussian_solve(c: &mut Criterion) {
    let mut rng = thread_rng();
    let rows: Vec<Vec<_>> = (0..12)
        .map(|_| (0..12).map(|_| sample_uniform(&mut rng)).collect())
        .collect();
    let m = Matrix::new(rows).unwrap();
    let x: Vec<_> = (0..12).map(|_| sample_uniform(&mut rng)).collect();
    let t = m.mul_vec(&abe::utils::linalg::Vector::new(x)).unwrap();

    c.bench_function("gaussian solve 12x12", |b| b.iter(|| gaussian::solve(&m, &t).unwrap()));
}

criterion_group!(benches, bench_gpsw_roundtrip, bench_fame_roundtrip, bench_gaussian_solve);
criterion_main!(benches);
