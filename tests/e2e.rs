//! End-to-end scenarios exercising the full pipeline (policy string ->
//! MSP -> scheme Setup/KeyGen/Encrypt/Decrypt) for each scheme, plus the
//! cross-cutting properties of the shared linear-algebra kernel.
use abe::schemes::{dippe, fame, gpsw, maabe};
use abe::utils::gaussian;
use abe::utils::linalg::{Matrix, Vector};
use abe::{boolean_to_msp, RabeError};
use rabe_bn::Fr;
use rand::thread_rng;

#[test]
fn gpsw_happy_path() {
    let (pk, msk) = gpsw::setup(10);
    let gamma = vec![0u64, 4, 5];
    let plaintext = String::from("Attack at dawn!").into_bytes();
    let ct = gpsw::encrypt(&pk, &gamma, &plaintext).unwrap();

    let msp = boolean_to_msp::<u64>("(1 OR 4) AND (2 OR (0 AND 5))", true).unwrap();
    let full_key = gpsw::generate_policy_key(&msp, &msk);
    let key = gpsw::delegate_key(&full_key, &gamma);
    assert_eq!(gpsw::decrypt(&ct, &key).unwrap(), plaintext);
}

#[test]
fn gpsw_mismatched_policy_fails_insufficient() {
    let (pk, msk) = gpsw::setup(10);
    let plaintext = String::from("Attack at dawn!").into_bytes();
    let gamma = vec![0u64, 1, 4];
    let ct = gpsw::encrypt(&pk, &gamma, &plaintext).unwrap();

    let msp = boolean_to_msp::<u64>("(1 OR 4) AND (2 OR (0 AND 5))", true).unwrap();
    let full_key = gpsw::generate_policy_key(&msp, &msk);
    let key = gpsw::delegate_key(&full_key, &gamma);
    let err = gpsw::decrypt(&ct, &key).unwrap_err();
    assert!(err.to_string().contains("insufficient"));
}

#[test]
fn fame_matching_and_non_matching_gamma() {
    let (pk, msk) = fame::setup();
    let msp = boolean_to_msp::<String>("((0 AND 1) OR (2 AND 3)) AND 5", false).unwrap();
    let plaintext = b"fast ciphertext-policy decryption".to_vec();
    let ct = fame::encrypt(&pk, &msp, &plaintext).unwrap();

    let matching: Vec<String> = [0, 2, 3, 5].iter().map(|a| a.to_string()).collect();
    let key = fame::generate_attrib_key(&matching, &msk).unwrap();
    assert_eq!(fame::decrypt(&ct, &key).unwrap(), plaintext);

    let non_matching: Vec<String> = [1, 3, 5].iter().map(|a| a.to_string()).collect();
    let key = fame::generate_attrib_key(&non_matching, &msk).unwrap();
    assert!(fame::decrypt(&ct, &key).is_err());
}

#[test]
fn msp_reconstruction_over_nested_policy() {
    let msp = boolean_to_msp::<u64>(
        "1 AND (((6 OR 7) AND (8 OR 9)) OR ((2 AND 3) OR (4 AND 5)))",
        true,
    )
    .unwrap();
    let owned = [1u64, 7, 9];
    let rows = msp.rows_for(&owned);
    assert!(!rows.is_empty());
    let owned_rows: Vec<Vec<Fr>> = rows.iter().map(|(i, _)| msp.mat.rows[*i].clone()).collect();
    let owned_mat = Matrix::new(owned_rows).unwrap();
    let alpha = gaussian::reconstruct(&owned_mat, &msp.target()).unwrap();
    assert!(!alpha.is_empty());
}

#[test]
fn dippe_conjunction_policy() {
    let n = 5;
    let gp = dippe::global_setup(1);
    let mut pks = Vec::new();
    let mut sks = Vec::new();
    for id in 0..=n {
        let (pk, sk) = dippe::authority_setup(id, &gp);
        pks.push(pk);
        sks.push(sk);
    }

    let x = dippe::conjunction_policy_vec_init(&[0, 2], n);
    let plaintext = b"inner product zero decrypts".to_vec();
    let ct = dippe::encrypt(&gp, &pks, &x, &plaintext).unwrap();

    let v_matching = dippe::attribute_vec_init(&[0, 2, 3], n);
    let shares: Vec<_> = sks
        .iter()
        .map(|sk| {
            let others: Vec<_> = pks.iter().filter(|p| p.id != sk.id).cloned().collect();
            dippe::authority_key_share(sk, &others, "carol", &v_matching).unwrap()
        })
        .collect();
    assert_eq!(dippe::decrypt(&ct, &shares, "carol", &v_matching).unwrap(), plaintext);

    let v_non_matching = dippe::attribute_vec_init(&[0, 3], n);
    let shares: Vec<_> = sks
        .iter()
        .map(|sk| {
            let others: Vec<_> = pks.iter().filter(|p| p.id != sk.id).cloned().collect();
            dippe::authority_key_share(sk, &others, "carol", &v_non_matching).unwrap()
        })
        .collect();
    assert!(dippe::decrypt(&ct, &shares, "carol", &v_non_matching).is_err());
}

#[test]
fn maabe_cross_gid_collusion_resistance() {
    let (pk, sk) = maabe::authority_setup(&["a1".to_string(), "a2".to_string()]).unwrap();
    let msp = boolean_to_msp::<String>("a1 AND a2", false).unwrap();
    let plaintext = b"no collusion across gids".to_vec();
    let ct = maabe::encrypt(&msp, &[pk], &plaintext).unwrap();

    let key_for_alice = maabe::generate_attrib_key("alice", "a1", &sk).unwrap();
    let key_for_bob = maabe::generate_attrib_key("bob", "a2", &sk).unwrap();
    assert!(maabe::decrypt(&ct, &[key_for_alice, key_for_bob]).is_err());
}

#[test]
fn malformed_policy_is_a_parse_error() {
    let result = boolean_to_msp::<u64>(
        "1 AND ((6 OR 7) AND (8 OR 9)) OR ((2 AND 3) OR (4 AND 5)))",
        true,
    );
    assert!(result.is_err());
}

#[test]
fn gaussian_round_trip() {
    let mut rng = thread_rng();
    let m = Matrix::new(vec![
        vec![Fr::one(), Fr::zero(), Fr::one()],
        vec![Fr::zero(), Fr::one(), Fr::one()],
        vec![Fr::one(), Fr::one(), Fr::zero()],
    ])
    .unwrap();
    let x = Vector::new(vec![
        abe::utils::field::sample_uniform(&mut rng),
        abe::utils::field::sample_uniform(&mut rng),
        abe::utils::field::sample_uniform(&mut rng),
    ]);
    let t = m.mul_vec(&x).unwrap();
    let x_prime = gaussian::solve(&m, &t).unwrap();
    assert_eq!(m.mul_vec(&x_prime).unwrap(), t);
}

#[test]
fn gaussian_rejects_dimension_mismatch_and_empty_matrix() {
    let m = Matrix::new(vec![vec![Fr::one(), Fr::zero()], vec![Fr::zero(), Fr::one()]]).unwrap();
    let wrong_len_target = Vector::new(vec![Fr::one()]);
    assert!(gaussian::solve(&m, &wrong_len_target).is_err());

    let empty: Result<Matrix, RabeError> = Matrix::new(vec![]);
    assert!(empty.is_err());
}

#[test]
fn envelope_idempotence() {
    let mut rng = thread_rng();
    let k = abe::utils::field::sample_gt(&mut rng);
    for msg in [&b""[..], b"x", b"a longer message spanning multiple AES blocks of plaintext"] {
        let sealed = abe::utils::envelope::seal(&k, msg);
        assert_eq!(abe::utils::envelope::open(&k, &sealed).unwrap(), msg);
    }
}
