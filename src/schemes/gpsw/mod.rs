//! `GPSW`: textbook key-policy attribute-based encryption.
//!
//! * Developed by Vipul Goyal, Omkant Pandey, Amit Sahai, Brent Waters,
//!   "Attribute-Based Encryption for Fine-Grained Access Control of
//!   Encrypted Data"
//! * Published in: ACM CCS 2006
//! * Type: encryption (key-policy attribute-based)
//! * Setting: bilinear groups (asymmetric, Type-3)
//!
//! The ciphertext is tagged with a set `gamma` of (integer) attributes; the
//! user's key encodes a monotone policy over those attributes as an MSP.
//!
//! # Examples
//!
//! ```
//! use abe::schemes::gpsw::*;
//!
//! let (pk, msk) = setup(10);
//! let gamma = vec![0, 4, 5];
//! let plaintext = String::from("Attack at dawn!").into_bytes();
//! let ct = encrypt(&pk, &gamma, &plaintext).unwrap();
//!
//! let msp = abe::utils::policy::boolean_to_msp::<u64>(
//!     "(1 OR 4) AND (2 OR (0 AND 5))", true,
//! ).unwrap();
//! let full_key = generate_policy_key(&msp, &msk);
//! let key = delegate_key(&full_key, &gamma);
//! assert_eq!(decrypt(&ct, &key).unwrap(), plaintext);
//! ```
use crate::error::RabeError;
use crate::utils::envelope::{self, SealedEnvelope};
use crate::utils::field::{sample_gt, sample_uniform, sample_uniform_vec};
use crate::utils::gaussian;
use crate::utils::linalg::Matrix;
use crate::utils::policy::Msp;
use rabe_bn::{pairing, Fr, G1, G2, Gt};
use rand::thread_rng;

/// Public parameters for a universe of `L` integer attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct GpswPublicKey {
    t: Vec<G2>,
    y: Gt,
}

/// The authority's master secret.
#[derive(Clone, Debug, PartialEq)]
pub struct GpswMasterKey {
    t: Vec<Fr>,
    y: Fr,
}

/// A ciphertext tagged with the attribute set `gamma` it was encrypted
/// under.
#[derive(Clone, Debug, PartialEq)]
pub struct GpswCiphertext {
    gamma: Vec<u64>,
    e0: Gt,
    e_a: Vec<G2>,
    sealed: SealedEnvelope,
}

/// The full set of per-row key shares produced by [`generate_policy_key`],
/// before being restricted to a concrete set of owned attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct GpswFullPolicyKey {
    msp: Msp<u64>,
    shares: Vec<G1>,
}

/// A usable decryption key: the rows of the policy's MSP that a user's
/// owned attributes actually cover, together with the matching key shares.
#[derive(Clone, Debug, PartialEq)]
pub struct GpswPolicyKey {
    msp: Msp<u64>,
    rows: Vec<(usize, u64, G1)>,
}

/// Generates a public key / master key pair for a universe of `l` integer
/// attributes numbered `0..l`.
pub fn setup(l: u64) -> (GpswPublicKey, GpswMasterKey) {
    let mut rng = thread_rng();
    let t: Vec<Fr> = sample_uniform_vec(&mut rng, l as usize);
    let y = sample_uniform(&mut rng);
    let pk = GpswPublicKey {
        t: t.iter().map(|ti| G2::one() * *ti).collect(),
        y: pairing(G1::one(), G2::one()).pow(y),
    };
    (pk, GpswMasterKey { t, y })
}

/// Encrypts `plaintext` so that any key whose policy is satisfied by
/// `gamma` can recover it.
pub fn encrypt(pk: &GpswPublicKey, gamma: &[u64], plaintext: &[u8]) -> Result<GpswCiphertext, RabeError> {
    if gamma.is_empty() {
        return Err(RabeError::new("gpsw encrypt: attribute set empty"));
    }
    if gamma.iter().any(|a| *a as usize >= pk.t.len()) {
        return Err(RabeError::new("gpsw encrypt: attribute outside universe"));
    }
    let mut rng = thread_rng();
    let s = sample_uniform(&mut rng);
    let k = sample_gt(&mut rng);
    let e0 = k * pk.y.pow(s);
    let e_a = gamma.iter().map(|a| pk.t[*a as usize] * s).collect();
    let sealed = envelope::seal(&k, plaintext);
    Ok(GpswCiphertext {
        gamma: gamma.to_vec(),
        e0,
        e_a,
        sealed,
    })
}

/// Secret-shares the master secret `y` across the rows of `msp` and blinds
/// each row's share with the per-attribute master secret `t_i`.
pub fn generate_policy_key(msp: &Msp<u64>, msk: &GpswMasterKey) -> GpswFullPolicyKey {
    let mut rng = thread_rng();
    let c = msp.c;
    let mut u = sample_uniform_vec(&mut rng, c.saturating_sub(1));
    let sum: Fr = u.iter().fold(Fr::zero(), |acc, x| acc + *x);
    u.push(msk.y - sum);

    let shares = msp
        .mat
        .rows
        .iter()
        .zip(msp.row_to_attrib.iter())
        .map(|(row, attrib)| {
            let row_dot_u = row
                .iter()
                .zip(u.iter())
                .fold(Fr::zero(), |acc, (m, ui)| acc + *m * *ui);
            let t_attr = msk.t[*attrib as usize];
            let inv = t_attr.inverse().expect("attribute scalar is never zero");
            G1::one() * (row_dot_u * inv)
        })
        .collect();
    GpswFullPolicyKey {
        msp: msp.clone(),
        shares,
    }
}

/// Restricts a full policy key down to the rows labeled by attributes the
/// caller actually owns.
pub fn delegate_key(full: &GpswFullPolicyKey, owned: &[u64]) -> GpswPolicyKey {
    let rows = full
        .msp
        .row_to_attrib
        .iter()
        .enumerate()
        .filter(|(_, a)| owned.contains(a))
        .map(|(i, a)| (i, *a, full.shares[i]))
        .collect();
    GpswPolicyKey {
        msp: full.msp.clone(),
        rows,
    }
}

/// Decrypts `ct` with `key`, failing with "insufficient" if `ct.gamma`
/// doesn't satisfy the key's policy.
pub fn decrypt(ct: &GpswCiphertext, key: &GpswPolicyKey) -> Result<Vec<u8>, RabeError> {
    let owned_rows: Vec<Vec<Fr>> = key
        .rows
        .iter()
        .map(|(i, _, _)| key.msp.mat.rows[*i].clone())
        .collect();
    if owned_rows.is_empty() {
        return Err(RabeError::new("insufficient: key has no matching attributes"));
    }
    let owned_mat = Matrix::new(owned_rows)?;
    let alpha = gaussian::reconstruct(&owned_mat, &key.msp.target())
        .map_err(|_| RabeError::new("insufficient: key does not satisfy ciphertext's attributes"))?;

    let mut acc = Gt::one();
    for ((_, attrib, k_i), a_coeff) in key.rows.iter().zip(alpha.elems.iter()) {
        let idx = ct
            .gamma
            .iter()
            .position(|g| g == attrib)
            .ok_or_else(|| RabeError::new("insufficient: ciphertext lacks a required attribute"))?;
        let paired = pairing(*k_i, ct.e_a[idx]);
        acc = acc * paired.pow(*a_coeff);
    }
    let k = ct.e0 * acc.inverse();
    envelope::open(&k, &ct.sealed)
}
