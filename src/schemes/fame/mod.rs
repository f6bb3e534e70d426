//! `FAME`: ciphertext-policy attribute-based encryption with fast
//! decryption.
//!
//! * Developed by Shashank Agrawal, Melissa Chase, "FAME: Fast Attribute-
//!   based Message Encryption"
//! * Published in: ACM CCS 2017
//! * Type: encryption (ciphertext-policy attribute-based)
//! * Setting: bilinear groups (asymmetric, SXDH)
//!
//! Decryption splits into two independent pairings that are multiplied
//! together: a fixed three-term key/ct0 pairing that carries the blind
//! (`pkg1^s1 * pkg2^s2`), and a per-row large-universe gate (built from
//! `b1`,`b2`) that collapses to the identity for an authority-issued,
//! policy-satisfying key and to noise otherwise. Splitting the two keeps the
//! blind side free of ciphertext randomness, so recombining it never
//! produces cross terms quadratic in `s1`/`s2`.
use crate::error::RabeError;
use crate::utils::envelope::{self, SealedEnvelope};
use crate::utils::field::{sample_uniform, sample_uniform_vec};
use crate::utils::gaussian;
use crate::utils::hash::{hash_g1, hash_to_fr, label};
use crate::utils::linalg::{Matrix, Vector};
use crate::utils::policy::Msp;
use rabe_bn::{pairing, Fr, G1, G2, Gt};
use rand::thread_rng;

/// Public parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct FamePublicKey {
    a1_g2: G2,
    a2_g2: G2,
    pkg1: Gt,
    pkg2: Gt,
    /// `e(G1,G2)^b1`, lets [`encrypt`] build each row's large-universe gate
    /// public key without needing `b1` itself.
    egg_b1: Gt,
    /// `b2 * G2`, the gate's other half.
    b2_g2: G2,
}

/// The authority's master secret.
#[derive(Clone, Debug, PartialEq)]
pub struct FameMasterKey {
    a1: Fr,
    a2: Fr,
    b1: Fr,
    b2: Fr,
    d1: Fr,
    d2: Fr,
    d3: Fr,
    d1_g1: G1,
    d2_g1: G1,
    d3_g1: G1,
}

/// One ciphertext row's large-universe gate: authenticates that the
/// attribute key used against it was actually issued by the authority,
/// without itself carrying any part of the session blind.
#[derive(Clone, Debug, PartialEq)]
struct FameGateRow {
    c1: Gt,
    c2: G2,
    c3: G2,
}

/// A ciphertext-policy ciphertext carrying the compiled MSP by value.
#[derive(Clone, Debug, PartialEq)]
pub struct FameCiphertext {
    msp: Msp<String>,
    ct0: (G2, G2, G2),
    rows: Vec<FameGateRow>,
    ct_prime: Gt,
    sealed: SealedEnvelope,
}

/// An attribute key: one gate element per attribute owned, plus the
/// key-level base triple `k_prime` that carries the actual blind.
#[derive(Clone, Debug, PartialEq)]
pub struct FameAttribKey {
    attribs: Vec<(String, G1)>,
    k_prime: [G1; 3],
}

pub fn setup() -> (FamePublicKey, FameMasterKey) {
    let mut rng = thread_rng();
    let [a1, a2, b1, b2, d1, d2, d3]: [Fr; 7] = {
        let v = sample_uniform_vec(&mut rng, 7);
        [v[0], v[1], v[2], v[3], v[4], v[5], v[6]]
    };
    let g = pairing(G1::one(), G2::one());
    let pkg1 = g.pow(a1 * d1 + d3);
    let pkg2 = g.pow(a2 * d2 + d3);
    let pk = FamePublicKey {
        a1_g2: G2::one() * a1,
        a2_g2: G2::one() * a2,
        pkg1,
        pkg2,
        egg_b1: g.pow(b1),
        b2_g2: G2::one() * b2,
    };
    let msk = FameMasterKey {
        a1,
        a2,
        b1,
        b2,
        d1,
        d2,
        d3,
        d1_g1: G1::one() * d1,
        d2_g1: G1::one() * d2,
        d3_g1: G1::one() * d3,
    };
    (pk, msk)
}

/// The large-universe gate's public per-attribute key, `e(G1,G2)^(chi(y) +
/// b1)`, computable by anyone from `pk` alone.
fn gate_egg_alpha(pk: &FamePublicKey, attr: &str) -> Gt {
    let g = pairing(G1::one(), G2::one());
    g.pow(hash_to_fr(&label(&["fame-alpha", attr]))) * pk.egg_b1
}

/// The gate's other per-attribute public point, `(chi'(y) + b2) * G2`.
fn gate_y_g2(pk: &FamePublicKey, attr: &str) -> G2 {
    G2::one() * hash_to_fr(&label(&["fame-y", attr])) + pk.b2_g2
}

/// The fixed point every gate pairing is anchored to; there is no per-user
/// identity in FAME, so this plays the role the gid-hash plays in `aw11`.
fn gate_anchor() -> G1 {
    hash_g1(b"fame-gate-anchor")
}

/// Encrypts `plaintext` under the ciphertext policy `msp`.
pub fn encrypt(pk: &FamePublicKey, msp: &Msp<String>, plaintext: &[u8]) -> Result<FameCiphertext, RabeError> {
    msp.require_injective()?;
    if msp.row_to_attrib.is_empty() {
        return Err(RabeError::new("fame encrypt: empty policy"));
    }
    let mut rng = thread_rng();
    let s1 = sample_uniform(&mut rng);
    let s2 = sample_uniform(&mut rng);
    let session_key = crate::utils::field::sample_gt(&mut rng);

    let ct0 = (pk.a1_g2 * s1, pk.a2_g2 * s2, G2::one() * (s1 + s2));

    // `w[0] = 0` so a policy-satisfying recombination always cancels the
    // gate to the identity, regardless of which rows happen to be owned.
    let c = msp.c;
    let mut w = sample_uniform_vec(&mut rng, c);
    w[0] = Fr::zero();
    let omega = msp.mat.mul_vec(&Vector::new(w))?.elems;

    let rows = msp
        .row_to_attrib
        .iter()
        .enumerate()
        .map(|(i, attr)| {
            let r_x = sample_uniform(&mut rng);
            let c1 = gate_egg_alpha(pk, attr).pow(r_x);
            let c2 = G2::one() * r_x;
            let c3 = gate_y_g2(pk, attr) * r_x + G2::one() * omega[i];
            FameGateRow { c1, c2, c3 }
        })
        .collect();

    let ct_prime = pk.pkg1.pow(s1) * pk.pkg2.pow(s2) * session_key;
    let sealed = envelope::seal(&session_key, plaintext);
    Ok(FameCiphertext {
        msp: msp.clone(),
        ct0,
        rows,
        ct_prime,
        sealed,
    })
}

/// Issues an attribute key for `gamma` under the master key `msk`.
pub fn generate_attrib_key(gamma: &[String], msk: &FameMasterKey) -> Result<FameAttribKey, RabeError> {
    if gamma.is_empty() {
        return Err(RabeError::new("fame keygen: attribute set empty"));
    }
    let anchor = gate_anchor();
    let attribs = gamma
        .iter()
        .map(|y| {
            let alpha_y = hash_to_fr(&label(&["fame-alpha", y.as_str()])) + msk.b1;
            let y_y = hash_to_fr(&label(&["fame-y", y.as_str()])) + msk.b2;
            let key = G1::one() * alpha_y + anchor * y_y;
            (y.clone(), key)
        })
        .collect();

    // `k_prime` is the entire blind, independent of which attributes are
    // owned; only the gate above gates access to a usable decryption.
    let k_prime = [msk.d1_g1, msk.d2_g1, msk.d3_g1];

    Ok(FameAttribKey { attribs, k_prime })
}

/// Decrypts `ct` with `key`, failing with "insufficient" if `key`'s
/// attribute set does not satisfy `ct`'s policy.
pub fn decrypt(ct: &FameCiphertext, key: &FameAttribKey) -> Result<Vec<u8>, RabeError> {
    let owned: Vec<usize> = ct
        .msp
        .row_to_attrib
        .iter()
        .enumerate()
        .filter(|(_, a)| key.attribs.iter().any(|(ka, _)| ka == *a))
        .map(|(i, _)| i)
        .collect();
    if owned.is_empty() {
        return Err(RabeError::new("insufficient: key has no matching attributes"));
    }
    let owned_rows: Vec<Vec<Fr>> = owned.iter().map(|&i| ct.msp.mat.rows[i].clone()).collect();
    let owned_mat = Matrix::new(owned_rows)?;
    let alpha = gaussian::reconstruct(&owned_mat, &ct.msp.target())
        .map_err(|_| RabeError::new("insufficient: key does not satisfy ciphertext's policy"))?;

    let anchor = gate_anchor();
    let mut gate = Gt::one();
    for (&row_idx, a_coeff) in owned.iter().zip(alpha.elems.iter()) {
        let attr = &ct.msp.row_to_attrib[row_idx];
        let (_, key_attr) = key
            .attribs
            .iter()
            .find(|(a, _)| a == attr)
            .expect("attribute was selected from the owned set");
        let row = &ct.rows[row_idx];
        let term = row.c1 * pairing(anchor, row.c3) * pairing(*key_attr, row.c2).inverse();
        gate = gate * term.pow(*a_coeff);
    }

    let blind = pairing(key.k_prime[0], ct.ct0.0) * pairing(key.k_prime[1], ct.ct0.1) * pairing(key.k_prime[2], ct.ct0.2);
    let session_key = ct.ct_prime * blind.inverse() * gate.inverse();
    envelope::open(&session_key, &ct.sealed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::policy::boolean_to_msp;

    fn gamma(attrs: &[u64]) -> Vec<String> {
        attrs.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn matching_policy_decrypts() {
        let (pk, msk) = setup();
        let msp = boolean_to_msp::<String>("((0 AND 1) OR (2 AND 3)) AND 5", false).unwrap();
        let plaintext = b"FAME decrypts fast.".to_vec();
        let ct = encrypt(&pk, &msp, &plaintext).unwrap();

        let key = generate_attrib_key(&gamma(&[0, 2, 3, 5]), &msk).unwrap();
        assert_eq!(decrypt(&ct, &key).unwrap(), plaintext);
    }

    #[test]
    fn non_matching_policy_is_insufficient() {
        let (pk, msk) = setup();
        let msp = boolean_to_msp::<String>("((0 AND 1) OR (2 AND 3)) AND 5", false).unwrap();
        let ct = encrypt(&pk, &msp, b"FAME decrypts fast.").unwrap();

        let key = generate_attrib_key(&gamma(&[1, 3, 5]), &msk).unwrap();
        assert!(decrypt(&ct, &key).is_err());
    }

    #[test]
    fn non_injective_msp_is_rejected() {
        let (pk, _msk) = setup();
        let msp = boolean_to_msp::<String>("0 OR 0", false).unwrap();
        assert!(encrypt(&pk, &msp, b"x").is_err());
    }

    #[test]
    fn forged_attribute_key_is_rejected() {
        let (pk, msk) = setup();
        let msp = boolean_to_msp::<String>("0 AND 1", false).unwrap();
        let ct = encrypt(&pk, &msp, b"FAME decrypts fast.").unwrap();

        let mut key = generate_attrib_key(&gamma(&[0, 1]), &msk).unwrap();
        // Tamper with one attribute's gate element as if it had been
        // self-declared rather than authority-issued.
        key.attribs[0].1 = key.attribs[0].1 + G1::one();
        let opened = decrypt(&ct, &key);
        assert!(opened.is_err() || opened.unwrap() != b"FAME decrypts fast.");
    }
}
