//! `DIPPE`: decentralized inner-product predicate encryption.
//!
//! * Developed by Jie Chen, Junqing Gong, Lucas Kowalczyk, Hoeteck Wee,
//!   "Unbounded ABE via Bilinear Entropy Expansion, Revisited" (the DIPPE
//!   construction therein)
//! * Type: encryption (decentralized, inner-product predicate)
//! * Setting: bilinear groups (asymmetric, k-Lin; k=1 is SXDH)
//!
//! No central authority: any number of independent authorities each run
//! [`authority_setup`] against the shared [`DippeGlobalParams`] and publish
//! a public key. A ciphertext tagged with policy vector `x` (one slot per
//! authority) is decryptable by a set of per-authority key shares tagged
//! with attribute vector `v` iff `v . x == 0`.
use crate::error::RabeError;
use crate::utils::envelope::{self, SealedEnvelope};
use crate::utils::field::{sample_gt, sample_uniform, sample_uniform_vec, usize_to_fr};
use crate::utils::groupvec::{mat_g1_mul_vec, mat_mul_vec_g2, mul_g1, pair_dot};
use crate::utils::hash::{hash_g2, label};
use rabe_bn::{pairing, Fr, G1, G2, Gt};
use rand::thread_rng;

/// Global parameters for security level `k` (the k-Lin assumption size),
/// shared by every authority.
#[derive(Clone, Debug, PartialEq)]
pub struct DippeGlobalParams {
    k: usize,
    a: Vec<Vec<Fr>>,
    u: Vec<Vec<Fr>>,
    a_g1: Vec<Vec<G1>>,
    ua_g1: Vec<Vec<G1>>,
}

/// One authority's public key.
#[derive(Clone, Debug, PartialEq)]
pub struct DippeAuthorityPublicKey {
    pub id: usize,
    wt_a_g1: Vec<Vec<G1>>,
    eg_alpha_a: Vec<Gt>,
    sigma_g2: G2,
}

/// One authority's secret key.
#[derive(Clone, Debug, PartialEq)]
pub struct DippeAuthoritySecretKey {
    pub id: usize,
    w: Vec<Vec<Fr>>,
    alpha: Vec<Fr>,
    sigma: Fr,
}

/// A ciphertext tagged with the policy vector `x`, one component per
/// participating authority.
#[derive(Clone, Debug, PartialEq)]
pub struct DippeCiphertext {
    x: Vec<Fr>,
    c0: Vec<G1>,
    c: Vec<Vec<G1>>,
    c_prime: Gt,
    sealed: SealedEnvelope,
}

/// One authority's contribution to a key for attribute vector `v`, bound to
/// a global user identifier.
#[derive(Clone, Debug, PartialEq)]
pub struct DippeKeyShare {
    id: usize,
    share: Vec<G2>,
}

fn mat_to_g1(m: &[Vec<Fr>]) -> Vec<Vec<G1>> {
    m.iter().map(|row| mul_g1(row)).collect()
}

fn mat_mul(a: &[Vec<Fr>], b: &[Vec<Fr>]) -> Vec<Vec<Fr>> {
    let (r, inner, c) = (a.len(), b.len(), b[0].len());
    let mut out = vec![vec![Fr::zero(); c]; r];
    for i in 0..r {
        for j in 0..c {
            let mut acc = Fr::zero();
            for l in 0..inner {
                acc = acc + a[i][l] * b[l][j];
            }
            out[i][j] = acc;
        }
    }
    out
}

fn transpose(m: &[Vec<Fr>]) -> Vec<Vec<Fr>> {
    let (r, c) = (m.len(), m[0].len());
    let mut out = vec![vec![Fr::zero(); r]; c];
    for i in 0..r {
        for j in 0..c {
            out[j][i] = m[i][j];
        }
    }
    out
}

fn mat_vec_mul(m: &[Vec<Fr>], v: &[Fr]) -> Vec<Fr> {
    m.iter()
        .map(|row| row.iter().zip(v.iter()).fold(Fr::zero(), |acc, (a, b)| acc + *a * *b))
        .collect()
}

/// Runs the trust-anchor-free global setup for security parameter `k`. The
/// field matrices `A`, `U` are returned alongside the public parameters
/// since [`authority_setup`] needs `A` and [`encrypt`] needs both.
pub fn global_setup(k: usize) -> DippeGlobalParams {
    let mut rng = thread_rng();
    let a: Vec<Vec<Fr>> = (0..=k).map(|_| sample_uniform_vec(&mut rng, k)).collect();
    let u: Vec<Vec<Fr>> = (0..=k).map(|_| sample_uniform_vec(&mut rng, k + 1)).collect();
    let a_g1 = mat_to_g1(&a);
    let ua = mat_mul(&u, &a);
    let ua_g1 = mat_to_g1(&ua);
    DippeGlobalParams { k, a, u, a_g1, ua_g1 }
}

/// Runs one authority's local setup against the shared global parameters.
pub fn authority_setup(id: usize, gp: &DippeGlobalParams) -> (DippeAuthorityPublicKey, DippeAuthoritySecretKey) {
    let mut rng = thread_rng();
    let k = gp.k;
    let w: Vec<Vec<Fr>> = (0..=k).map(|_| sample_uniform_vec(&mut rng, k + 1)).collect();
    let alpha = sample_uniform_vec(&mut rng, k + 1);
    let sigma = sample_uniform(&mut rng);

    let wt_a = mat_mul(&transpose(&w), &gp.a);
    let wt_a_g1 = mat_to_g1(&wt_a);

    let alpha_a = mat_vec_mul(&transpose(&gp.a), &alpha);
    let g = pairing(G1::one(), G2::one());
    let eg_alpha_a = alpha_a.iter().map(|s| g.pow(*s)).collect();

    let pk = DippeAuthorityPublicKey {
        id,
        wt_a_g1,
        eg_alpha_a,
        sigma_g2: G2::one() * sigma,
    };
    let sk = DippeAuthoritySecretKey { id, w, alpha, sigma };
    (pk, sk)
}

/// Encrypts `plaintext` under policy vector `x` (one entry per authority in
/// `pks`, same order).
pub fn encrypt(
    gp: &DippeGlobalParams,
    pks: &[DippeAuthorityPublicKey],
    x: &[Fr],
    plaintext: &[u8],
) -> Result<DippeCiphertext, RabeError> {
    if pks.len() != x.len() {
        return Err(RabeError::new("dippe encrypt: policy vector length does not match authority count"));
    }
    if pks.is_empty() {
        return Err(RabeError::new("dippe encrypt: no authorities given"));
    }
    let mut rng = thread_rng();
    let s = sample_uniform_vec(&mut rng, gp.k);
    let session_key = sample_gt(&mut rng);

    let c0 = mat_g1_mul_vec(&gp.a_g1, &s)?;

    let c: Vec<Vec<G1>> = pks
        .iter()
        .zip(x.iter())
        .map(|(pk, xi)| {
            let from_u = mat_g1_mul_vec(&gp.ua_g1, &s)?;
            let from_w = mat_g1_mul_vec(&pk.wt_a_g1, &s)?;
            Ok(from_u
                .iter()
                .zip(from_w.iter())
                .map(|(u_term, w_term)| *u_term * *xi + *w_term)
                .collect())
        })
        .collect::<Result<Vec<Vec<G1>>, RabeError>>()?;

    let mut c_prime = session_key;
    for pk in pks {
        for (eg, si) in pk.eg_alpha_a.iter().zip(s.iter()) {
            c_prime = c_prime * eg.pow(*si);
        }
    }

    let sealed = envelope::seal(&session_key, plaintext);
    Ok(DippeCiphertext {
        x: x.to_vec(),
        c0,
        c,
        c_prime,
        sealed,
    })
}

fn g2_hash_row(row: usize, gid: &str, v: &[Fr]) -> G2 {
    let v_str: Vec<String> = v.iter().map(|s| format!("{:?}", s)).collect();
    let parts: Vec<&str> = std::iter::once(row.to_string())
        .chain(std::iter::once(gid.to_string()))
        .chain(v_str)
        .collect::<Vec<_>>();
    let refs: Vec<&str> = parts.iter().map(|s| s.as_str()).collect();
    hash_g2(&label(&refs))
}

/// Issues authority `sk`'s contribution to a key for attribute vector `v`
/// bound to `gid`, given the public keys of every other participating
/// authority (so the pairwise-cancelling blinding term can be computed).
pub fn authority_key_share(
    sk: &DippeAuthoritySecretKey,
    other_pks: &[DippeAuthorityPublicKey],
    gid: &str,
    v: &[Fr],
) -> Result<DippeKeyShare, RabeError> {
    let rows = sk.alpha.len();
    let v_a = v[sk.id];

    let mut g2_mu = vec![G2::zero(); rows];
    for other in other_pks {
        let sign = if other.id < sk.id { Fr::one() } else { Fr::zero() - Fr::one() };
        let shared = other.sigma_g2 * sk.sigma;
        let shared_str = format!("{:?}", shared);
        for (r, slot) in g2_mu.iter_mut().enumerate() {
            let h = hash_g2(&label(&[&r.to_string(), &shared_str, gid]));
            *slot = *slot + h * sign;
        }
    }

    let g2_h: Vec<G2> = (0..rows).map(|r| g2_hash_row(r, gid, v)).collect();
    let g2_wh = mat_mul_vec_g2(&sk.w, &g2_h)?;

    let share = (0..rows)
        .map(|r| G2::one() * sk.alpha[r] + g2_wh[r] * v_a + g2_mu[r])
        .collect();
    Ok(DippeKeyShare { id: sk.id, share })
}

/// Decrypts `ct` with the key shares `shares` (one per participating
/// authority, same order as `ct.c`), bound to attribute vector `v` and
/// `gid`. Fails with "insufficient" unless `v . ct.x == 0`.
pub fn decrypt(ct: &DippeCiphertext, shares: &[DippeKeyShare], gid: &str, v: &[Fr]) -> Result<Vec<u8>, RabeError> {
    let inner: Fr = v.iter().zip(ct.x.iter()).fold(Fr::zero(), |acc, (a, b)| acc + *a * *b);
    if inner != Fr::zero() {
        return Err(RabeError::new("insufficient: attribute vector does not satisfy ciphertext's policy"));
    }
    if shares.is_empty() || shares.len() != ct.c.len() {
        return Err(RabeError::new("insufficient: missing authority key shares"));
    }

    let rows = shares[0].share.len();
    let mut summed_share = vec![G2::zero(); rows];
    for share in shares {
        for (acc, s) in summed_share.iter_mut().zip(share.share.iter()) {
            *acc = *acc + *s;
        }
    }
    let term1 = pair_dot(&ct.c0, &summed_share)?;

    let mut v_dot_c = vec![G1::zero(); rows];
    for (c_a, v_a) in ct.c.iter().zip(v.iter()) {
        for (acc, c_r) in v_dot_c.iter_mut().zip(c_a.iter()) {
            *acc = *acc + *c_r * *v_a;
        }
    }
    let g2_h: Vec<G2> = (0..rows).map(|r| g2_hash_row(r, gid, v)).collect();
    let term2 = pair_dot(&v_dot_c, &g2_h)?;

    let session_key = ct.c_prime * term1.inverse() * term2;
    envelope::open(&session_key, &ct.sealed)
}

/// `1` at each slot in `required`, `-t` at the terminal slot (index `n`).
pub fn exact_threshold_policy_vec_init(required: &[usize], n: usize, t: usize) -> Vec<Fr> {
    let mut v = vec![Fr::zero(); n + 1];
    for &i in required {
        v[i] = Fr::one();
    }
    v[n] = Fr::zero() - usize_to_fr(t);
    v
}

/// Random values summing to zero over `required`'s slots; all other slots
/// (including the terminal one) are zero.
pub fn conjunction_policy_vec_init(required: &[usize], n: usize) -> Vec<Fr> {
    let mut rng = thread_rng();
    let mut v = vec![Fr::zero(); n + 1];
    if required.is_empty() {
        return v;
    }
    let mut sum = Fr::zero();
    for &i in &required[..required.len() - 1] {
        let r = sample_uniform(&mut rng);
        v[i] = r;
        sum = sum + r;
    }
    v[*required.last().unwrap()] = Fr::zero() - sum;
    v
}

/// `1` at each slot in `owned`, plus `1` at the terminal slot (index `n`).
pub fn attribute_vec_init(owned: &[usize], n: usize) -> Vec<Fr> {
    let mut v = vec![Fr::zero(); n + 1];
    for &i in owned {
        v[i] = Fr::one();
    }
    v[n] = Fr::one();
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_authorities(k: usize, n: usize) -> (DippeGlobalParams, Vec<DippeAuthorityPublicKey>, Vec<DippeAuthoritySecretKey>) {
        let gp = global_setup(k);
        let mut pks = Vec::new();
        let mut sks = Vec::new();
        for id in 0..n {
            let (pk, sk) = authority_setup(id, &gp);
            pks.push(pk);
            sks.push(sk);
        }
        (gp, pks, sks)
    }

    #[test]
    fn conjunction_policy_satisfied_decrypts() {
        let n = 5;
        let (gp, pks, sks) = setup_authorities(1, n + 1);
        let x = conjunction_policy_vec_init(&[0, 2], n);
        let plaintext = b"DIPPE is decentralized.".to_vec();
        let ct = encrypt(&gp, &pks, &x, &plaintext).unwrap();

        let v = attribute_vec_init(&[0, 2, 3], n);
        let shares: Vec<_> = sks
            .iter()
            .map(|sk| {
                let others: Vec<_> = pks.iter().filter(|p| p.id != sk.id).cloned().collect();
                authority_key_share(sk, &others, "alice", &v).unwrap()
            })
            .collect();
        assert_eq!(decrypt(&ct, &shares, "alice", &v).unwrap(), plaintext);
    }

    #[test]
    fn conjunction_policy_unsatisfied_refuses() {
        let n = 5;
        let (gp, pks, sks) = setup_authorities(1, n + 1);
        let x = conjunction_policy_vec_init(&[0, 2], n);
        let ct = encrypt(&gp, &pks, &x, b"DIPPE is decentralized.").unwrap();

        let v = attribute_vec_init(&[0, 3], n);
        let shares: Vec<_> = sks
            .iter()
            .map(|sk| {
                let others: Vec<_> = pks.iter().filter(|p| p.id != sk.id).cloned().collect();
                authority_key_share(sk, &others, "alice", &v).unwrap()
            })
            .collect();
        assert!(decrypt(&ct, &shares, "alice", &v).is_err());
    }
}
