//! `MAABE`: Rouselakis-Waters multi-authority ciphertext-policy ABE.
//!
//! * Developed by Yannis Rouselakis, Brent Waters, "Efficient Statically-
//!   Secure Large-Universe Multi-Authority Attribute-Based Encryption"
//! * Published in: Financial Cryptography and Data Security 2015
//! * Type: encryption (ciphertext-policy, multi-authority)
//! * Setting: bilinear groups (asymmetric)
//!
//! Any number of independent authorities, each governing a disjoint set of
//! string attributes. Keys are bound to a global user identifier (`gid`) by
//! hashing it into `G1`; collusion between different users cannot combine
//! their key shares because each share is blinded by that user's own
//! `HashG1(gid)`.
use crate::error::RabeError;
use crate::utils::envelope::{self, SealedEnvelope};
use crate::utils::field::{sample_uniform, sample_uniform_vec};
use crate::utils::gaussian;
use crate::utils::hash::hash_g1;
use crate::utils::linalg::Matrix;
use crate::utils::policy::Msp;
use rabe_bn::{pairing, Fr, G1, G2, Gt};
use rand::thread_rng;
use std::collections::HashMap;

/// One authority's public key: per-attribute public material for every
/// attribute it governs.
#[derive(Clone, Debug, PartialEq)]
pub struct MaAbeAuthorityPublicKey {
    attribs: HashMap<String, (Gt, G2)>,
}

/// One authority's secret key.
#[derive(Clone, Debug, PartialEq)]
pub struct MaAbeAuthoritySecretKey {
    attribs: HashMap<String, (Fr, Fr)>,
}

/// A ciphertext-policy ciphertext.
#[derive(Clone, Debug, PartialEq)]
pub struct MaAbeCiphertext {
    msp: Msp<String>,
    c0: Gt,
    rows: Vec<MaAbeCtRow>,
    sealed: SealedEnvelope,
}

#[derive(Clone, Debug, PartialEq)]
struct MaAbeCtRow {
    attrib: String,
    c1: Gt,
    c2: G2,
    c3: G2,
}

/// A per-attribute, per-gid user key.
#[derive(Clone, Debug, PartialEq)]
pub struct MaAbeAttribKey {
    gid: String,
    attrib: String,
    key: G1,
}

/// Runs one authority's setup over the attributes it governs.
pub fn authority_setup(attribs: &[String]) -> Result<(MaAbeAuthorityPublicKey, MaAbeAuthoritySecretKey), RabeError> {
    if attribs.is_empty() {
        return Err(RabeError::new("maabe authority setup: attribute set empty"));
    }
    let mut rng = thread_rng();
    let g = pairing(G1::one(), G2::one());
    let mut pk_attribs = HashMap::new();
    let mut sk_attribs = HashMap::new();
    for a in attribs {
        let alpha = sample_uniform(&mut rng);
        let y = sample_uniform(&mut rng);
        pk_attribs.insert(a.clone(), (g.pow(alpha), G2::one() * y));
        sk_attribs.insert(a.clone(), (alpha, y));
    }
    Ok((
        MaAbeAuthorityPublicKey { attribs: pk_attribs },
        MaAbeAuthoritySecretKey { attribs: sk_attribs },
    ))
}

/// Encrypts `plaintext` under `msp`, given the public keys of every
/// authority governing an attribute referenced by `msp`.
pub fn encrypt(
    msp: &Msp<String>,
    pks: &[MaAbeAuthorityPublicKey],
    plaintext: &[u8],
) -> Result<MaAbeCiphertext, RabeError> {
    if plaintext.is_empty() {
        return Err(RabeError::new("maabe encrypt: empty plaintext"));
    }
    if msp.row_to_attrib.is_empty() {
        return Err(RabeError::new("maabe encrypt: empty policy"));
    }
    msp.require_injective()?;
    for attrib in &msp.row_to_attrib {
        if !pks.iter().any(|pk| pk.attribs.contains_key(attrib)) {
            return Err(RabeError::new("maabe encrypt: attribute not governed by any given authority"));
        }
    }

    let mut rng = thread_rng();
    let c = msp.c;
    let v = sample_uniform_vec(&mut rng, c);
    let mut w = sample_uniform_vec(&mut rng, c);
    w[0] = Fr::zero();
    let lambda = msp.mat.mul_vec(&crate::utils::linalg::Vector::new(v.clone()))?.elems;
    let omega = msp.mat.mul_vec(&crate::utils::linalg::Vector::new(w.clone()))?.elems;

    let session_key = crate::utils::field::sample_gt(&mut rng);
    let g = pairing(G1::one(), G2::one());
    let c0 = session_key * g.pow(v[0]);

    let rows = msp
        .row_to_attrib
        .iter()
        .enumerate()
        .map(|(i, attrib)| -> Result<MaAbeCtRow, RabeError> {
            let (egg_alpha, y_g2) = pks
                .iter()
                .find_map(|pk| pk.attribs.get(attrib))
                .ok_or_else(|| RabeError::new("maabe encrypt: attribute not governed by any given authority"))?;
            let r_x = sample_uniform(&mut rng);
            let c1 = g.pow(lambda[i]) * egg_alpha.pow(r_x);
            let c2 = G2::one() * r_x;
            let c3 = *y_g2 * r_x + G2::one() * omega[i];
            Ok(MaAbeCtRow {
                attrib: attrib.clone(),
                c1,
                c2,
                c3,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let sealed = envelope::seal(&session_key, plaintext);
    Ok(MaAbeCiphertext {
        msp: msp.clone(),
        c0,
        rows,
        sealed,
    })
}

/// Issues a key for `attrib`, bound to `gid`, under the authority's secret
/// key.
pub fn generate_attrib_key(gid: &str, attrib: &str, sk: &MaAbeAuthoritySecretKey) -> Result<MaAbeAttribKey, RabeError> {
    if gid.is_empty() {
        return Err(RabeError::new("maabe keygen: empty gid"));
    }
    let (alpha, y) = sk
        .attribs
        .get(attrib)
        .ok_or_else(|| RabeError::new("maabe keygen: attribute not governed by this authority"))?;
    let h = hash_g1(gid.as_bytes());
    let key = G1::one() * *alpha + h * *y;
    Ok(MaAbeAttribKey {
        gid: gid.to_string(),
        attrib: attrib.to_string(),
        key,
    })
}

/// Decrypts `ct` with `keys`. Every key must share one `gid`; fails with
/// "insufficient" if the combined attribute set doesn't satisfy `ct`'s
/// policy.
pub fn decrypt(ct: &MaAbeCiphertext, keys: &[MaAbeAttribKey]) -> Result<Vec<u8>, RabeError> {
    if keys.is_empty() {
        return Err(RabeError::new("insufficient: no keys given"));
    }
    let gid = &keys[0].gid;
    if keys.iter().any(|k| &k.gid != gid) {
        return Err(RabeError::new("insufficient: keys do not share one gid"));
    }
    let h = hash_g1(gid.as_bytes());

    let owned: Vec<(usize, &MaAbeAttribKey)> = ct
        .msp
        .row_to_attrib
        .iter()
        .enumerate()
        .filter_map(|(i, a)| keys.iter().find(|k| &k.attrib == a).map(|k| (i, k)))
        .collect();
    if owned.is_empty() {
        return Err(RabeError::new("insufficient: key has no matching attributes"));
    }
    let owned_rows: Vec<Vec<Fr>> = owned.iter().map(|(i, _)| ct.msp.mat.rows[*i].clone()).collect();
    let owned_mat = Matrix::new(owned_rows)?;
    let alpha = gaussian::reconstruct(&owned_mat, &ct.msp.target())
        .map_err(|_| RabeError::new("insufficient: key does not satisfy ciphertext's policy"))?;

    let mut acc = Gt::one();
    for ((row_idx, key), a_coeff) in owned.iter().zip(alpha.elems.iter()) {
        let row = &ct.rows[*row_idx];
        let egg_lambda = row.c1 * pairing(h, row.c3) * pairing(key.key, row.c2).inverse();
        acc = acc * egg_lambda.pow(*a_coeff);
    }
    let session_key = ct.c0 * acc.inverse();
    envelope::open(&session_key, &ct.sealed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::policy::boolean_to_msp;

    #[test]
    fn cross_gid_keys_do_not_collude() {
        let (pk_a, sk_a) = authority_setup(&["a1".to_string(), "a2".to_string()]).unwrap();
        let msp = boolean_to_msp::<String>("a1 AND a2", false).unwrap();
        let plaintext = b"no cross-gid collusion.".to_vec();
        let ct = encrypt(&msp, &[pk_a], &plaintext).unwrap();

        let key_alice = generate_attrib_key("alice", "a1", &sk_a).unwrap();
        let key_bob = generate_attrib_key("bob", "a2", &sk_a).unwrap();

        assert!(decrypt(&ct, &[key_alice, key_bob]).is_err());
    }

    #[test]
    fn single_gid_with_both_attributes_decrypts() {
        let (pk_a, sk_a) = authority_setup(&["a1".to_string(), "a2".to_string()]).unwrap();
        let msp = boolean_to_msp::<String>("a1 AND a2", false).unwrap();
        let plaintext = b"single gid decrypts.".to_vec();
        let ct = encrypt(&msp, &[pk_a], &plaintext).unwrap();

        let key1 = generate_attrib_key("alice", "a1", &sk_a).unwrap();
        let key2 = generate_attrib_key("alice", "a2", &sk_a).unwrap();
        assert_eq!(decrypt(&ct, &[key1, key2]).unwrap(), plaintext);
    }
}
