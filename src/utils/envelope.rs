//! The hybrid symmetric envelope shared by every scheme whose plaintext is a
//! byte string (all but the raw GPSW group-element path). Orthogonal to the
//! ABE layer: the ABE math only ever has to carry a `Gt` session key `K`
//! securely, this module turns that `K` into bytes you can actually send.
use crate::error::RabeError;
use crate::utils::hash::hash_256;
use aes::Aes256;
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rabe_bn::Gt;
use rand::{thread_rng, RngCore};

type Encryptor = cbc::Encryptor<Aes256>;
type Decryptor = cbc::Decryptor<Aes256>;

const BLOCK_SIZE: usize = 16;

/// A sealed payload: the random IV and the CBC/PKCS7 ciphertext bytes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SealedEnvelope {
    pub iv: [u8; BLOCK_SIZE],
    pub ciphertext: Vec<u8>,
}

fn derive_key(k: &Gt) -> [u8; 32] {
    hash_256(format!("{:?}", k).as_bytes())
}

/// Seals `plaintext` under the target-group element `k`.
pub fn seal(k: &Gt, plaintext: &[u8]) -> SealedEnvelope {
    let key = derive_key(k);
    let mut iv = [0u8; BLOCK_SIZE];
    thread_rng().fill_bytes(&mut iv);
    let ciphertext = Encryptor::new(&key.into(), &iv.into())
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext);
    SealedEnvelope { iv, ciphertext }
}

/// Recovers the plaintext sealed under `k`. Fails with "failed to decrypt"
/// on an invalid PKCS#7 pad, indistinguishably from any other corruption --
/// this layer makes no MAC-failure-style distinction.
pub fn open(k: &Gt, envelope: &SealedEnvelope) -> Result<Vec<u8>, RabeError> {
    let key = derive_key(k);
    Decryptor::new(&key.into(), &envelope.iv.into())
        .decrypt_padded_vec_mut::<Pkcs7>(&envelope.ciphertext)
        .map_err(|_| RabeError::new("failed to decrypt"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rabe_bn::{pairing, G1, G2};

    #[test]
    fn open_seal_roundtrip() {
        let mut rng = thread_rng();
        let k = pairing(G1::random(&mut rng), G2::random(&mut rng));
        for msg in [&b""[..], b"a", b"dance like no one's watching, encrypt like everyone is!"] {
            let sealed = seal(&k, msg);
            assert_eq!(open(&k, &sealed).unwrap(), msg);
        }
    }

    #[test]
    fn wrong_key_fails_or_garbles() {
        let mut rng = thread_rng();
        let k1 = pairing(G1::random(&mut rng), G2::random(&mut rng));
        let k2 = pairing(G1::random(&mut rng), G2::random(&mut rng));
        let sealed = seal(&k1, b"our plaintext!");
        let opened = open(&k2, &sealed);
        assert!(opened.is_err() || opened.unwrap() != b"our plaintext!");
    }
}
