//! Uniform 32-byte digest facade over the eight nighthash algorithms.
//!
//! Every algorithm produces exactly 32 output bytes; MD2, MD5 (16 bytes)
//! and SHA-1 (20 bytes) are zero-padded so downstream consumers can treat
//! all digests as full rows.

use blake2b_simd::Params as Blake2bParams;
use md2::Md2;
use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256};
use sha3::{Keccak256, Sha3_256};

/// Output width shared by all facade digests.
pub const DIGEST_LEN: usize = 32;

/// The eight hash algorithms a nighthash selector can dispatch to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HashKind {
    /// BLAKE2b-256 keyed with 32 bytes of value 0.
    Blake2bKey32,
    /// BLAKE2b-256 keyed with 64 bytes of value 1.
    Blake2bKey64,
    /// SHA-1, padded from 20 to 32 bytes.
    Sha1,
    Sha256,
    Sha3,
    /// Keccak-256 with the original (pre-NIST) padding.
    Keccak,
    /// MD2, padded from 16 to 32 bytes.
    Md2,
    /// MD5, padded from 16 to 32 bytes.
    Md5,
}

impl HashKind {
    /// Map a nighthash operation accumulator to its algorithm.
    pub fn select(op: u32) -> Self {
        match op & 7 {
            0 => HashKind::Blake2bKey32,
            1 => HashKind::Blake2bKey64,
            2 => HashKind::Sha1,
            3 => HashKind::Sha256,
            4 => HashKind::Sha3,
            5 => HashKind::Keccak,
            6 => HashKind::Md2,
            _ => HashKind::Md5,
        }
    }
}

/// Digest `data` with the selected algorithm. When `index_suffix` is set,
/// its four little-endian bytes are appended to the input before
/// finalisation.
pub fn digest(kind: HashKind, data: &[u8], index_suffix: Option<u32>) -> [u8; DIGEST_LEN] {
    match kind {
        HashKind::Blake2bKey32 => blake2b_keyed(&[0u8; 32], data, index_suffix),
        HashKind::Blake2bKey64 => blake2b_keyed(&[1u8; 64], data, index_suffix),
        HashKind::Sha1 => digest_padded::<Sha1>(data, index_suffix),
        HashKind::Sha256 => digest_padded::<Sha256>(data, index_suffix),
        HashKind::Sha3 => digest_padded::<Sha3_256>(data, index_suffix),
        HashKind::Keccak => digest_padded::<Keccak256>(data, index_suffix),
        HashKind::Md2 => digest_padded::<Md2>(data, index_suffix),
        HashKind::Md5 => digest_padded::<Md5>(data, index_suffix),
    }
}

fn blake2b_keyed(key: &[u8], data: &[u8], index_suffix: Option<u32>) -> [u8; DIGEST_LEN] {
    let mut state = Blake2bParams::new().hash_length(DIGEST_LEN).key(key).to_state();
    state.update(data);
    if let Some(index) = index_suffix {
        state.update(&index.to_le_bytes());
    }
    let mut out = [0u8; DIGEST_LEN];
    out.copy_from_slice(state.finalize().as_bytes());
    out
}

fn digest_padded<D: Digest>(data: &[u8], index_suffix: Option<u32>) -> [u8; DIGEST_LEN] {
    let mut hasher = D::new();
    hasher.update(data);
    if let Some(index) = index_suffix {
        hasher.update(index.to_le_bytes());
    }
    let raw = hasher.finalize();
    let mut out = [0u8; DIGEST_LEN];
    out[..raw.len()].copy_from_slice(&raw);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn selector_covers_all_eight() {
        for op in 0u32..16 {
            let kind = HashKind::select(op);
            assert_eq!(kind, HashKind::select(op + 8));
        }
        assert_eq!(HashKind::select(3), HashKind::Sha256);
        assert_eq!(HashKind::select(5), HashKind::Keccak);
    }

    #[test]
    fn known_answers_abc() {
        let sha256 = digest(HashKind::Sha256, b"abc", None);
        assert_eq!(
            sha256,
            hex!("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
        );

        let sha3 = digest(HashKind::Sha3, b"abc", None);
        assert_eq!(
            sha3,
            hex!("3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532")
        );

        let keccak = digest(HashKind::Keccak, b"abc", None);
        assert_eq!(
            keccak,
            hex!("4e03657aea45a94fc7d47ba826c8d667c0d1e6e33a64a036ec44f58fa12d6c45")
        );
    }

    #[test]
    fn short_digests_are_zero_padded() {
        let sha1 = digest(HashKind::Sha1, b"abc", None);
        assert_eq!(&sha1[..20], hex!("a9993e364706816aba3e25717850c26c9cd0d89d"));
        assert_eq!(&sha1[20..], [0u8; 12]);

        let md5 = digest(HashKind::Md5, b"abc", None);
        assert_eq!(&md5[..16], hex!("900150983cd24fb0d6963f7d28e17f72"));
        assert_eq!(&md5[16..], [0u8; 16]);

        let md2 = digest(HashKind::Md2, b"abc", None);
        assert_eq!(&md2[..16], hex!("da853b0d3f88d99b30283a69e6ded6bb"));
        assert_eq!(&md2[16..], [0u8; 16]);
    }

    #[test]
    fn index_suffix_changes_digest() {
        for kind in [
            HashKind::Blake2bKey32,
            HashKind::Blake2bKey64,
            HashKind::Sha1,
            HashKind::Sha256,
            HashKind::Sha3,
            HashKind::Keccak,
            HashKind::Md2,
            HashKind::Md5,
        ] {
            let plain = digest(kind, b"seed", None);
            let suffixed = digest(kind, b"seed", Some(42));
            assert_ne!(plain, suffixed, "{kind:?}");
            // Suffixing is equivalent to appending the LE index bytes.
            let appended = digest(kind, b"seed\x2a\x00\x00\x00", None);
            assert_eq!(suffixed, appended, "{kind:?}");
        }
    }

    #[test]
    fn blake2b_keys_are_distinct() {
        let zero_key = digest(HashKind::Blake2bKey32, b"tile", None);
        let one_key = digest(HashKind::Blake2bKey64, b"tile", None);
        assert_ne!(zero_key, one_key);
        assert_eq!(zero_key, digest(HashKind::Blake2bKey32, b"tile", None));
    }
}
