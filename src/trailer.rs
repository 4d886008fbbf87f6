//! Fixed-layout block trailer shared by the Trigg and Peach cores.

/// Total trailer size in bytes.
pub const TRAILER_LEN: usize = 160;
/// Nonce size in bytes (two 16-byte tokenised haiku).
pub const NONCE_LEN: usize = 32;

// Field offsets within the 160-byte trailer. All multi-byte fields are
// little-endian on the wire.
const PHASH: usize = 0;
const BNUM: usize = 32;
const DIFFICULTY: usize = 56;
const MROOT: usize = 60;
const NONCE: usize = 92;

/// A block trailer, treated as an opaque 160-byte array with named field
/// accessors. The proof-of-work cores read `phash`, `bnum`, `difficulty`,
/// `mroot` and `nonce`; `nonce` is the only field they write.
#[derive(Clone)]
pub struct BlockTrailer {
    bytes: [u8; TRAILER_LEN],
}

impl BlockTrailer {
    /// Wrap a raw 160-byte trailer.
    pub fn from_bytes(bytes: [u8; TRAILER_LEN]) -> Self {
        Self { bytes }
    }

    /// A zeroed trailer, useful as a starting point for benchmarks.
    pub fn zeroed() -> Self {
        Self { bytes: [0u8; TRAILER_LEN] }
    }

    pub fn as_bytes(&self) -> &[u8; TRAILER_LEN] {
        &self.bytes
    }

    /// Previous block hash.
    pub fn phash(&self) -> [u8; 32] {
        self.field_32(PHASH)
    }

    /// Block number, little-endian.
    pub fn bnum(&self) -> [u8; 8] {
        let mut out = [0u8; 8];
        out.copy_from_slice(&self.bytes[BNUM..BNUM + 8]);
        out
    }

    /// Block difficulty as a little-endian u32. Only the low byte is
    /// significant to the proof-of-work predicate.
    pub fn difficulty(&self) -> u32 {
        u32::from_le_bytes([
            self.bytes[DIFFICULTY],
            self.bytes[DIFFICULTY + 1],
            self.bytes[DIFFICULTY + 2],
            self.bytes[DIFFICULTY + 3],
        ])
    }

    /// Merkle root over the block's transactions.
    pub fn mroot(&self) -> [u8; 32] {
        self.field_32(MROOT)
    }

    /// The 32-byte haiku nonce.
    pub fn nonce(&self) -> [u8; 32] {
        self.field_32(NONCE)
    }

    pub fn set_nonce(&mut self, nonce: &[u8; NONCE_LEN]) {
        self.bytes[NONCE..NONCE + NONCE_LEN].copy_from_slice(nonce);
    }

    pub fn set_phash(&mut self, phash: &[u8; 32]) {
        self.bytes[PHASH..PHASH + 32].copy_from_slice(phash);
    }

    pub fn set_mroot(&mut self, mroot: &[u8; 32]) {
        self.bytes[MROOT..MROOT + 32].copy_from_slice(mroot);
    }

    pub fn set_bnum(&mut self, bnum: u64) {
        self.bytes[BNUM..BNUM + 8].copy_from_slice(&bnum.to_le_bytes());
    }

    pub fn set_difficulty(&mut self, difficulty: u32) {
        self.bytes[DIFFICULTY..DIFFICULTY + 4].copy_from_slice(&difficulty.to_le_bytes());
    }

    fn field_32(&self, offset: usize) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&self.bytes[offset..offset + 32]);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_offsets_match_wire_layout() {
        let mut raw = [0u8; TRAILER_LEN];
        raw[0] = 0xAA; // phash[0]
        raw[32] = 0x01; // bnum[0]
        raw[56] = 18; // difficulty[0]
        raw[60] = 0xBB; // mroot[0]
        raw[92] = 0xCC; // nonce[0]
        let bt = BlockTrailer::from_bytes(raw);

        assert_eq!(bt.phash()[0], 0xAA);
        assert_eq!(bt.bnum()[0], 0x01);
        assert_eq!(bt.difficulty(), 18);
        assert_eq!(bt.mroot()[0], 0xBB);
        assert_eq!(bt.nonce()[0], 0xCC);
    }

    #[test]
    fn nonce_round_trip() {
        let mut bt = BlockTrailer::zeroed();
        let nonce: [u8; 32] = core::array::from_fn(|i| i as u8 + 1);
        bt.set_nonce(&nonce);
        assert_eq!(bt.nonce(), nonce);
        // The nonce occupies bytes 92..124 exactly.
        assert_eq!(bt.as_bytes()[91], 0);
        assert_eq!(bt.as_bytes()[92], 1);
        assert_eq!(bt.as_bytes()[123], 32);
        assert_eq!(bt.as_bytes()[124], 0);
    }

    #[test]
    fn difficulty_is_little_endian() {
        let mut bt = BlockTrailer::zeroed();
        bt.set_difficulty(0x0102_0304);
        assert_eq!(bt.as_bytes()[56], 0x04);
        assert_eq!(bt.difficulty(), 0x0102_0304);
    }
}
