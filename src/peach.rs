//! The Peach algorithm: memory-hard proof of work over a 1 GiB tile map.
//!
//! The map is 1 048 576 tiles of 1 KiB, each deterministically derived
//! from the previous block hash. A solver keeps the map plus a presence
//! bitmap so every tile is generated at most once; a verifier regenerates
//! only the 9 tiles a candidate nonce actually visits.

use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::nighthash::{nighthash, nighthash_tx};
use crate::trailer::BlockTrailer;
use crate::trigg::{self, HaikuRng};

/// Tile size in bytes.
pub const TILE_LEN: usize = 1024;
/// Number of tiles on the map.
pub const MAP_TILES: usize = 1 << 20;
/// Full map size: 1 GiB.
pub const MAP_LEN: usize = MAP_TILES * TILE_LEN;

/// 32-byte rows per tile.
const TILE_ROWS: usize = TILE_LEN / 32;
/// Jumps per traversal.
const JUMP_COUNT: usize = 8;
/// Tile-generation seed: index (LE u32) ‖ phash.
const GEN_SEED_LEN: usize = 4 + 32;
/// Index-jump seed: nonce ‖ index (LE u32) ‖ tile.
const JUMP_SEED_LEN: usize = 32 + 4 + TILE_LEN;

const INDEX_MASK: u32 = MAP_TILES as u32 - 1;

/// Errors surfaced by the Peach solver.
#[derive(Debug, Error)]
pub enum PowError {
    /// The 1 GiB map or its presence bitmap could not be acquired.
    #[error("failed to allocate the tile map: {0}")]
    MapAllocation(String),
}

/// Deterministically generate the tile at `index` for a previous block
/// hash. The 36-byte seed feeds a transforming nighthash for the first
/// row; each later row is a transforming nighthash over the row before
/// it, which also rewrites that earlier row in place. The stored tile is
/// therefore the transformed chain, not the raw digests.
pub fn generate_tile(phash: &[u8; 32], index: u32, tile: &mut [u8]) {
    debug_assert_eq!(tile.len(), TILE_LEN);

    let mut seed = [0u8; GEN_SEED_LEN];
    seed[..4].copy_from_slice(&index.to_le_bytes());
    seed[4..].copy_from_slice(phash);
    let first = nighthash_tx(&mut seed, index, false);
    tile[..32].copy_from_slice(&first);

    for row in 1..TILE_ROWS {
        let (head, tail) = tile[(row - 1) * 32..].split_at_mut(32);
        let digest = nighthash_tx(head, index, true);
        tail[..32].copy_from_slice(&digest);
    }
}

/// Map (current tile, nonce) to the next tile index.
pub fn next_index(index: u32, tile: &[u8], nonce: &[u8; 32]) -> u32 {
    debug_assert_eq!(tile.len(), TILE_LEN);

    let mut seed = [0u8; JUMP_SEED_LEN];
    seed[..32].copy_from_slice(nonce);
    seed[32..36].copy_from_slice(&index.to_le_bytes());
    seed[36..].copy_from_slice(tile);

    let hash = nighthash(&seed, index, false);
    let mut sum = 0u32;
    for lane in hash.chunks_exact(4) {
        sum = sum.wrapping_add(u32::from_le_bytes([lane[0], lane[1], lane[2], lane[3]]));
    }
    sum & INDEX_MASK
}

/// Fold a trailer hash into the starting tile index by 32-bit wrapping
/// multiplication over its bytes. The fold collapses to zero whenever a
/// late byte is zero; that bias is part of the wire protocol.
fn start_index(bt_hash: &[u8; 32]) -> u32 {
    let mut index = u32::from(bt_hash[0]);
    for &byte in &bt_hash[1..] {
        index = index.wrapping_mul(u32::from(byte));
    }
    index & INDEX_MASK
}

/// One bit of presence per tile.
struct TileBitmap {
    words: Vec<u64>,
}

impl TileBitmap {
    fn try_new() -> Result<Self, PowError> {
        let mut words = Vec::new();
        words
            .try_reserve_exact(MAP_TILES / 64)
            .map_err(|e| PowError::MapAllocation(e.to_string()))?;
        words.resize(MAP_TILES / 64, 0);
        Ok(Self { words })
    }

    fn contains(&self, index: u32) -> bool {
        let index = index as usize;
        self.words[index / 64] & (1u64 << (index % 64)) != 0
    }

    fn insert(&mut self, index: u32) {
        let index = index as usize;
        self.words[index / 64] |= 1u64 << (index % 64);
    }

    fn clear(&mut self) {
        self.words.fill(0);
    }
}

/// Tile storage for one traversal: a solver's cached map, or a verifier's
/// single scratch tile.
enum TileStore {
    Mapped { map: Vec<u8>, present: TileBitmap },
    Scratch { tile: Box<[u8; TILE_LEN]> },
}

impl TileStore {
    fn scratch() -> Self {
        TileStore::Scratch { tile: Box::new([0u8; TILE_LEN]) }
    }

    /// Return the tile at `index`, generating it on first touch. Cached
    /// tiles are returned as-is; regeneration is deterministic, so a
    /// repeated fill would write identical bytes.
    fn fetch(&mut self, phash: &[u8; 32], index: u32) -> &[u8] {
        match self {
            TileStore::Mapped { map, present } => {
                let start = index as usize * TILE_LEN;
                if !present.contains(index) {
                    generate_tile(phash, index, &mut map[start..start + TILE_LEN]);
                    present.insert(index);
                }
                &map[start..start + TILE_LEN]
            }
            TileStore::Scratch { tile } => {
                generate_tile(phash, index, tile.as_mut_slice());
                tile.as_slice()
            }
        }
    }
}

/// Walk the map: start tile from the trailer hash, eight index jumps,
/// then SHA-256 over `bt_hash ‖ final tile`.
fn traverse(
    tiles: &mut TileStore,
    phash: &[u8; 32],
    nonce: &[u8; 32],
    bt_hash: &[u8; 32],
) -> [u8; 32] {
    let mut index = start_index(bt_hash);
    for _ in 0..JUMP_COUNT {
        let tile = tiles.fetch(phash, index);
        index = next_index(index, tile, nonce);
    }
    let tile = tiles.fetch(phash, index);

    let mut hasher = Sha256::new();
    hasher.update(bt_hash);
    hasher.update(tile);
    hasher.finalize().into()
}

/// Mining context for the Peach algorithm. Owns the tile map and presence
/// bitmap for the lifetime of one block attempt; dropping the context
/// releases both.
pub struct Peach<'bt> {
    bt: &'bt BlockTrailer,
    phash: [u8; 32],
    tiles: TileStore,
    nonce: [u8; 32],
    diff: u32,
    rng: HaikuRng,
}

impl<'bt> Peach<'bt> {
    /// Prepare a solver context: acquire and zero the map and bitmap,
    /// record the trailer, and draw the initial haiku. Fails cleanly when
    /// the map cannot be acquired, leaving no partial state behind.
    pub fn solve(bt: &'bt BlockTrailer, mut rng: HaikuRng) -> Result<Self, PowError> {
        let tiles = acquire_map()?;
        let mut nonce = [0u8; 32];
        nonce[16..].copy_from_slice(&trigg::generate_tokens(&mut rng));
        Ok(Self {
            bt,
            phash: bt.phash(),
            tiles,
            nonce,
            diff: bt.difficulty(),
            rng,
        })
    }

    /// Attempt one nonce: advance the rolling haiku pair, walk the map,
    /// and return the nonce when the final hash meets the difficulty.
    pub fn generate(&mut self) -> Option<[u8; 32]> {
        self.nonce.copy_within(16.., 0);
        let fresh = trigg::generate_tokens(&mut self.rng);
        self.nonce[16..].copy_from_slice(&fresh);

        let mut hasher = Sha256::new();
        hasher.update(&self.bt.as_bytes()[..92]);
        hasher.update(self.nonce);
        let bt_hash: [u8; 32] = hasher.finalize().into();

        let hash = traverse(&mut self.tiles, &self.phash, &self.nonce, &bt_hash);
        if !trigg::eval(&hash, self.diff & 0xFF) {
            return None;
        }
        Some(self.nonce)
    }

    /// Recompute the final traversal hash for a trailer's nonce without a
    /// map, or `None` when either haiku fails the syntax check.
    pub fn pow_hash(bt: &BlockTrailer) -> Option<[u8; 32]> {
        let nonce = bt.nonce();
        let mut primary = [0u8; 16];
        let mut secondary = [0u8; 16];
        primary.copy_from_slice(&nonce[..16]);
        secondary.copy_from_slice(&nonce[16..]);
        if !trigg::syntax(&primary) || !trigg::syntax(&secondary) {
            return None;
        }

        // The trailer through the nonce field; the nonce occupies bytes
        // 92..124, so this equals the generate-side split.
        let mut hasher = Sha256::new();
        hasher.update(&bt.as_bytes()[..124]);
        let bt_hash: [u8; 32] = hasher.finalize().into();

        let mut tiles = TileStore::scratch();
        Some(traverse(&mut tiles, &bt.phash(), &nonce, &bt_hash))
    }

    /// The Peach proof-of-work predicate.
    pub fn check(bt: &BlockTrailer) -> bool {
        Self::pow_hash(bt).is_some_and(|hash| trigg::eval(&hash, bt.difficulty() & 0xFF))
    }
}

#[cfg(not(feature = "static-map"))]
fn acquire_map() -> Result<TileStore, PowError> {
    let map = alloc_zeroed(MAP_LEN)?;
    let present = TileBitmap::try_new()?;
    Ok(TileStore::Mapped { map, present })
}

#[cfg(not(feature = "static-map"))]
fn alloc_zeroed(len: usize) -> Result<Vec<u8>, PowError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|e| PowError::MapAllocation(e.to_string()))?;
    buf.resize(len, 0);
    Ok(buf)
}

#[cfg(feature = "static-map")]
mod static_map {
    //! A process-global map pool: the buffers are allocated once and
    //! recycled across solver contexts. Only one context may hold them at
    //! a time, mirroring a fixed pre-allocated build.

    use std::sync::Mutex;

    use super::{PowError, TileBitmap, TileStore, MAP_LEN};

    enum Pool {
        Unallocated,
        Free { map: Vec<u8>, present: TileBitmap },
        Claimed,
    }

    static POOL: Mutex<Pool> = Mutex::new(Pool::Unallocated);

    pub(super) fn acquire() -> Result<TileStore, PowError> {
        let mut pool = POOL.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        match std::mem::replace(&mut *pool, Pool::Claimed) {
            Pool::Unallocated => {
                let mut map = Vec::new();
                if let Err(e) = map.try_reserve_exact(MAP_LEN) {
                    *pool = Pool::Unallocated;
                    return Err(PowError::MapAllocation(e.to_string()));
                }
                map.resize(MAP_LEN, 0);
                match TileBitmap::try_new() {
                    Ok(present) => Ok(TileStore::Mapped { map, present }),
                    Err(e) => {
                        *pool = Pool::Unallocated;
                        Err(e)
                    }
                }
            }
            Pool::Free { mut map, mut present } => {
                map.fill(0);
                present.clear();
                Ok(TileStore::Mapped { map, present })
            }
            Pool::Claimed => {
                *pool = Pool::Claimed;
                Err(PowError::MapAllocation(
                    "static map already claimed by another context".into(),
                ))
            }
        }
    }

    pub(super) fn release(map: Vec<u8>, present: TileBitmap) {
        let mut pool = POOL.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *pool = Pool::Free { map, present };
    }
}

#[cfg(feature = "static-map")]
fn acquire_map() -> Result<TileStore, PowError> {
    static_map::acquire()
}

#[cfg(feature = "static-map")]
impl Drop for Peach<'_> {
    fn drop(&mut self) {
        let store = std::mem::replace(&mut self.tiles, TileStore::scratch());
        if let TileStore::Mapped { map, present } = store {
            static_map::release(map, present);
        }
    }
}
