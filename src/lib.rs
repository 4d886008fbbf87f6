//! Trigg and Peach proof-of-work cores.
//!
//! Trigg constrains nonces to syntactically valid English haiku drawn
//! from a semantic grammar; Peach layers a memory-hard traversal of a
//! 1 GiB deterministic tile map on top of the same nonce rules.

pub mod dict;
pub mod hashes;
pub mod mining;
pub mod nighthash;
pub mod peach;
pub mod trailer;
pub mod trigg;

pub use peach::{Peach, PowError};
pub use trailer::BlockTrailer;
pub use trigg::{HaikuRng, Trigg};
