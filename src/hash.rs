//! Key Hashing Module
//!
//! Turns application identifiers into the fixed-width keys stored by the
//! engine. The engine never looks inside an [`OpaqueKey`]; any deterministic,
//! well distributed [`KeyHasher`] can be plugged in.

use std::fmt;
use std::hash::Hasher;

use twox_hash::XxHash64;

// == Opaque Key ==
/// 128-bit key produced from an application identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OpaqueKey(pub u128);

impl fmt::Display for OpaqueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

// == Key Hasher ==
/// Deterministic mapping from identifier bytes to an [`OpaqueKey`].
pub trait KeyHasher: Send + Sync {
    fn hash_key(&self, id: &[u8]) -> OpaqueKey;
}

impl<F> KeyHasher for F
where
    F: Fn(&[u8]) -> OpaqueKey + Send + Sync,
{
    fn hash_key(&self, id: &[u8]) -> OpaqueKey {
        self(id)
    }
}

/// Default hasher: two independently seeded XxHash64 passes form the low and
/// high halves of the key.
#[derive(Debug, Default, Clone, Copy)]
pub struct XxKeyHasher;

const LOW_SEED: u64 = 0;
const HIGH_SEED: u64 = 1;

impl KeyHasher for XxKeyHasher {
    fn hash_key(&self, id: &[u8]) -> OpaqueKey {
        let low = xx64(LOW_SEED, id);
        let high = xx64(HIGH_SEED, id);
        OpaqueKey(((high as u128) << 64) | low as u128)
    }
}

fn xx64(seed: u64, bytes: &[u8]) -> u64 {
    let mut hasher = XxHash64::with_seed(seed);
    hasher.write(bytes);
    hasher.finish()
}
