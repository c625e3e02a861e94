use std::{
    fmt,
    str::FromStr,
    sync::atomic::{AtomicU32, Ordering},
    time::{SystemTime, UNIX_EPOCH},
};

use once_cell::sync::Lazy;
use thiserror::Error;

const ID_BYTES: usize = 12;
const HEX_LEN: usize = ID_BYTES * 2;

/// Random value fixed for the lifetime of the process.
static PROCESS_UNIQUE: Lazy<[u8; 5]> = Lazy::new(rand::random);

/// Seeded in the lower half of the 24-bit range so at least 2^23 ids are
/// generated before the counter wraps.
static COUNTER: Lazy<AtomicU32> =
    Lazy::new(|| AtomicU32::new(rand::random::<u32>() & COUNTER_SEED_MASK));

const COUNTER_MASK: u32 = 0x00ff_ffff;
const COUNTER_SEED_MASK: u32 = 0x007f_ffff;

/// Twelve-byte record key: 4-byte big-endian seconds, 5 process-random bytes,
/// 3-byte wrapping counter.
///
/// Ids generated by one process sort in generation order until the counter
/// wraps within a single second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId([u8; ID_BYTES]);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{input}' is not a valid object id: expected {HEX_LEN} hex characters")]
pub struct InvalidObjectId {
    pub input: String,
}

impl ObjectId {
    /// Generate a fresh id.
    pub fn new() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as u32)
            .unwrap_or_default();
        let count = COUNTER.fetch_add(1, Ordering::Relaxed) & COUNTER_MASK;

        let mut bytes = [0u8; ID_BYTES];
        bytes[..4].copy_from_slice(&secs.to_be_bytes());
        bytes[4..9].copy_from_slice(&*PROCESS_UNIQUE);
        bytes[9..].copy_from_slice(&count.to_be_bytes()[1..]);
        Self(bytes)
    }

    /// Validate a client-supplied identifier.
    pub fn parse(input: &str) -> Result<Self, InvalidObjectId> {
        let invalid = || InvalidObjectId {
            input: input.to_string(),
        };

        if input.len() != HEX_LEN {
            return Err(invalid());
        }

        let mut bytes = [0u8; ID_BYTES];
        hex::decode_to_slice(input, &mut bytes).map_err(|_| invalid())?;
        Ok(Self(bytes))
    }

    pub fn bytes(&self) -> [u8; ID_BYTES] {
        self.0
    }

    /// Seconds since the epoch at which the id was generated.
    pub fn timestamp(&self) -> u32 {
        u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for ObjectId {
    type Err = InvalidObjectId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
