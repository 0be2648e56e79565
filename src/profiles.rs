//! Captured sub-GHz signal profiles.

use crate::config::{MAX_CAPTURE_PULSES, MAX_PROFILES};
use crate::error::StorageError;

/// A captured OOK pulse train and the frequency it was heard on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Profile {
    pub frequency_khz: u32,
    /// Pulse widths in microseconds, alternating high/low starting with high.
    pub pulses: heapless::Vec<u16, MAX_CAPTURE_PULSES>,
}

impl Profile {
    /// Copy a capture into a profile, truncating to capacity.
    pub fn new(frequency_khz: u32, pulses: &[u16]) -> Self {
        let len = pulses.len().min(MAX_CAPTURE_PULSES);
        let mut stored = heapless::Vec::new();
        // Cannot fail: `len` is clamped to the capacity.
        let _ = stored.extend_from_slice(&pulses[..len]);
        Self {
            frequency_khz,
            pulses: stored,
        }
    }

    /// Total on-air duration in microseconds.
    pub fn duration_us(&self) -> u32 {
        self.pulses.iter().map(|p| *p as u32).sum()
    }
}

/// Storage backend for profiles.
pub trait ProfileStore {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, index: usize) -> Option<&Profile>;

    /// Store a profile, returning its index.
    fn save(&mut self, profile: Profile) -> Result<usize, StorageError>;

    fn delete(&mut self, index: usize) -> Result<(), StorageError>;
}

/// RAM-backed store; contents are lost on reset.
#[derive(Default)]
pub struct MemoryProfileStore {
    profiles: heapless::Vec<Profile, MAX_PROFILES>,
}

impl MemoryProfileStore {
    pub const fn new() -> Self {
        Self {
            profiles: heapless::Vec::new(),
        }
    }
}

impl ProfileStore for MemoryProfileStore {
    fn len(&self) -> usize {
        self.profiles.len()
    }

    fn get(&self, index: usize) -> Option<&Profile> {
        self.profiles.get(index)
    }

    fn save(&mut self, profile: Profile) -> Result<usize, StorageError> {
        self.profiles.push(profile).map_err(|_| StorageError::Full)?;
        Ok(self.profiles.len() - 1)
    }

    fn delete(&mut self, index: usize) -> Result<(), StorageError> {
        if index >= self.profiles.len() {
            return Err(StorageError::NotFound);
        }
        self.profiles.remove(index);
        Ok(())
    }
}
