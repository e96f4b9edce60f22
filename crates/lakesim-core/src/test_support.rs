//! Deterministic random source for tests that need to force specific rolls.

use std::collections::VecDeque;

use rand::RngCore;

/// Replays a fixed list of `u64` words, then repeats [`ScriptedRng::HALF`].
///
/// A word of `0` samples as `0.0` from `random::<f64>()`, so it passes any
/// positive probability check. [`ScriptedRng::HALF`] samples as `0.5`.
#[derive(Debug, Clone)]
pub(crate) struct ScriptedRng {
    script: VecDeque<u64>,
}

impl ScriptedRng {
    /// Word that samples as `0.5`.
    pub(crate) const HALF: u64 = 1 << 63;

    pub(crate) fn new(script: &[u64]) -> Self {
        Self {
            script: script.iter().copied().collect(),
        }
    }
}

impl RngCore for ScriptedRng {
    #[allow(clippy::cast_possible_truncation)]
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.script.pop_front().unwrap_or(Self::HALF)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            for (out, byte) in chunk.iter_mut().zip(bytes) {
                *out = byte;
            }
        }
    }
}
