use crate::crypto::f_function::encrypt_halves;
use crate::crypto::pi_tables::{P_INIT, S_INIT};

/// Subkey words in a schedule: one per round plus two whitening keys.
pub const SUBKEY_COUNT: usize = 18;
/// Substitution boxes per schedule.
pub const SBOX_COUNT: usize = 4;
/// Entries per substitution box, one per byte value.
pub const SBOX_ENTRIES: usize = 256;

/// Secret-dependent cipher state: the subkey array and the four S-boxes.
/// Immutable once derived, so one schedule can back any number of concurrent
/// block operations.
#[derive(Clone, PartialEq, Eq)]
pub struct KeySchedule {
    pub(crate) subkeys: [u32; SUBKEY_COUNT],
    pub(crate) sboxes: [[u32; SBOX_ENTRIES]; SBOX_COUNT],
}

impl KeySchedule {
    pub fn subkeys(&self) -> &[u32; SUBKEY_COUNT] {
        &self.subkeys
    }

    pub fn sboxes(&self) -> &[[u32; SBOX_ENTRIES]; SBOX_COUNT] {
        &self.sboxes
    }
}

/// Derives a schedule from a secret of any length; an empty secret behaves
/// as an all-zero repeating key.
///
/// The pi tables are copied, the subkey words are XORed with big-endian
/// 32-bit chunks cycled from the secret, and then an all-zero block is
/// repeatedly encrypted with the evolving tables, each output overwriting
/// the next two words: first the 18 subkeys, then all 1024 S-box entries,
/// one continuous chain of 1042 replacements.
pub fn derive_schedule(secret: &[u8]) -> KeySchedule {
    let mut subkeys = P_INIT;
    let mut sboxes = S_INIT;

    if !secret.is_empty() {
        let mut pos = 0;
        for word in subkeys.iter_mut() {
            let mut chunk = 0u32;
            for _ in 0..4 {
                chunk = (chunk << 8) | secret[pos] as u32;
                pos = (pos + 1) % secret.len();
            }
            *word ^= chunk;
        }
    }

    let (mut left, mut right) = (0u32, 0u32);
    for i in (0..SUBKEY_COUNT).step_by(2) {
        (left, right) = encrypt_halves(&subkeys, &sboxes, left, right);
        subkeys[i] = left;
        subkeys[i + 1] = right;
    }
    for sbox in 0..SBOX_COUNT {
        for i in (0..SBOX_ENTRIES).step_by(2) {
            (left, right) = encrypt_halves(&subkeys, &sboxes, left, right);
            sboxes[sbox][i] = left;
            sboxes[sbox][i + 1] = right;
        }
    }

    KeySchedule { subkeys, sboxes }
}
