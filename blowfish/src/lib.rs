pub mod crypto;

pub use crate::crypto::blowfish::{Blowfish, BLOCK_SIZE};
pub use crate::crypto::key_schedule::{derive_schedule, KeySchedule};
