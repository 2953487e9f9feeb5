use crate::crypto::f_function::{decrypt_halves, encrypt_halves};
use crate::crypto::key_schedule::{derive_schedule, KeySchedule};
use symmetric_cipher::crypto::cipher_traits::{BlockCipher, CipherAlgorithm, SymmetricCipher};
use symmetric_cipher::crypto::cipher_types::LengthError;

/// Block width in bytes.
pub const BLOCK_SIZE: usize = 8;

/// 64-bit Feistel cipher over a pi-seeded key schedule.
#[derive(Clone)]
pub struct Blowfish {
    schedule: KeySchedule,
}

impl Blowfish {
    /// Derives a fresh schedule from the secret. Any byte sequence is a
    /// valid secret, including an empty one.
    pub fn new(secret: &[u8]) -> Self {
        Blowfish {
            schedule: derive_schedule(secret),
        }
    }

    /// Wraps an already-derived schedule.
    pub fn with_schedule(schedule: KeySchedule) -> Self {
        Blowfish { schedule }
    }

    pub fn schedule(&self) -> &KeySchedule {
        &self.schedule
    }

    /// Encrypt one 64-bit block via 16-round Feistel.
    fn feistel_encrypt_block_u64(&self, block: u64) -> u64 {
        let (left, right) = encrypt_halves(
            &self.schedule.subkeys,
            &self.schedule.sboxes,
            (block >> 32) as u32,
            block as u32,
        );
        ((left as u64) << 32) | right as u64
    }

    /// Decrypt one 64-bit block via 16-round Feistel.
    fn feistel_decrypt_block_u64(&self, block: u64) -> u64 {
        let (left, right) = decrypt_halves(
            &self.schedule.subkeys,
            &self.schedule.sboxes,
            (block >> 32) as u32,
            block as u32,
        );
        ((left as u64) << 32) | right as u64
    }

    /// Encrypts exactly one block; big-endian halves, like the key chunking.
    pub fn encrypt_block(&self, block: [u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE] {
        self.feistel_encrypt_block_u64(u64::from_be_bytes(block))
            .to_be_bytes()
    }

    /// Decrypts exactly one block.
    pub fn decrypt_block(&self, block: [u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE] {
        self.feistel_decrypt_block_u64(u64::from_be_bytes(block))
            .to_be_bytes()
    }

    /// Raw codebook encryption: every 8-byte chunk is transformed on its own,
    /// so equal plaintext blocks give equal ciphertext blocks. No padding is
    /// applied; input whose length is not a multiple of 8 is rejected.
    pub fn ecb_encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, LengthError> {
        if plaintext.len() % BLOCK_SIZE != 0 {
            return Err(LengthError {
                len: plaintext.len(),
                block_size: BLOCK_SIZE,
            });
        }
        Ok(plaintext
            .chunks_exact(BLOCK_SIZE)
            .flat_map(|chunk| {
                let blk = u64::from_be_bytes(chunk.try_into().unwrap());
                self.feistel_encrypt_block_u64(blk).to_be_bytes()
            })
            .collect())
    }

    /// Inverse of [`Blowfish::ecb_encrypt`], with the same length contract.
    pub fn ecb_decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, LengthError> {
        if ciphertext.len() % BLOCK_SIZE != 0 {
            return Err(LengthError {
                len: ciphertext.len(),
                block_size: BLOCK_SIZE,
            });
        }
        Ok(ciphertext
            .chunks_exact(BLOCK_SIZE)
            .flat_map(|chunk| {
                let blk = u64::from_be_bytes(chunk.try_into().unwrap());
                self.feistel_decrypt_block_u64(blk).to_be_bytes()
            })
            .collect())
    }
}

impl CipherAlgorithm for Blowfish {
    fn encrypt(&self, data: &[u8]) -> Vec<u8> {
        assert_eq!(data.len() % BLOCK_SIZE, 0, "Data length must be multiple of 8");
        data.chunks_exact(BLOCK_SIZE)
            .flat_map(|chunk| {
                let blk = u64::from_be_bytes(chunk.try_into().unwrap());
                self.feistel_encrypt_block_u64(blk).to_be_bytes()
            })
            .collect()
    }

    fn decrypt(&self, data: &[u8]) -> Vec<u8> {
        assert_eq!(data.len() % BLOCK_SIZE, 0, "Data length must be multiple of 8");
        data.chunks_exact(BLOCK_SIZE)
            .flat_map(|chunk| {
                let blk = u64::from_be_bytes(chunk.try_into().unwrap());
                self.feistel_decrypt_block_u64(blk).to_be_bytes()
            })
            .collect()
    }
}

impl SymmetricCipher for Blowfish {
    fn set_key(&mut self, secret: &[u8]) -> Result<(), &'static str> {
        self.schedule = derive_schedule(secret);
        Ok(())
    }
}

impl BlockCipher for Blowfish {
    fn block_size(&self) -> usize {
        BLOCK_SIZE
    }

    fn encrypt_block(&self, block: &[u8]) -> Vec<u8> {
        let blk = u64::from_be_bytes(block.try_into().expect("block must be 8 bytes"));
        self.feistel_encrypt_block_u64(blk).to_be_bytes().to_vec()
    }

    fn decrypt_block(&self, block: &[u8]) -> Vec<u8> {
        let blk = u64::from_be_bytes(block.try_into().expect("block must be 8 bytes"));
        self.feistel_decrypt_block_u64(blk).to_be_bytes().to_vec()
    }
}
