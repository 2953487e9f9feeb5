use thiserror::Error;

#[derive(Clone, Debug)]
pub enum CipherInput {
    Bytes(Vec<u8>),
    File(String),
}

#[derive(Debug)]
pub enum CipherOutput {
    Buffer(Box<Vec<u8>>),
    File(String),
}

/// How the final partial block is handled. `None` keeps the raw block-mode
/// contract: input whose length is not a multiple of the block size is
/// rejected with [`LengthError`].
#[allow(non_camel_case_types)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PaddingMode {
    None,
    Zeros,
    ANSI_X923,
    PKCS7,
    ISO10126,
}

/// The only error this crate signals: a buffer that cannot be split into
/// whole blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("input length {len} is not a multiple of the {block_size}-byte block size")]
pub struct LengthError {
    pub len: usize,
    pub block_size: usize,
}

impl From<LengthError> for std::io::Error {
    fn from(err: LengthError) -> Self {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, err)
    }
}
