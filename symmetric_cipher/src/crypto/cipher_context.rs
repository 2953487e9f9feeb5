use crate::crypto::cipher_io::{read_full, write_all};
use crate::crypto::cipher_traits::BlockCipher;
use crate::crypto::cipher_types::{CipherInput, CipherOutput, LengthError, PaddingMode};
use crate::crypto::utils::{apply_padding, remove_padding};
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::sync::Arc;

// Constants for optimized processing
const CHUNK_SIZE: usize = 1024 * 1024; // 1MB chunks for file processing
const OPTIMAL_PARALLELISM_THRESHOLD: usize = 4 * 1024 * 1024; // 4MB threshold for parallel processing

struct VecWriter<'a>(&'a mut Vec<u8>);
impl<'a> Write for VecWriter<'a> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.extend_from_slice(buf);
        Ok(buf.len())
    }
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Electronic-codebook driver over any [`BlockCipher`]: splits the input into
/// blocks, transforms each independently and reassembles the output. The
/// padding mode decides what happens to a final partial block; with
/// [`PaddingMode::None`] any misaligned input is rejected with a
/// [`LengthError`].
#[derive(Clone)]
pub struct CipherContext {
    algorithm: Arc<dyn BlockCipher + Send + Sync>,
    padding: PaddingMode,
}

impl CipherContext {
    pub fn new(algorithm: Box<dyn BlockCipher + Send + Sync>, padding: PaddingMode) -> Self {
        Self {
            algorithm: Arc::from(algorithm),
            padding,
        }
    }

    pub fn set_key(&mut self, key: &[u8]) -> Result<(), &'static str> {
        let alg = Arc::get_mut(&mut self.algorithm).ok_or("Failed to acquire mutable algorithm")?;
        alg.set_key(key)
    }

    pub fn block_size(&self) -> usize {
        self.algorithm.block_size()
    }

    fn check_aligned(&self, len: usize) -> Result<(), LengthError> {
        let block_size = self.algorithm.block_size();
        if len % block_size != 0 {
            return Err(LengthError { len, block_size });
        }
        Ok(())
    }

    // Block-parallel ECB pass; `data` must already be block-aligned.
    fn transform_blocks(&self, data: &[u8], encrypt: bool) -> Vec<u8> {
        let block_size = self.algorithm.block_size();

        let optimal_chunk_size = if data.len() > OPTIMAL_PARALLELISM_THRESHOLD {
            // Use larger chunks for big data to reduce threading overhead
            (data.len() / rayon::current_num_threads())
                .max(block_size)
                .min(CHUNK_SIZE)
                / block_size
                * block_size
        } else {
            block_size
        };

        data.par_chunks(optimal_chunk_size)
            .flat_map(|mega_chunk| {
                let mut result = Vec::with_capacity(mega_chunk.len());
                for block in mega_chunk.chunks(block_size) {
                    let processed = if encrypt {
                        self.algorithm.encrypt_block(block)
                    } else {
                        self.algorithm.decrypt_block(block)
                    };
                    result.extend(processed);
                }
                result
            })
            .collect()
    }

    // In-memory processing: pad (or reject) on encrypt, strip on decrypt.
    fn process_data(&self, data: &[u8], encrypt: bool) -> std::io::Result<Vec<u8>> {
        if encrypt {
            let padded = apply_padding(data.to_vec(), self.algorithm.block_size(), self.padding.clone());
            self.check_aligned(padded.len())?;
            Ok(self.transform_blocks(&padded, true))
        } else {
            self.check_aligned(data.len())?;
            let processed = self.transform_blocks(data, false);

            if matches!(self.padding, PaddingMode::None) || processed.is_empty() {
                return Ok(processed);
            }

            // Padding lives in the last block only
            let block_size = self.algorithm.block_size();
            let (prefix, last_block) = processed.split_at(processed.len() - block_size);
            let mut result = prefix.to_vec();
            result.extend(remove_padding(last_block.to_vec(), self.padding.clone()));
            Ok(result)
        }
    }

    // Streamed processing in bounded chunks. Encryption carries a sub-block
    // tail forward and pads it at end-of-stream; decryption holds the final
    // block back so its padding can be stripped.
    fn process_chunked<R: Read, W: Write>(
        &self,
        mut reader: R,
        mut writer: W,
        encrypt: bool,
    ) -> std::io::Result<()> {
        let block_size = self.algorithm.block_size();
        let mut buf = vec![0u8; CHUNK_SIZE];
        let mut carry: Vec<u8> = Vec::new();
        let mut total_len = 0usize;

        loop {
            let n = read_full(&mut reader, &mut buf)?;
            if n == 0 {
                break;
            }
            total_len += n;
            carry.extend_from_slice(&buf[..n]);

            // Hold back one block plus any misalignment on decrypt, only the
            // misalignment on encrypt.
            let hold = carry.len() % block_size + if encrypt { 0 } else { block_size };
            if carry.len() > hold {
                let ready: Vec<u8> = carry.drain(..carry.len() - hold).collect();
                writer.write_all(&self.transform_blocks(&ready, encrypt))?;
            }
        }

        if encrypt {
            let padded = apply_padding(carry, block_size, self.padding.clone());
            if padded.len() % block_size != 0 {
                return Err(LengthError {
                    len: total_len,
                    block_size,
                }
                .into());
            }
            if !padded.is_empty() {
                writer.write_all(&self.transform_blocks(&padded, true))?;
            }
        } else if !carry.is_empty() {
            if carry.len() % block_size != 0 {
                return Err(LengthError {
                    len: total_len,
                    block_size,
                }
                .into());
            }
            let last = self.transform_blocks(&carry, false);
            writer.write_all(&remove_padding(last, self.padding.clone()))?;
        }

        writer.flush()
    }

    // File processing task for Tokio runtime
    fn run_file_task<F, T>(task: F) -> std::io::Result<T>
    where
        F: FnOnce() -> std::io::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(tokio::task::spawn_blocking(task))
        })
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?
    }

    pub async fn encrypt(
        &self,
        input: CipherInput,
        output: &mut CipherOutput,
    ) -> std::io::Result<()> {
        self.run(input, output, true).await
    }

    pub async fn decrypt(
        &self,
        input: CipherInput,
        output: &mut CipherOutput,
    ) -> std::io::Result<()> {
        self.run(input, output, false).await
    }

    async fn run(
        &self,
        input: CipherInput,
        output: &mut CipherOutput,
        encrypt: bool,
    ) -> std::io::Result<()> {
        match (input, output) {
            (CipherInput::Bytes(data), out) => {
                let processed = self.process_data(&data, encrypt)?;
                write_all(out, &processed)
            }
            (CipherInput::File(input_path), CipherOutput::File(output_path)) => {
                let this = self.clone();
                let output_path = output_path.clone();
                Self::run_file_task(move || {
                    let reader = BufReader::new(File::open(input_path)?);
                    let writer = BufWriter::new(File::create(output_path)?);
                    this.process_chunked(reader, writer, encrypt)
                })
            }
            (CipherInput::File(input_path), CipherOutput::Buffer(buf)) => {
                let this = self.clone();
                let result = Self::run_file_task(move || {
                    let reader = BufReader::new(File::open(input_path)?);
                    let mut result = Vec::new();
                    {
                        let writer = VecWriter(&mut result);
                        this.process_chunked(reader, writer, encrypt)?;
                    }
                    Ok(result)
                })?;
                **buf = result;
                Ok(())
            }
        }
    }
}
