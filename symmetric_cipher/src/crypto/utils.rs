use crate::crypto::cipher_types::PaddingMode;
use rand::TryRngCore;
use rand::rngs::OsRng;

pub fn apply_padding(mut data: Vec<u8>, block_size: usize, padding: PaddingMode) -> Vec<u8> {
    if matches!(padding, PaddingMode::None) {
        return data;
    }

    // PKCS7-family padding is always present, so aligned input still gets a
    // full padding block; Zeros only tops up a short tail.
    let padding_length = if data.len() % block_size == 0 {
        match padding {
            PaddingMode::PKCS7 | PaddingMode::ANSI_X923 | PaddingMode::ISO10126 => block_size,
            _ => 0,
        }
    } else {
        block_size - (data.len() % block_size)
    };

    if padding_length == 0 {
        return data;
    }

    match padding {
        PaddingMode::None => unreachable!(),
        PaddingMode::Zeros => data.extend(vec![0; padding_length]),
        PaddingMode::ANSI_X923 => {
            data.extend(vec![0; padding_length - 1]);
            data.push(padding_length as u8);
        }
        PaddingMode::PKCS7 => {
            data.extend(vec![padding_length as u8; padding_length]);
        }
        PaddingMode::ISO10126 => {
            let mut rng = OsRng;
            let mut padding = vec![0u8; padding_length - 1];
            rng.try_fill_bytes(&mut padding)
                .expect("Failed to fill ISO10126 padding");
            data.extend(padding.into_iter());
            data.push(padding_length as u8);
        }
    }
    data
}

pub fn is_full_padding_block(data: &[u8], block_size: usize, padding: &PaddingMode) -> bool {
    if data.len() != block_size {
        return false;
    }

    match padding {
        PaddingMode::PKCS7 => {
            let pad_len = data[block_size - 1] as usize;
            pad_len == block_size && data.iter().all(|&b| b == pad_len as u8)
        }
        PaddingMode::ANSI_X923 => {
            let pad_len = data[block_size - 1] as usize;
            pad_len == block_size && data[..block_size - 1].iter().all(|&b| b == 0)
        }
        PaddingMode::ISO10126 => {
            let pad_len = data[block_size - 1] as usize;
            pad_len == block_size // остальное может быть любым
        }
        _ => false,
    }
}

pub fn remove_padding(mut data: Vec<u8>, padding: PaddingMode) -> Vec<u8> {
    let block_size = data.len();
    if is_full_padding_block(&data, block_size, &padding) {
        return Vec::new();
    }

    match padding {
        PaddingMode::None => {}
        PaddingMode::Zeros => {
            while data.last() == Some(&0u8) {
                data.pop();
            }
        }
        PaddingMode::PKCS7 => {
            if let Some(&last_byte) = data.last() {
                let pad_len = last_byte as usize;
                if pad_len == 0 || pad_len > block_size || pad_len > data.len() {
                    return data;
                }
                if data[data.len() - pad_len..].iter().all(|&b| b == last_byte) {
                    data.truncate(data.len() - pad_len);
                }
            }
        }
        PaddingMode::ANSI_X923 => {
            if let Some(&last_byte) = data.last() {
                let pad_len = last_byte as usize;
                if pad_len == 0 || pad_len > block_size || pad_len > data.len() {
                    return data;
                }
                let pad_region = &data[data.len() - pad_len..data.len() - 1];
                if pad_region.iter().all(|&b| b == 0) {
                    data.truncate(data.len() - pad_len);
                }
            }
        }
        PaddingMode::ISO10126 => {
            if let Some(&last_byte) = data.last() {
                let pad_len = last_byte as usize;
                if pad_len == 0 || pad_len > block_size || pad_len > data.len() {
                    return data;
                }
                data.truncate(data.len() - pad_len);
            }
        }
    }

    data
}
