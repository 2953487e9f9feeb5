use std::sync::Arc;

use blowfish::Blowfish;
use hex_literal::hex;
use symmetric_cipher::crypto::cipher_context::CipherContext;
use symmetric_cipher::crypto::cipher_types::{
    CipherInput, CipherOutput, LengthError, PaddingMode,
};

#[test]
fn test_misaligned_input_is_rejected() {
    let cipher = Blowfish::new(b"TESTKEY");
    let err = cipher.ecb_encrypt(&[0u8; 7]).unwrap_err();
    assert_eq!(
        err,
        LengthError {
            len: 7,
            block_size: 8
        }
    );
    assert!(cipher.ecb_decrypt(&[0u8; 9]).is_err());
}

#[test]
fn test_aligned_inputs_keep_their_length() {
    let cipher = Blowfish::new(b"TESTKEY");
    for len in [0usize, 8, 16, 1024] {
        let plaintext = vec![0x77u8; len];
        let ciphertext = cipher.ecb_encrypt(&plaintext).unwrap();
        assert_eq!(ciphertext.len(), len);
        assert_eq!(cipher.ecb_decrypt(&ciphertext).unwrap(), plaintext);
    }
}

#[test]
fn test_encryption_is_deterministic() {
    let plaintext = b"fixed plaintext!".to_vec();
    let a = Blowfish::new(b"fixed secret").ecb_encrypt(&plaintext).unwrap();
    let b = Blowfish::new(b"fixed secret").ecb_encrypt(&plaintext).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_identical_blocks_encrypt_identically() {
    // the codebook has no chaining: equal plaintext blocks at different
    // offsets give bit-identical ciphertext blocks
    let mut plaintext = Vec::new();
    plaintext.extend_from_slice(&hex!("01 23 45 67 89 AB CD EF"));
    plaintext.extend_from_slice(&hex!("FF EE DD CC BB AA 99 88"));
    plaintext.extend_from_slice(&hex!("01 23 45 67 89 AB CD EF"));

    let ciphertext = Blowfish::new(b"ecb key").ecb_encrypt(&plaintext).unwrap();
    assert_eq!(ciphertext[0..8], ciphertext[16..24]);
    assert_ne!(ciphertext[0..8], ciphertext[8..16]);
}

#[test]
fn test_shared_cipher_across_threads() {
    // a finished schedule is read-only, so one cipher may serve many threads
    let cipher = Arc::new(Blowfish::new(b"shared key"));
    let expected = cipher.ecb_encrypt(&[0xAB; 80]).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let cipher = Arc::clone(&cipher);
            std::thread::spawn(move || cipher.ecb_encrypt(&[0xAB; 80]).unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[tokio::test]
async fn test_context_rejects_misaligned_bytes_without_padding() {
    let ctx = CipherContext::new(Box::new(Blowfish::new(b"ctx key")), PaddingMode::None);

    let mut output = CipherOutput::Buffer(Box::new(Vec::new()));
    let err = ctx
        .encrypt(CipherInput::Bytes(vec![0u8; 7]), &mut output)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
}

#[tokio::test]
async fn test_context_roundtrip_with_padding() {
    let ctx = CipherContext::new(Box::new(Blowfish::new(b"ctx key")), PaddingMode::PKCS7);
    let plaintext = b"three and a half blocks of text....".to_vec();

    let mut encrypted = CipherOutput::Buffer(Box::new(Vec::new()));
    ctx.encrypt(CipherInput::Bytes(plaintext.clone()), &mut encrypted)
        .await
        .unwrap();
    let ciphertext = match encrypted {
        CipherOutput::Buffer(buf) => *buf,
        _ => unreachable!(),
    };
    assert_eq!(ciphertext.len() % 8, 0);
    assert_ne!(ciphertext, plaintext);

    let mut decrypted = CipherOutput::Buffer(Box::new(Vec::new()));
    ctx.decrypt(CipherInput::Bytes(ciphertext), &mut decrypted)
        .await
        .unwrap();
    match decrypted {
        CipherOutput::Buffer(buf) => assert_eq!(*buf, plaintext),
        _ => unreachable!(),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_context_file_roundtrip() {
    use std::io::Write;

    let mut input_file = tempfile::NamedTempFile::new().unwrap();
    let plaintext: Vec<u8> = (0..100_000u32).flat_map(|i| i.to_be_bytes()).collect();
    input_file.write_all(&plaintext).unwrap();
    let input_path = input_file.path().to_string_lossy().into_owned();

    let encrypted_file = tempfile::NamedTempFile::new().unwrap();
    let encrypted_path = encrypted_file.path().to_string_lossy().into_owned();

    let ctx = CipherContext::new(Box::new(Blowfish::new(b"file key")), PaddingMode::ANSI_X923);
    ctx.encrypt(
        CipherInput::File(input_path),
        &mut CipherOutput::File(encrypted_path.clone()),
    )
    .await
    .unwrap();

    let mut decrypted = CipherOutput::Buffer(Box::new(Vec::new()));
    ctx.decrypt(CipherInput::File(encrypted_path), &mut decrypted)
        .await
        .unwrap();
    match decrypted {
        CipherOutput::Buffer(buf) => assert_eq!(*buf, plaintext),
        _ => unreachable!(),
    }
}
