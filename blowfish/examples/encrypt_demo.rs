use std::fs;
use std::sync::Arc;

use rand::SeedableRng;
use rand::{rngs::StdRng, RngCore};

use blowfish::crypto::f_function::round_function;
use blowfish::crypto::key_schedule::derive_schedule;
use blowfish::crypto::pi_tables::{P_INIT, S_INIT};
use blowfish::Blowfish;

use symmetric_cipher::crypto::cipher_context::CipherContext;
use symmetric_cipher::crypto::cipher_types::{CipherInput, CipherOutput, PaddingMode};

fn random_key(len: usize, rng: &mut impl RngCore) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    rng.fill_bytes(&mut buf);
    buf
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> std::io::Result<()> {
    // --------------------------------------------------------
    // 0) Key schedule & single-block demo
    // --------------------------------------------------------
    println!("=== Key schedule & single-block demo ===");
    let secret = b"TESTKEY";
    let schedule = derive_schedule(secret);
    println!(" Initial subkey word:  0x{:08x}", P_INIT[0]);
    println!(" Derived subkey word:  0x{:08x}", schedule.subkeys()[0]);
    println!(" Subkeys: {}, S-box entries: {}", schedule.subkeys().len(), 4 * 256);

    let cipher = Blowfish::with_schedule(schedule);
    let block = *b"8 BYTES!";
    let encrypted = cipher.encrypt_block(block);
    let decrypted = cipher.decrypt_block(encrypted);
    println!(" Plaintext block: {:02x?}", block);
    println!(" Encrypted block: {:02x?}", encrypted);
    println!(" Decrypted block: {:02x?}", decrypted);
    assert_eq!(decrypted, block);

    // --------------------------------------------------------
    // 1) Round-function demo
    // --------------------------------------------------------
    println!("\n=== Round function demo ===");
    for &x in &[0x00000000u32, 0x01234567, 0x89ABCDEF, 0xFFFFFFFF] {
        println!("  F(0x{:08x}) = 0x{:08x}", x, round_function(x, &S_INIT));
    }

    // --------------------------------------------------------
    // 2) Published test vectors
    // --------------------------------------------------------
    println!("\n=== Test vectors verification ===");
    let vectors: [([u8; 8], [u8; 8], [u8; 8]); 3] = [
        (
            [0x00; 8],
            [0x00; 8],
            [0x4E, 0xF9, 0x97, 0x45, 0x61, 0x98, 0xDD, 0x78],
        ),
        (
            [0xFF; 8],
            [0xFF; 8],
            [0x51, 0x86, 0x6F, 0xD5, 0xB8, 0x5E, 0xCB, 0x8A],
        ),
        (
            [0x7C, 0xA1, 0x10, 0x45, 0x4A, 0x1A, 0x6E, 0x57],
            [0x01, 0xA1, 0xD6, 0xD0, 0x39, 0x77, 0x67, 0x42],
            [0x59, 0xC6, 0x82, 0x45, 0xEB, 0x05, 0x28, 0x2B],
        ),
    ];
    for (key, plaintext, expected) in vectors {
        let result = Blowfish::new(&key).encrypt_block(plaintext);
        println!(
            " key {:02x?}: {:?}",
            key,
            result == expected
        );
    }

    // --------------------------------------------------------
    // 3) Strict codebook transform
    // --------------------------------------------------------
    println!("\n=== Strict ECB ===");
    let cipher = Blowfish::new(b"demo secret");
    let aligned = b"exactly sixteen!";
    let ciphertext = cipher.ecb_encrypt(aligned).expect("aligned input");
    println!(" {} plaintext bytes -> {} ciphertext bytes", aligned.len(), ciphertext.len());
    match cipher.ecb_encrypt(b"seven b") {
        Err(err) => println!(" 7-byte input rejected: {err}"),
        Ok(_) => unreachable!(),
    }

    // --------------------------------------------------------
    // 4) Arbitrary-length data through the cipher context
    // --------------------------------------------------------
    println!("\n=== Cipher context demo ===");
    let mut rng = StdRng::seed_from_u64(42);
    let key = random_key(24, &mut rng);

    let mut message = vec![0u8; 1_000_003];
    rng.fill_bytes(&mut message);

    let ctx = CipherContext::new(Box::new(Blowfish::new(&key)), PaddingMode::PKCS7);

    let mut encrypted = CipherOutput::Buffer(Box::new(Vec::new()));
    ctx.encrypt(CipherInput::Bytes(message.clone()), &mut encrypted)
        .await?;
    let ciphertext = match encrypted {
        CipherOutput::Buffer(buf) => *buf,
        _ => unreachable!(),
    };
    println!(" {} bytes -> {} bytes (PKCS7)", message.len(), ciphertext.len());

    let mut decrypted = CipherOutput::Buffer(Box::new(Vec::new()));
    ctx.decrypt(CipherInput::Bytes(ciphertext), &mut decrypted)
        .await?;
    match decrypted {
        CipherOutput::Buffer(buf) => assert_eq!(*buf, message),
        _ => unreachable!(),
    }
    println!(" roundtrip ok");

    // --------------------------------------------------------
    // 5) File encryption
    // --------------------------------------------------------
    println!("\n=== File demo ===");
    let input_path = "demo_plain.bin";
    let encrypted_path = "demo_encrypted.bin";
    let decrypted_path = "demo_decrypted.bin";
    fs::write(input_path, &message)?;

    ctx.encrypt(
        CipherInput::File(input_path.to_string()),
        &mut CipherOutput::File(encrypted_path.to_string()),
    )
    .await?;
    ctx.decrypt(
        CipherInput::File(encrypted_path.to_string()),
        &mut CipherOutput::File(decrypted_path.to_string()),
    )
    .await?;
    assert_eq!(fs::read(decrypted_path)?, message);
    println!(" file roundtrip ok");

    fs::remove_file(input_path)?;
    fs::remove_file(encrypted_path)?;
    fs::remove_file(decrypted_path)?;

    // --------------------------------------------------------
    // 6) One schedule, many tasks
    // --------------------------------------------------------
    println!("\n=== Concurrent use of one schedule ===");
    let shared = Arc::new(Blowfish::new(b"shared secret"));
    let mut handles = Vec::new();
    for task in 0..4u8 {
        let cipher = Arc::clone(&shared);
        handles.push(tokio::spawn(async move {
            let plaintext = vec![task; 8 * 1024];
            let ciphertext = cipher.ecb_encrypt(&plaintext).unwrap();
            let restored = cipher.ecb_decrypt(&ciphertext).unwrap();
            assert_eq!(restored, plaintext);
            task
        }));
    }
    for handle in handles {
        let task = handle.await.expect("task panicked");
        println!(" task {task} roundtrip ok");
    }

    Ok(())
}
