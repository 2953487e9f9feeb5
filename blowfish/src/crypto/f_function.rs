//! The round function and the 16-round Feistel loops it drives.

/// Number of Feistel rounds.
pub const ROUNDS: usize = 16;

/// Round function F: the input word is split into four bytes (most
/// significant first), each indexes one S-box, and the results are combined
/// by alternating modular addition and XOR. The mix of the two group
/// operations is the non-linearity source, so the wrapping semantics matter.
pub fn round_function(x: u32, sboxes: &[[u32; 256]; 4]) -> u32 {
    let a = (x >> 24) as usize;
    let b = (x >> 16) as usize & 0xFF;
    let c = (x >> 8) as usize & 0xFF;
    let d = x as usize & 0xFF;

    let mixed = sboxes[0][a].wrapping_add(sboxes[1][b]) ^ sboxes[2][c];
    mixed.wrapping_add(sboxes[3][d])
}

/// One block encryption over raw tables. Takes the tables apart from a
/// finished schedule so key derivation can run it against its own working
/// state.
pub(crate) fn encrypt_halves(
    subkeys: &[u32; 18],
    sboxes: &[[u32; 256]; 4],
    mut left: u32,
    mut right: u32,
) -> (u32, u32) {
    for round in 0..ROUNDS {
        left ^= subkeys[round];
        right ^= round_function(left, sboxes);
        std::mem::swap(&mut left, &mut right);
    }
    // undo the last swap, then whiten
    std::mem::swap(&mut left, &mut right);
    right ^= subkeys[ROUNDS];
    left ^= subkeys[ROUNDS + 1];
    (left, right)
}

/// Inverse of [`encrypt_halves`]: same structure with the subkey array walked
/// in reverse.
pub(crate) fn decrypt_halves(
    subkeys: &[u32; 18],
    sboxes: &[[u32; 256]; 4],
    mut left: u32,
    mut right: u32,
) -> (u32, u32) {
    for round in (2..ROUNDS + 2).rev() {
        left ^= subkeys[round];
        right ^= round_function(left, sboxes);
        std::mem::swap(&mut left, &mut right);
    }
    std::mem::swap(&mut left, &mut right);
    right ^= subkeys[1];
    left ^= subkeys[0];
    (left, right)
}
