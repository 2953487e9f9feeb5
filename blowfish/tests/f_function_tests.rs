use blowfish::crypto::f_function::round_function;
use blowfish::crypto::pi_tables::S_INIT;

#[test]
fn test_round_function_known_values_on_initial_tables() {
    assert_eq!(round_function(0x0000_0000, &S_INIT), 0x2FCF_F51E);
    assert_eq!(round_function(0xFFFF_FFFF, &S_INIT), 0x452C_2867);
    assert_eq!(round_function(0x0123_4567, &S_INIT), 0xF36E_574C);
}

#[test]
fn test_round_function_zero_is_not_identity() {
    assert_ne!(round_function(0, &S_INIT), 0);
}

#[test]
fn test_round_function_consistency() {
    let input = 0x1234_5678;
    assert_eq!(
        round_function(input, &S_INIT),
        round_function(input, &S_INIT)
    );
}

#[test]
fn test_round_function_depends_on_every_byte() {
    // flipping any single input byte must change the output
    let base = round_function(0x0102_0304, &S_INIT);
    for shift in [24, 16, 8, 0] {
        let flipped = 0x0102_0304u32 ^ (0xFF << shift);
        assert_ne!(base, round_function(flipped, &S_INIT), "byte at shift {shift}");
    }
}

#[test]
fn test_round_function_wraps_instead_of_panicking() {
    // additions overflow u32 for plenty of inputs; exercise a spread of them
    for x in (0..=0xFFFF_FFFFu32).step_by(0x0101_0101) {
        let _ = round_function(x, &S_INIT);
    }
}
