//! Modular fold of a committed value with the counterparty's value.

/// `(committed + counterparty) mod modulus`.
///
/// Uniform over `[0, modulus)` whenever `committed` is uniform and was fixed
/// before `counterparty` was chosen.
///
/// # Panics
///
/// Panics if `modulus` is zero.
pub fn combine(committed: u32, counterparty: u32, modulus: u32) -> u32 {
    assert!(modulus > 0, "modulus must be positive");
    ((u64::from(committed) + u64::from(counterparty)) % u64::from(modulus)) as u32
}
