//! # Core Domain Entities
//!
//! Primitive types shared by every Freehold subsystem.
//!
//! ## Type Decisions
//!
//! - `Amount = u128` - Ledger units and payment-currency units alike. Products
//!   such as `pool × balance` can exceed 128 bits, so proportional math goes
//!   through [`mul_div_floor`] which widens to `U256` first.
//! - `Timestamp = u64` - Unix seconds.

// Re-export U256 from primitive-types for use across all subsystems
pub use primitive_types::U256;

/// A 20-byte Ethereum-style account address.
pub type Address = [u8; 20];

/// Unit amount in base units (ledger units or payment-currency units).
pub type Amount = u128;

/// Unix timestamp in seconds.
pub type Timestamp = u64;

/// The all-zero address. Never a valid receiver, operator or holder.
pub const ZERO_ADDRESS: Address = [0u8; 20];

/// Basis-point denominator (10000 = 100%).
pub const BASIS_POINTS: u128 = 10_000;

/// Seconds in one day.
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Days used to annualise realised yields.
pub const DAYS_PER_YEAR: u128 = 365;

/// Returns true for the all-zero address.
pub fn is_zero_address(address: &Address) -> bool {
    *address == ZERO_ADDRESS
}

/// Hex rendering used in logs and error messages (`0x` prefixed).
pub fn address_hex(address: &Address) -> String {
    format!("0x{}", hex::encode(address))
}

/// Parse a `0x`-prefixed (or bare) 40-character hex string into an address.
pub fn parse_address(input: &str) -> Option<Address> {
    let trimmed = input.trim();
    let stripped = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    let bytes = hex::decode(stripped).ok()?;
    bytes.try_into().ok()
}

/// Computes `floor(a * b / denominator)` without intermediate overflow.
///
/// Returns `None` when `denominator` is zero or the quotient does not fit in
/// 128 bits.
pub fn mul_div_floor(a: u128, b: u128, denominator: u128) -> Option<u128> {
    if denominator == 0 {
        return None;
    }
    let product = U256::from(a) * U256::from(b);
    let quotient = product / U256::from(denominator);
    if quotient > U256::from(u128::MAX) {
        return None;
    }
    Some(quotient.as_u128())
}

/// Converts a `U256` back to `u128`, failing if it does not fit.
pub fn u256_to_u128(value: U256) -> Option<u128> {
    if value > U256::from(u128::MAX) {
        None
    } else {
        Some(value.as_u128())
    }
}
