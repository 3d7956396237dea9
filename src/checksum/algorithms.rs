//! Numeric kernels behind each [`Checksum`](super::Checksum) variant.
//!
//! These reproduce the courier definitions' arithmetic exactly, including the
//! lenient cases: Mod10 maps letters through `(byte - 3) % 10` and Mod 37,36
//! skips characters outside the base-36 alphabet.

use super::ChecksumError;

/// Whole serial as a signed integer modulo 7; unparseable input yields `"0"`.
#[must_use]
pub fn mod7(serial: &str) -> String {
    serial
        .parse::<i64>()
        .map_or_else(|_| "0".to_string(), |value| (value % 7).to_string())
}

/// Alternating-multiplier weighted sum, `(10 - sum % 10) % 10`.
///
/// Multipliers come from definition files; the sum wraps on overflow.
#[must_use]
pub fn mod10(serial: &str, evens_multiplier: i64, odds_multiplier: i64) -> String {
    let sum: i64 = serial
        .bytes()
        .enumerate()
        .map(|(i, b)| {
            let value = if b.is_ascii_digit() {
                i64::from(b - b'0')
            } else {
                // alpha mapping
                i64::from(b.wrapping_sub(3) % 10)
            };
            let multiplier = if i % 2 == 0 {
                evens_multiplier
            } else {
                odds_multiplier
            };
            value.wrapping_mul(multiplier)
        })
        .fold(0i64, i64::wrapping_add);

    ((10 - sum % 10) % 10).to_string()
}

/// UPU S10 check digit.
///
/// # Errors
///
/// Fails when the serial length differs from the weighting length or a
/// character is not a decimal digit.
pub fn s10(serial: &str, weightings: &[i64]) -> Result<String, ChecksumError> {
    if serial.len() != weightings.len() {
        return Err(ChecksumError::LengthMismatch {
            expected: weightings.len(),
            actual: serial.len(),
        });
    }

    let check = match weighted_digit_sum(serial.as_bytes(), weightings, 0)? % 11 {
        1 => 0,
        0 => 5,
        remainder => 11 - remainder,
    };

    Ok(check.to_string())
}

/// Weighted sum over the trailing `weightings.len()` characters, reduced by
/// `modulo1` and then `modulo2`.
///
/// # Errors
///
/// Fails when the serial is shorter than the weightings, a trailing character
/// is not a decimal digit, or a modulus is zero.
pub fn weighted_sum_modulo(
    serial: &str,
    weightings: &[i64],
    modulo1: i64,
    modulo2: i64,
) -> Result<String, ChecksumError> {
    if serial.len() < weightings.len() {
        return Err(ChecksumError::TooShort {
            required: weightings.len(),
            actual: serial.len(),
        });
    }

    let start = serial.len() - weightings.len();
    let sum = weighted_digit_sum(&serial.as_bytes()[start..], weightings, start)?;

    if modulo1 == 0 || modulo2 == 0 {
        return Err(ChecksumError::ZeroModulus);
    }

    let check = sum.wrapping_rem(modulo1).wrapping_rem(modulo2);
    Ok(check.to_string())
}

/// ISO 7064 Mod 37,36 check character (`0-9`, `A-Z`).
#[must_use]
pub fn mod_37_36(serial: &str) -> char {
    const MOD: u32 = 36;

    let mut n = MOD;
    for value in serial.chars().filter_map(|c| c.to_digit(MOD)) {
        n += value;
        if n > MOD {
            n -= MOD;
        }
        n *= 2;
        if n > MOD {
            n = n - MOD - 1;
        }
    }

    // n <= MOD here
    let n = (MOD + 1 - n) % MOD;
    char::from_digit(n, MOD).map_or('0', |c| c.to_ascii_uppercase())
}

/// Digit-by-weight sum, wrapping on overflow
fn weighted_digit_sum(
    digits: &[u8],
    weightings: &[i64],
    offset: usize,
) -> Result<i64, ChecksumError> {
    digits
        .iter()
        .zip(weightings)
        .enumerate()
        .try_fold(0i64, |sum, (i, (&b, &weight))| {
            if b.is_ascii_digit() {
                Ok(sum.wrapping_add(i64::from(b - b'0').wrapping_mul(weight)))
            } else {
                Err(ChecksumError::InvalidDigit {
                    character: char::from(b),
                    position: offset + i,
                })
            }
        })
}
