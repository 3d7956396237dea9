//! Check digit algorithms used by courier tracking numbers.
//!
//! Every courier service names one algorithm in its definition. The set of
//! algorithms is closed and represented by [`Checksum`]; a definition's
//! `checksum.name` selects the variant through a name -> constructor table at
//! load time.
//!
//! | Name                                     | Variant                          |
//! |------------------------------------------|----------------------------------|
//! | `mod7`                                   | [`Checksum::Mod7`]               |
//! | `mod10`                                  | [`Checksum::Mod10`]              |
//! | `s10`                                    | [`Checksum::S10`]                |
//! | `mod_37_36`                              | [`Checksum::Mod3736`]            |
//! | `sum_product_with_weightings_and_modulo` | [`Checksum::WeightedSumModulo`]  |
//! | anything else                            | [`Checksum::Noop`]               |
//!
//! ## Example
//!
//! ```rust
//! use parcel_track::checksum::Checksum;
//!
//! let ups = Checksum::Mod10 { evens_multiplier: 1, odds_multiplier: 2 };
//! assert_eq!(ups.generate("123456789").unwrap(), "5");
//! assert!(ups.validate("123456789", "5"));
//! ```

pub mod algorithms;

use thiserror::Error;

use crate::core::definition::ChecksumConfig;

/// Default UPU S10 weighting sequence
pub const S10_DEFAULT_WEIGHTINGS: [i64; 8] = [8, 6, 4, 2, 3, 5, 9, 7];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChecksumError {
    #[error("serial has {actual} characters, expected exactly {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("serial has {actual} characters, expected at least {required}")]
    TooShort { required: usize, actual: usize },

    #[error("invalid digit {character:?} at position {position}")]
    InvalidDigit { character: char, position: usize },

    #[error("modulus must be non-zero")]
    ZeroModulus,
}

/// A check digit algorithm together with its parameters
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Checksum {
    /// No check digit; every serial validates
    #[default]
    Noop,
    /// Whole serial as an integer, modulo 7
    Mod7,
    /// Luhn-style weighted sum with alternating multipliers
    Mod10 {
        evens_multiplier: i64,
        odds_multiplier: i64,
    },
    /// UPU S10 weighted sum modulo 11
    S10 { weightings: Vec<i64> },
    /// ISO 7064 Mod 37,36 over alphanumeric input
    Mod3736,
    /// Weighted sum over the trailing characters, reduced by two moduli
    WeightedSumModulo {
        weightings: Vec<i64>,
        modulo1: i64,
        modulo2: i64,
    },
}

type Constructor = fn(&ChecksumConfig) -> Result<Checksum, ChecksumError>;

/// Configuration name -> constructor
const CONSTRUCTORS: &[(&str, Constructor)] = &[
    ("mod7", build_mod7),
    ("mod10", build_mod10),
    ("s10", build_s10),
    ("mod_37_36", build_mod_37_36),
    ("sum_product_with_weightings_and_modulo", build_weighted_sum_modulo),
];

#[allow(clippy::unnecessary_wraps)]
fn build_mod7(_: &ChecksumConfig) -> Result<Checksum, ChecksumError> {
    Ok(Checksum::Mod7)
}

#[allow(clippy::unnecessary_wraps)]
fn build_mod10(config: &ChecksumConfig) -> Result<Checksum, ChecksumError> {
    Ok(Checksum::Mod10 {
        evens_multiplier: config.evens_multiplier,
        odds_multiplier: config.odds_multiplier,
    })
}

#[allow(clippy::unnecessary_wraps)]
fn build_s10(config: &ChecksumConfig) -> Result<Checksum, ChecksumError> {
    Ok(Checksum::s10(config.weightings.clone()))
}

#[allow(clippy::unnecessary_wraps)]
fn build_mod_37_36(_: &ChecksumConfig) -> Result<Checksum, ChecksumError> {
    Ok(Checksum::Mod3736)
}

fn build_weighted_sum_modulo(config: &ChecksumConfig) -> Result<Checksum, ChecksumError> {
    Checksum::weighted_sum_modulo(config.weightings.clone(), config.modulo1, config.modulo2)
}

impl Checksum {
    /// Build the algorithm named by a definition's checksum block.
    ///
    /// Unknown or empty names select [`Checksum::Noop`].
    ///
    /// # Errors
    ///
    /// Returns `ChecksumError::ZeroModulus` for a weighted-sum configuration
    /// with a zero modulus.
    pub fn from_config(config: &ChecksumConfig) -> Result<Self, ChecksumError> {
        CONSTRUCTORS
            .iter()
            .find(|(name, _)| *name == config.name)
            .map_or(Ok(Self::Noop), |(_, build)| build(config))
    }

    /// S10 with the given weightings, or the UPU default when empty
    #[must_use]
    pub fn s10(weightings: Vec<i64>) -> Self {
        if weightings.is_empty() {
            Self::S10 {
                weightings: S10_DEFAULT_WEIGHTINGS.to_vec(),
            }
        } else {
            Self::S10 { weightings }
        }
    }

    /// Weighted sum with two-stage modulo reduction
    ///
    /// # Errors
    ///
    /// Returns `ChecksumError::ZeroModulus` if either modulus is zero.
    pub fn weighted_sum_modulo(
        weightings: Vec<i64>,
        modulo1: i64,
        modulo2: i64,
    ) -> Result<Self, ChecksumError> {
        if modulo1 == 0 || modulo2 == 0 {
            return Err(ChecksumError::ZeroModulus);
        }
        Ok(Self::WeightedSumModulo {
            weightings,
            modulo1,
            modulo2,
        })
    }

    /// Configuration name of this algorithm
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Noop => "none",
            Self::Mod7 => "mod7",
            Self::Mod10 { .. } => "mod10",
            Self::S10 { .. } => "s10",
            Self::Mod3736 => "mod_37_36",
            Self::WeightedSumModulo { .. } => "sum_product_with_weightings_and_modulo",
        }
    }

    /// Compute the check digit for a serial number.
    ///
    /// # Errors
    ///
    /// S10 and the weighted-sum variant fail on a length mismatch or a
    /// non-digit character. The other variants never fail.
    pub fn generate(&self, serial: &str) -> Result<String, ChecksumError> {
        match self {
            Self::Noop => Ok(String::new()),
            Self::Mod7 => Ok(algorithms::mod7(serial)),
            Self::Mod10 {
                evens_multiplier,
                odds_multiplier,
            } => Ok(algorithms::mod10(serial, *evens_multiplier, *odds_multiplier)),
            Self::S10 { weightings } => algorithms::s10(serial, weightings),
            Self::Mod3736 => Ok(algorithms::mod_37_36(serial).to_string()),
            Self::WeightedSumModulo {
                weightings,
                modulo1,
                modulo2,
            } => algorithms::weighted_sum_modulo(serial, weightings, *modulo1, *modulo2),
        }
    }

    /// Check a serial number against its check digit.
    ///
    /// A failing [`generate`](Self::generate) counts as a mismatch.
    #[must_use]
    pub fn validate(&self, serial: &str, check_digit: &str) -> bool {
        match self {
            Self::Noop => true,
            _ => self
                .generate(serial)
                .is_ok_and(|expected| expected == check_digit),
        }
    }
}
