//! Bit codes built from yes/no answers.
//!
//! Codes are written as dash-separated binary digits, `1-1-0-0-1` for a bare
//! prefix and `1-1-0-0-1-0` once a disambiguating answer has been appended.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Number of base attributes answered for every car.
pub const PREFIX_BITS: usize = 5;

/// Length of a code that carries a disambiguating answer.
pub const EXTENDED_BITS: usize = PREFIX_BITS + 1;

/// The answers to the five base questions.
///
/// The first answer is kept in the most significant of the five bits so that
/// numeric order matches the written `d-d-d-d-d` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Prefix(u8);

impl Prefix {
    const MASK: u8 = (1 << PREFIX_BITS) - 1;

    /// Build a prefix from answers given in base-question order.
    pub fn from_answers(answers: [bool; PREFIX_BITS]) -> Self {
        let packed = answers
            .iter()
            .fold(0u8, |acc, &yes| (acc << 1) | u8::from(yes));
        Self(packed)
    }

    /// Answer to the base question at `index` (0-based).
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`PREFIX_BITS`].
    pub fn bit(&self, index: usize) -> bool {
        assert!(index < PREFIX_BITS, "prefix bit index {index} out of range");
        (self.0 >> (PREFIX_BITS - 1 - index)) & 1 == 1
    }

    /// All five answers in base-question order.
    pub fn answers(&self) -> [bool; PREFIX_BITS] {
        std::array::from_fn(|i| self.bit(i))
    }

    /// Number of base answers that differ between two prefixes.
    pub fn hamming(&self, other: &Prefix) -> u32 {
        ((self.0 ^ other.0) & Self::MASK).count_ones()
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_bits(f, &self.answers())
    }
}

impl FromStr for Prefix {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bits = parse_bits(s)?;
        let answers: [bool; PREFIX_BITS] = bits.as_slice().try_into().map_err(|_| {
            ValidationError::malformed_bits(s, format!("expected {PREFIX_BITS} digits, got {}", bits.len()))
        })?;
        Ok(Self::from_answers(answers))
    }
}

impl TryFrom<String> for Prefix {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Prefix> for String {
    fn from(prefix: Prefix) -> Self {
        prefix.to_string()
    }
}

/// A car's full code: the five base answers plus, once disambiguated, the
/// answer to the rule question registered for that prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Code {
    prefix: Prefix,
    special: Option<bool>,
}

impl Code {
    /// A bare five-bit code.
    pub fn base(prefix: Prefix) -> Self {
        Self {
            prefix,
            special: None,
        }
    }

    /// A six-bit code.
    pub fn extended(prefix: Prefix, special: bool) -> Self {
        Self {
            prefix,
            special: Some(special),
        }
    }

    pub fn prefix(&self) -> Prefix {
        self.prefix
    }

    /// The sixth bit, if this code has been disambiguated.
    pub fn special_bit(&self) -> Option<bool> {
        self.special
    }

    pub fn is_disambiguated(&self) -> bool {
        self.special.is_some()
    }

    /// Number of bits: 5 or 6.
    pub fn len(&self) -> usize {
        if self.is_disambiguated() {
            EXTENDED_BITS
        } else {
            PREFIX_BITS
        }
    }

    /// Append the sixth bit. Only bare codes can be extended.
    pub fn extend(&mut self, special: bool) -> Result<(), ValidationError> {
        if self.is_disambiguated() {
            return Err(ValidationError::AlreadyExtended {
                code: self.to_string(),
            });
        }
        self.special = Some(special);
        Ok(())
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefix)?;
        if let Some(special) = self.special {
            write!(f, "-{}", u8::from(special))?;
        }
        Ok(())
    }
}

impl FromStr for Code {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bits = parse_bits(s)?;
        let (head, special) = match bits.len() {
            PREFIX_BITS => (&bits[..], None),
            EXTENDED_BITS => (&bits[..PREFIX_BITS], Some(bits[PREFIX_BITS])),
            n => {
                return Err(ValidationError::malformed_bits(
                    s,
                    format!("expected {PREFIX_BITS} or {EXTENDED_BITS} digits, got {n}"),
                ))
            }
        };
        let mut answers = [false; PREFIX_BITS];
        answers.copy_from_slice(head);
        Ok(Self {
            prefix: Prefix::from_answers(answers),
            special,
        })
    }
}

impl TryFrom<String> for Code {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Code> for String {
    fn from(code: Code) -> Self {
        code.to_string()
    }
}

fn parse_bits(s: &str) -> Result<Vec<bool>, ValidationError> {
    s.split('-')
        .map(|digit| match digit {
            "0" => Ok(false),
            "1" => Ok(true),
            other => Err(ValidationError::malformed_bits(
                s,
                format!("'{other}' is not a binary digit"),
            )),
        })
        .collect()
}

fn write_bits(f: &mut fmt::Formatter<'_>, bits: &[bool]) -> fmt::Result {
    for (i, bit) in bits.iter().enumerate() {
        if i > 0 {
            f.write_str("-")?;
        }
        write!(f, "{}", u8::from(*bit))?;
    }
    Ok(())
}
