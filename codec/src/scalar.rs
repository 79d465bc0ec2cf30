//! FILENAME: codec/src/scalar.rs
//! Scalar codec - one typed value.
//!
//! Every supported scalar encodes to a fixed, little-endian layout so the
//! composite key format is portable and byte-for-byte reproducible:
//! - Text: 8-byte LE length prefix followed by the raw UTF-8 bytes
//! - Integer: 8-byte LE two's-complement i64
//! - Float: 8-byte LE IEEE-754 double (bit pattern)
//!
//! Comparison is only defined between scalars of the same type; the axis
//! schema guarantees that by construction, and a mismatch is a
//! programming error rather than a recoverable condition.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use crate::definition::ScalarType;
use crate::error::{CodecError, TokenError};

/// A single typed column value. The tag never changes after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl Scalar {
    pub fn scalar_type(&self) -> ScalarType {
        match self {
            Scalar::Text(_) => ScalarType::Text,
            Scalar::Integer(_) => ScalarType::Integer,
            Scalar::Float(_) => ScalarType::Float,
        }
    }

    /// Parses a raw row token as the given type.
    pub fn parse(token: &str, scalar_type: ScalarType) -> Result<Self, TokenError> {
        match scalar_type {
            ScalarType::Text => Ok(Scalar::Text(token.to_string())),
            ScalarType::Integer => token
                .trim()
                .parse::<i64>()
                .map(Scalar::Integer)
                .map_err(|_| TokenError {
                    token: token.to_string(),
                    scalar_type,
                }),
            ScalarType::Float => token
                .trim()
                .parse::<f64>()
                .map(Scalar::Float)
                .map_err(|_| TokenError {
                    token: token.to_string(),
                    scalar_type,
                }),
        }
    }

    /// Appends this value's encoding to `out`.
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        match self {
            Scalar::Text(s) => {
                out.extend_from_slice(&(s.len() as u64).to_le_bytes());
                out.extend_from_slice(s.as_bytes());
            }
            Scalar::Integer(i) => out.extend_from_slice(&i.to_le_bytes()),
            Scalar::Float(f) => out.extend_from_slice(&f.to_bits().to_le_bytes()),
        }
    }

    /// Decodes one value of the given type from the front of `input`.
    /// Returns the value and the number of bytes consumed.
    pub fn decode(input: &[u8], scalar_type: ScalarType) -> Result<(Self, usize), CodecError> {
        match scalar_type {
            ScalarType::Text => {
                let len = read_u64(input)? as usize;
                let end = 8usize.checked_add(len).ok_or(CodecError::Truncated {
                    needed: len,
                    remaining: input.len(),
                })?;
                let bytes = input.get(8..end).ok_or(CodecError::Truncated {
                    needed: end,
                    remaining: input.len(),
                })?;
                let text = String::from_utf8(bytes.to_vec())?;
                Ok((Scalar::Text(text), end))
            }
            ScalarType::Integer => {
                let raw = read_u64(input)?;
                Ok((Scalar::Integer(i64::from_le_bytes(raw.to_le_bytes())), 8))
            }
            ScalarType::Float => {
                let raw = read_u64(input)?;
                Ok((Scalar::Float(f64::from_bits(raw)), 8))
            }
        }
    }

    /// Three-way comparison between two scalars of the same type.
    ///
    /// Float comparison is total: NaN sorts above every non-NaN value and
    /// compares equal to itself, so the store's ordering invariants hold
    /// even for pathological input.
    ///
    /// # Panics
    ///
    /// Panics if the two scalars carry different type tags. The axis
    /// schema makes that impossible for well-formed keys.
    pub fn compare(&self, other: &Scalar) -> Ordering {
        match (self, other) {
            (Scalar::Text(a), Scalar::Text(b)) => a.as_bytes().cmp(b.as_bytes()),
            (Scalar::Integer(a), Scalar::Integer(b)) => a.cmp(b),
            (Scalar::Float(a), Scalar::Float(b)) => compare_f64(*a, *b),
            (a, b) => panic!(
                "scalar type mismatch: cannot compare {:?} with {:?}",
                a.scalar_type(),
                b.scalar_type()
            ),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(s) => f.write_str(s),
            Scalar::Integer(i) => write!(f, "{}", i),
            Scalar::Float(x) => write!(f, "{}", x),
        }
    }
}

/// Total order over doubles: NaN is greater than everything and equal to
/// itself.
fn compare_f64(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

fn read_u64(input: &[u8]) -> Result<u64, CodecError> {
    let bytes: [u8; 8] = input
        .get(..8)
        .and_then(|s| s.try_into().ok())
        .ok_or(CodecError::Truncated {
            needed: 8,
            remaining: input.len(),
        })?;
    Ok(u64::from_le_bytes(bytes))
}

// ============================================================================
// TESTS
// ============================================================================
