// Copyright (c) 2025 Ala Hash Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Key kinds accepted by the Ala Hash Table.
//!
//! Only strings and integers can be used as keys. Statically typed callers are
//! constrained by the [`TableKey`] bound; callers holding loosely typed data
//! (JSON documents, command line input) go through [`Key`], whose conversion
//! from [`serde_json::Value`] is the single place a key kind is checked at runtime.

use std::fmt::{self, Debug, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::data_structures::ala_hash_table::error::{AlaHashTableError, Result};

/// Mask keeping hash values within 31 bits.
pub(crate) const HASH_MASK: u64 = 0x7FFF_FFFF;

/// Seed of the rolling string hash.
const STRING_HASH_SEED: u32 = 5381;

/// Multiplier of the rolling string hash used for the start index.
const STRING_HASH_MULTIPLIER: u32 = 33;

/// Multiplier used for the probe step mix.
const STEP_MIX_MULTIPLIER: u32 = 131;

/// A key that can be stored in an [`AlaHashTable`](super::AlaHashTable).
///
/// Implementations must be deterministic, and two keys that compare equal must
/// produce the same values from both methods. `str` and `String` share one
/// implementation so that owned keys can be looked up by borrowed slices.
pub trait TableKey: Eq + Debug {
    /// Hash used to pick the first slot of the probe sequence (31 bits).
    fn primary_hash(&self) -> u32;

    /// Independent mix used to derive the double hashing step (31 bits).
    fn step_mix(&self) -> u32;
}

impl TableKey for str {
    fn primary_hash(&self) -> u32 {
        let hash = self.chars().fold(STRING_HASH_SEED, |h, ch| {
            h.wrapping_mul(STRING_HASH_MULTIPLIER).wrapping_add(ch as u32)
        });
        (u64::from(hash) & HASH_MASK) as u32
    }

    fn step_mix(&self) -> u32 {
        let hash = self
            .chars()
            .fold(0u32, |h, ch| h.wrapping_mul(STEP_MIX_MULTIPLIER).wrapping_add(ch as u32));
        (u64::from(hash) & HASH_MASK) as u32
    }
}

impl TableKey for String {
    fn primary_hash(&self) -> u32 {
        self.as_str().primary_hash()
    }

    fn step_mix(&self) -> u32 {
        self.as_str().step_mix()
    }
}

impl TableKey for Box<str> {
    fn primary_hash(&self) -> u32 {
        (**self).primary_hash()
    }

    fn step_mix(&self) -> u32 {
        (**self).step_mix()
    }
}

impl<T: TableKey + ?Sized> TableKey for &T {
    fn primary_hash(&self) -> u32 {
        (**self).primary_hash()
    }

    fn step_mix(&self) -> u32 {
        (**self).step_mix()
    }
}

/// Hashes an integer magnitude the same way for every integer width.
fn magnitude_hash(magnitude: u64) -> u32 {
    (magnitude & HASH_MASK) as u32
}

fn magnitude_step_mix(magnitude: u64) -> u32 {
    (magnitude.wrapping_mul(u64::from(STEP_MIX_MULTIPLIER)) & HASH_MASK) as u32
}

macro_rules! impl_signed_key {
    ($($ty:ty),*) => {
        $(
            impl TableKey for $ty {
                fn primary_hash(&self) -> u32 {
                    magnitude_hash((*self as i64).unsigned_abs())
                }

                fn step_mix(&self) -> u32 {
                    magnitude_step_mix((*self as i64).unsigned_abs())
                }
            }
        )*
    };
}

macro_rules! impl_unsigned_key {
    ($($ty:ty),*) => {
        $(
            impl TableKey for $ty {
                fn primary_hash(&self) -> u32 {
                    magnitude_hash(*self as u64)
                }

                fn step_mix(&self) -> u32 {
                    magnitude_step_mix(*self as u64)
                }
            }
        )*
    };
}

impl_signed_key!(i8, i16, i32, i64, isize);
impl_unsigned_key!(u8, u16, u32, u64, usize);

/// A dynamically typed key: either an integer or a string.
///
/// `Key::Int(7)` and `Key::Str("7".into())` are different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    /// Integer key.
    Int(i64),
    /// String key.
    Str(String),
}

impl TableKey for Key {
    fn primary_hash(&self) -> u32 {
        match self {
            Key::Int(value) => value.primary_hash(),
            Key::Str(value) => value.primary_hash(),
        }
    }

    fn step_mix(&self) -> u32 {
        match self {
            Key::Int(value) => value.step_mix(),
            Key::Str(value) => value.step_mix(),
        }
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(value) => write!(f, "{value}"),
            Key::Str(value) => f.write_str(value),
        }
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Key::Int(value)
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Str(value)
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Str(value.to_string())
    }
}

impl TryFrom<&serde_json::Value> for Key {
    type Error = AlaHashTableError;

    fn try_from(value: &serde_json::Value) -> Result<Self> {
        use serde_json::Value;

        match value {
            Value::String(s) => Ok(Key::Str(s.clone())),
            Value::Number(n) => n
                .as_i64()
                .map(Key::Int)
                .ok_or_else(|| AlaHashTableError::InvalidKeyType(format!("number {n}"))),
            Value::Null => Err(AlaHashTableError::InvalidKeyType("null".to_string())),
            Value::Bool(b) => Err(AlaHashTableError::InvalidKeyType(format!("boolean {b}"))),
            Value::Array(_) => Err(AlaHashTableError::InvalidKeyType("array".to_string())),
            Value::Object(_) => Err(AlaHashTableError::InvalidKeyType("object".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_primary_hash_is_djb2() {
        // 5381 * 33 + 'A' (65)
        assert_eq!("A".primary_hash(), 177_638);
        assert_eq!("".primary_hash(), 5381);
        assert_eq!("B".primary_hash(), 177_639);
    }

    #[test]
    fn test_string_step_mix() {
        assert_eq!("".step_mix(), 0);
        assert_eq!("A".step_mix(), 65);
        assert_eq!("AB".step_mix(), 65 * 131 + 66);
    }

    #[test]
    fn test_long_string_hash_stays_within_31_bits() {
        let key = "a fairly long key that overflows the rolling hash many times over";
        assert!(u64::from(key.primary_hash()) <= HASH_MASK);
        assert!(u64::from(key.step_mix()) <= HASH_MASK);
    }

    #[test]
    fn test_owned_and_borrowed_strings_agree() {
        let owned = "patient-42".to_string();
        assert_eq!(owned.primary_hash(), "patient-42".primary_hash());
        assert_eq!(owned.step_mix(), "patient-42".step_mix());
        let boxed: Box<str> = "patient-42".into();
        assert_eq!(boxed.primary_hash(), owned.primary_hash());
    }

    #[test]
    fn test_integer_hash_uses_magnitude() {
        assert_eq!(42i64.primary_hash(), 42);
        assert_eq!((-42i64).primary_hash(), 42);
        assert_eq!(42u8.primary_hash(), 42);
        assert_eq!(i64::MIN.primary_hash(), 0);
        assert_eq!(0x8000_0005u64.primary_hash(), 5);
        assert_eq!(3i32.step_mix(), 393);
        assert_eq!((-3i32).step_mix(), 393);
    }

    #[test]
    fn test_dynamic_key_matches_static_hash() {
        assert_eq!(Key::Int(-17).primary_hash(), (-17i64).primary_hash());
        assert_eq!(Key::from("abc").primary_hash(), "abc".primary_hash());
        assert_eq!(Key::from("abc").step_mix(), "abc".step_mix());
        assert_ne!(Key::Int(7), Key::Str("7".to_string()));
    }

    #[test]
    fn test_key_from_json_value() {
        assert_eq!(Key::try_from(&json!(12)).unwrap(), Key::Int(12));
        assert_eq!(Key::try_from(&json!("x")).unwrap(), Key::from("x"));

        assert!(matches!(
            Key::try_from(&json!(1.5)),
            Err(AlaHashTableError::InvalidKeyType(_))
        ));
        assert!(matches!(
            Key::try_from(&json!(true)),
            Err(AlaHashTableError::InvalidKeyType(_))
        ));
        assert!(matches!(
            Key::try_from(&json!(null)),
            Err(AlaHashTableError::InvalidKeyType(_))
        ));
        assert!(matches!(
            Key::try_from(&json!([1, 2])),
            Err(AlaHashTableError::InvalidKeyType(_))
        ));
    }

    #[test]
    fn test_key_serde_is_untagged() {
        let keys: Vec<Key> = serde_json::from_str(r#"[3, "three"]"#).unwrap();
        assert_eq!(keys, vec![Key::Int(3), Key::from("three")]);
        assert_eq!(serde_json::to_string(&keys).unwrap(), r#"[3,"three"]"#);
        assert_eq!(Key::Int(3).to_string(), "3");
    }
}
