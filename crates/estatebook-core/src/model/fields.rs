//! Validated value types for client and listing attributes.
//!
//! Each type validates on construction and is immutable afterwards.
//! Deserialization goes through the same validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{EstateError, Result};

fn invalid(field: &'static str, reason: impl Into<String>) -> EstateError {
    EstateError::InvalidField {
        field,
        reason: reason.into(),
    }
}

/// Phone number: digits only, at least 3 of them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Phone(String);

impl Phone {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.len() < 3 || !value.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid(
                "phone",
                "Phone numbers should only contain digits, and be at least 3 digits long",
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Email address of the form `local@domain.tld`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        let Some((local, domain)) = value.split_once('@') else {
            return Err(invalid("email", "Emails should be of the format local@domain"));
        };

        let local_ok = !local.is_empty()
            && local
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || "+_.-".contains(c))
            && !local.starts_with(|c: char| "+_.-".contains(c))
            && !local.ends_with(|c: char| "+_.-".contains(c));
        if !local_ok {
            return Err(invalid(
                "email",
                "The local part should be alphanumeric with +_.- separators",
            ));
        }

        let labels: Vec<&str> = domain.split('.').collect();
        let domain_ok = labels.len() >= 2
            && labels.iter().all(|label| {
                !label.is_empty()
                    && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
                    && !label.starts_with('-')
                    && !label.ends_with('-')
            })
            && labels.last().map(|tld| tld.len() >= 2).unwrap_or(false);
        if !domain_ok {
            return Err(invalid(
                "email",
                "The domain should be dot-separated labels ending in at least 2 characters",
            ));
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Single-word alphanumeric tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tag(String);

impl Tag {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.is_empty() || !value.chars().all(|c| c.is_alphanumeric()) {
            return Err(invalid("tag", "Tags should be alphanumeric"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Asking price in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Price(u64);

impl Price {
    pub fn new(value: u64) -> Result<Self> {
        if value == 0 {
            return Err(invalid("price", "Price should be a positive number"));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Floor area in square metres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Area(u32);

impl Area {
    pub fn new(value: u32) -> Result<Self> {
        if value == 0 {
            return Err(invalid("area", "Area should be a positive number"));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(invalid("address", "Address cannot be blank"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    North,
    South,
    East,
    West,
    Central,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
            Self::Central => "central",
            Self::NorthEast => "northeast",
            Self::NorthWest => "northwest",
            Self::SouthEast => "southeast",
            Self::SouthWest => "southwest",
        }
    }
}

/// Case-insensitive parse
impl FromStr for Region {
    type Err = EstateError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "north" => Ok(Self::North),
            "south" => Ok(Self::South),
            "east" => Ok(Self::East),
            "west" => Ok(Self::West),
            "central" => Ok(Self::Central),
            "northeast" => Ok(Self::NorthEast),
            "northwest" => Ok(Self::NorthWest),
            "southeast" => Ok(Self::SouthEast),
            "southwest" => Ok(Self::SouthWest),
            other => Err(invalid("region", format!("Unknown region: {}", other))),
        }
    }
}

macro_rules! string_newtype_impls {
    ($($ty:ident),*) => {
        $(
            impl TryFrom<String> for $ty {
                type Error = EstateError;

                fn try_from(value: String) -> Result<Self> {
                    $ty::new(value)
                }
            }

            impl From<$ty> for String {
                fn from(value: $ty) -> Self {
                    value.0
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.0)
                }
            }
        )*
    };
}

string_newtype_impls!(Phone, Email, Tag, Address);

impl TryFrom<u64> for Price {
    type Error = EstateError;

    fn try_from(value: u64) -> Result<Self> {
        Price::new(value)
    }
}

impl From<Price> for u64 {
    fn from(value: Price) -> Self {
        value.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

impl TryFrom<u32> for Area {
    type Error = EstateError;

    fn try_from(value: u32) -> Result<Self> {
        Area::new(value)
    }
}

impl From<Area> for u32 {
    fn from(value: Area) -> Self {
        value.0
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} m²", self.0)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
