//! Strongly-typed identifiers used across the domain.

use serde::{Deserialize, Serialize};

/// Identifier of a product within a catalog.
///
/// Integer-valued and assigned once at creation (the default generator uses
/// the wall clock in milliseconds). Serialized as a bare JSON number.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> i64 {
        self.0
    }

    /// The next identifier in sequence (saturating).
    pub fn successor(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for ProductId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<ProductId> for i64 {
    fn from(value: ProductId) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_as_plain_integer() {
        assert_eq!(ProductId::new(1_700_000_000_123).to_string(), "1700000000123");
        assert_eq!(i64::from(ProductId::from(9)), 9);
    }

    #[test]
    fn serializes_as_bare_number() {
        let json = serde_json::to_string(&ProductId::new(42)).unwrap();
        assert_eq!(json, "42");
        let back: ProductId = serde_json::from_str("42").unwrap();
        assert_eq!(back, ProductId::new(42));
    }

    #[test]
    fn successor_saturates() {
        assert_eq!(ProductId::new(7).successor(), ProductId::new(8));
        assert_eq!(ProductId::new(i64::MAX).successor(), ProductId::new(i64::MAX));
    }
}
