use serde::{Deserialize, Deserializer, Serialize};

use stockdesk_core::{DomainError, DomainResult, Entity, ProductId, ValueObject};

/// Unit price of a product. Always finite and strictly positive when built
/// through [`Price::new`] or [`Price::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Price(f64);

impl ValueObject for Price {}

impl Price {
    pub fn new(value: f64) -> DomainResult<Self> {
        if !value.is_finite() || value <= 0.0 {
            return Err(DomainError::validation("price must be greater than zero"));
        }
        Ok(Self(value))
    }

    /// Parse raw form text. Non-numeric text is rejected the same way as a
    /// non-positive amount.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let value = raw
            .trim()
            .parse::<f64>()
            .map_err(|_| DomainError::validation("price must be a number"))?;
        Self::new(value)
    }

    pub fn get(self) -> f64 {
        self.0
    }

    /// Total order used by sorting (`f64::total_cmp`).
    pub fn total_cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

// Snapshots written by older builds of the widget stored the raw form text, so
// both `12.5` and `"12.5"` are accepted.
impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        let value = match Raw::deserialize(deserializer)? {
            Raw::Number(value) => value,
            Raw::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|e| serde::de::Error::custom(format!("invalid price {text:?}: {e}")))?,
        };
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

/// A catalog entry.
///
/// Serialized with the field order `id`, `name`, `price`, `category`; the
/// category is omitted when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    #[serde(deserialize_with = "non_blank_name")]
    name: String,
    price: Price,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "blank_as_none"
    )]
    category: Option<String>,
}

impl Product {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: Price,
        category: Option<String>,
    ) -> DomainResult<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }

        let category = category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        Ok(Self {
            id,
            name,
            price,
            category,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Case-insensitive search over name, category and the decimal text of the
    /// price. `needle` must already be lowercased; an empty needle matches.
    pub fn matches(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }

        self.name.to_lowercase().contains(needle)
            || self
                .category
                .as_deref()
                .is_some_and(|c| c.to_lowercase().contains(needle))
            // Plain decimal text, never exponent notation (`1e21` reads as
            // "1000000000000000000000").
            || self.price.to_string().contains(needle)
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> ProductId {
        self.id
    }
}

fn non_blank_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?.trim().to_string();
    if name.is_empty() {
        return Err(serde::de::Error::custom("name cannot be empty"));
    }
    Ok(name)
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|c| !c.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, name: &str, price: f64, category: Option<&str>) -> Product {
        Product::new(
            ProductId::new(id),
            name,
            Price::new(price).unwrap(),
            category.map(str::to_string),
        )
        .unwrap()
    }

    #[test]
    fn price_rejects_zero_negative_and_nan() {
        assert!(Price::new(0.0).is_err());
        assert!(Price::new(-3.0).is_err());
        assert!(Price::new(f64::NAN).is_err());
        assert!(Price::new(f64::INFINITY).is_err());
        assert_eq!(Price::new(0.01).unwrap().get(), 0.01);
    }

    #[test]
    fn price_parse_rejects_text() {
        let err = Price::parse("ten").unwrap_err();
        assert!(err.is_validation());
        assert_eq!(Price::parse(" 12.5 ").unwrap().get(), 12.5);
    }

    #[test]
    fn price_displays_like_plain_decimal() {
        assert_eq!(Price::new(10.0).unwrap().to_string(), "10");
        assert_eq!(Price::new(10.5).unwrap().to_string(), "10.5");
    }

    #[test]
    fn price_text_never_uses_exponent_notation() {
        assert_eq!(Price::new(1e21).unwrap().to_string(), "1000000000000000000000");
        assert_eq!(Price::new(1e-7).unwrap().to_string(), "0.0000001");

        let tiny = product(1, "Shim", 1e-7, None);
        assert!(tiny.matches("0.0000001"));
        assert!(!tiny.matches("1e-7"));
    }

    #[test]
    fn new_product_trims_and_rejects_blank_name() {
        let err = Product::new(ProductId::new(1), "   ", Price::new(1.0).unwrap(), None)
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let p = product(1, "  Widget ", 1.0, Some("  "));
        assert_eq!(p.name(), "Widget");
        assert_eq!(p.category(), None);
    }

    #[test]
    fn serializes_fields_in_stable_order() {
        let p = product(1, "Widget", 10.0, Some("Tools"));
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(
            json,
            r#"{"id":1,"name":"Widget","price":10.0,"category":"Tools"}"#
        );

        let bare = product(2, "Gadget", 5.5, None);
        let json = serde_json::to_string(&bare).unwrap();
        assert_eq!(json, r#"{"id":2,"name":"Gadget","price":5.5}"#);
    }

    #[test]
    fn deserializes_legacy_text_prices_and_blank_categories() {
        let p: Product =
            serde_json::from_str(r#"{"id":3,"name":"Bolt","price":"12","category":""}"#).unwrap();
        assert_eq!(p.price().get(), 12.0);
        assert_eq!(p.category(), None);

        let p: Product =
            serde_json::from_str(r#"{"id":4,"name":"Nut","price":0.5,"category":null}"#).unwrap();
        assert_eq!(p.category(), None);

        let p: Product = serde_json::from_str(r#"{"id":5,"name":"Nail","price":1}"#).unwrap();
        assert_eq!(p.category(), None);
    }

    #[test]
    fn rejects_unparseable_price_text() {
        let result = serde_json::from_str::<Product>(r#"{"id":3,"name":"Bolt","price":"abc"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_stored_prices_that_are_not_positive_and_finite() {
        for price in [r#""NaN""#, r#""inf""#, r#""-inf""#, "-4", r#""0""#, "0"] {
            let raw = format!(r#"{{"id":1,"name":"Bolt","price":{price}}}"#);
            assert!(
                serde_json::from_str::<Product>(&raw).is_err(),
                "price {price} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_stored_blank_names_and_trims_others() {
        assert!(serde_json::from_str::<Product>(r#"{"id":1,"name":"  ","price":1}"#).is_err());
        let p: Product = serde_json::from_str(r#"{"id":1,"name":" Bolt ","price":1}"#).unwrap();
        assert_eq!(p.name(), "Bolt");
    }

    #[test]
    fn matches_name_category_and_price_text() {
        let p = product(1, "Widget", 10.5, Some("Hardware"));
        assert!(p.matches(""));
        assert!(p.matches("widg"));
        assert!(p.matches("hard"));
        assert!(p.matches("10.5"));
        assert!(p.matches(".5"));
        assert!(!p.matches("gadget"));
    }

    #[test]
    fn missing_category_never_matches_on_category() {
        let p = product(1, "Widget", 10.0, None);
        assert!(!p.matches("none"));
    }
}
