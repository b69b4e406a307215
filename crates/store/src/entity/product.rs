//! Product entity.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use rust_decimal::Decimal;
use serde::Serialize;

use datastore_core::{Category, Name, Price, ProductId, ValidationError};

use crate::sort::fold_case;

/// A product in the catalog.
///
/// Equality and hashing use only the ID.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    id: ProductId,
    name: Name,
    category: Category,
    price: Price,
}

impl Product {
    pub(crate) fn new(
        id: ProductId,
        name: &str,
        category: &str,
        price: Decimal,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id,
            name: Name::parse(name)?,
            category: Category::parse(category)?,
            price: Price::new(price)?,
        })
    }

    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.id
    }

    #[must_use]
    pub const fn name(&self) -> &Name {
        &self.name
    }

    #[must_use]
    pub const fn category(&self) -> &Category {
        &self.category
    }

    #[must_use]
    pub const fn price(&self) -> Price {
        self.price
    }

    pub(crate) fn set_name(&mut self, name: Name) {
        self.name = name;
    }

    pub(crate) fn set_category(&mut self, category: Category) {
        self.category = category;
    }

    pub(crate) const fn set_price(&mut self, price: Price) {
        self.price = price;
    }

    pub(crate) fn sort_key(&self) -> ProductKey {
        ProductKey {
            name: fold_case(self.name.as_str()),
            category: fold_case(self.category.as_str()),
            price: self.price,
            id: self.id,
        }
    }

    /// Natural ordering: name, category (both case-insensitive), price, then ID.
    #[must_use]
    pub fn natural_cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Product {}

impl Hash for Product {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Product{{id={}, name='{}', category='{}', price={}}}",
            self.id, self.name, self.category, self.price
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct ProductKey {
    name: String,
    category: String,
    price: Price,
    pub(crate) id: ProductId,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(name: &str, category: &str, price: i64) -> Product {
        Product::new(ProductId::generate(), name, category, Decimal::from(price)).unwrap()
    }

    #[test]
    fn test_new_validates_every_field() {
        let id = ProductId::generate();
        assert!(matches!(
            Product::new(id, "", "Office", Decimal::ONE),
            Err(ValidationError::Blank { field: "name" })
        ));
        assert!(matches!(
            Product::new(id, "Pen", "  ", Decimal::ONE),
            Err(ValidationError::Blank { field: "category" })
        ));
        assert!(matches!(
            Product::new(id, "Pen", "Office", Decimal::NEGATIVE_ONE),
            Err(ValidationError::Negative { field: "price", .. })
        ));
    }

    #[test]
    fn test_natural_order_chain() {
        let pen_office = product("pen", "Office", 5);
        let pen_school = product("Pen", "school", 1);
        assert_eq!(pen_office.natural_cmp(&pen_school), Ordering::Less);

        let cheap = product("Pen", "Office", 1);
        assert_eq!(cheap.natural_cmp(&pen_office), Ordering::Less);

        let apple = product("Apple", "Food", 100);
        assert_eq!(apple.natural_cmp(&cheap), Ordering::Less);
    }

    #[test]
    fn test_serialize_fields() {
        let p = product("Tea", "Food", 180);
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["name"], "Tea");
        assert_eq!(json["category"], "Food");
        assert_eq!(json["price"], "180");
    }
}
