//! Product entity and request bodies

use serde::Deserialize;
use sqlx::FromRow;

use super::field::{merge, present};
use super::validation::{self, ValidationError};

/// Row of the `products` table
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i32>,
}

/// POST /products body. Missing keys stay `None`.
#[derive(Debug, Default, Deserialize)]
pub struct ProductInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i32>,
}

/// Validated product ready for INSERT (no id yet)
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i32>,
}

impl TryFrom<ProductInput> for NewProduct {
    type Error = ValidationError;

    fn try_from(input: ProductInput) -> Result<Self, Self::Error> {
        let name = input.name.ok_or(ValidationError::Missing { field: "name" })?;
        Ok(Self {
            name: validation::name(name)?,
            description: validation::description(input.description)?,
            price: input.price,
            stock: input.stock,
        })
    }
}

/// PUT/PATCH /products/{id} body
#[derive(Debug, Default, Deserialize)]
pub struct ProductPatch {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub price: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present")]
    pub stock: Option<Option<i32>>,
}

/// Validated product changes; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub price: Option<Option<f64>>,
    pub stock: Option<Option<i32>>,
}

impl TryFrom<ProductPatch> for ProductChanges {
    type Error = ValidationError;

    fn try_from(patch: ProductPatch) -> Result<Self, Self::Error> {
        let name = match patch.name {
            None => None,
            Some(None) => return Err(ValidationError::Null { field: "name" }),
            Some(Some(name)) => Some(validation::name(name)?),
        };
        let description = patch
            .description
            .map(validation::description)
            .transpose()?;

        Ok(Self {
            name,
            description,
            price: patch.price,
            stock: patch.stock,
        })
    }
}

impl ProductChanges {
    /// Merge into `product`, field by field. The id is never touched.
    pub fn apply(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        merge(&mut product.description, self.description);
        merge(&mut product.price, self.price);
        merge(&mut product.stock, self.stock);
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.stock.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> Product {
        Product {
            id: 1,
            name: "Widget".into(),
            description: Some("A widget".into()),
            price: Some(9.99),
            stock: Some(10),
        }
    }

    fn changes(json: &str) -> Result<ProductChanges, ValidationError> {
        let patch: ProductPatch = serde_json::from_str(json).unwrap();
        ProductChanges::try_from(patch)
    }

    #[test]
    fn create_leaves_missing_fields_null() {
        let input: ProductInput = serde_json::from_str(r#"{"name": "Widget"}"#).unwrap();
        let new = NewProduct::try_from(input).unwrap();
        assert_eq!(new.name, "Widget");
        assert_eq!(new.description, None);
        assert_eq!(new.price, None);
        assert_eq!(new.stock, None);
    }

    #[test]
    fn create_requires_name() {
        let input: ProductInput = serde_json::from_str(r#"{"price": 1.5}"#).unwrap();
        assert_eq!(
            NewProduct::try_from(input).unwrap_err(),
            ValidationError::Missing { field: "name" }
        );
    }

    #[test]
    fn create_accepts_integer_price() {
        let input: ProductInput =
            serde_json::from_str(r#"{"name": "Product 2", "price": 13, "stock": 0}"#).unwrap();
        let new = NewProduct::try_from(input).unwrap();
        assert_eq!(new.price, Some(13.0));
        assert_eq!(new.stock, Some(0));
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let changes = changes("{}").unwrap();
        assert!(changes.is_empty());

        let mut product = widget();
        changes.apply(&mut product);
        assert_eq!(product, widget());
    }

    #[test]
    fn price_only_patch() {
        let mut product = widget();
        changes(r#"{"price": 12.5}"#).unwrap().apply(&mut product);

        assert_eq!(product.price, Some(12.5));
        assert_eq!(product.name, "Widget");
        assert_eq!(product.description.as_deref(), Some("A widget"));
        assert_eq!(product.stock, Some(10));
    }

    #[test]
    fn explicit_null_clears_optional_column() {
        let mut product = widget();
        changes(r#"{"description": null, "stock": null}"#)
            .unwrap()
            .apply(&mut product);

        assert_eq!(product.description, None);
        assert_eq!(product.stock, None);
        assert_eq!(product.price, Some(9.99));
    }

    #[test]
    fn null_name_is_rejected() {
        assert_eq!(
            changes(r#"{"name": null}"#).unwrap_err(),
            ValidationError::Null { field: "name" }
        );
    }

    #[test]
    fn patch_ignores_id() {
        let mut product = widget();
        changes(r#"{"id": 42, "name": "Gadget"}"#)
            .unwrap()
            .apply(&mut product);
        assert_eq!(product.id, 1);
        assert_eq!(product.name, "Gadget");
    }
}
