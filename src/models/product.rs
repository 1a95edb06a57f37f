use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub quantity: i64,
}

/// A product that has passed validation but has no id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub quantity: i64,
}

/// Validated subset of mutable fields. `None` means "keep the stored value".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i64>,
}

impl ProductChanges {
    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.quantity.is_none()
    }

    /// Writes the supplied fields onto `product`, leaving the rest untouched.
    pub fn apply_to(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(description) = self.description {
            product.description = Some(description);
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(quantity) = self.quantity {
            product.quantity = quantity;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> Product {
        Product {
            id: 7,
            name: "Widget".to_string(),
            description: None,
            price: 9.99,
            quantity: 5,
        }
    }

    #[test]
    fn empty_changes_leave_product_untouched() {
        let mut product = widget();
        let changes = ProductChanges::default();
        assert!(changes.is_empty());

        changes.apply_to(&mut product);

        assert_eq!(product, widget());
    }

    #[test]
    fn apply_only_touches_supplied_fields() {
        let mut product = widget();

        ProductChanges {
            description: Some("blue".to_string()),
            quantity: Some(12),
            ..Default::default()
        }
        .apply_to(&mut product);

        assert_eq!(product.id, 7);
        assert_eq!(product.name, "Widget");
        assert_eq!(product.description.as_deref(), Some("blue"));
        assert_eq!(product.price, 9.99);
        assert_eq!(product.quantity, 12);
    }
}
