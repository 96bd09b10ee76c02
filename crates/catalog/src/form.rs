//! Add/edit form sessions.
//!
//! A session holds the raw text the user typed. Nothing is parsed until
//! [`ProductForm::validate`] runs on submit, so an invalid submission leaves
//! the session untouched and open for correction.

use stockdesk_core::{DomainError, DomainResult, Entity, ProductId};

use crate::product::{Price, Product};

/// Alert shown when a submission fails validation.
pub const INVALID_PRODUCT_MESSAGE: &str = "Please enter valid product details.";

/// Whether the session creates a new product or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit(ProductId),
}

/// Editable form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Price,
    Category,
}

/// An open add/edit session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductForm {
    mode: FormMode,
    pub name: String,
    pub price: String,
    pub category: String,
}

/// Validated form contents, not yet bound to an id.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub price: Price,
    pub category: Option<String>,
}

impl ProductForm {
    /// Blank session for a new product.
    pub fn blank() -> Self {
        Self {
            mode: FormMode::Add,
            name: String::new(),
            price: String::new(),
            category: String::new(),
        }
    }

    /// Session pre-filled from an existing product.
    pub fn for_product(product: &Product) -> Self {
        Self {
            mode: FormMode::Edit(product.id()),
            name: product.name().to_string(),
            price: product.price().to_string(),
            category: product.category().unwrap_or_default().to_string(),
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Add => "Add Product",
            FormMode::Edit(_) => "Edit Product",
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Name => self.name = value,
            FormField::Price => self.price = value,
            FormField::Category => self.category = value,
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Price => &self.price,
            FormField::Category => &self.category,
        }
    }

    /// Checks the two submission rules: non-empty name and price > 0.
    pub fn validate(&self) -> DomainResult<ProductDraft> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        let price = Price::parse(&self.price)?;
        let category = Some(self.category.trim().to_string()).filter(|c| !c.is_empty());

        Ok(ProductDraft {
            name: name.to_string(),
            price,
            category,
        })
    }
}

impl Default for ProductForm {
    fn default() -> Self {
        Self::blank()
    }
}

impl ProductDraft {
    pub fn into_product(self, id: ProductId) -> DomainResult<Product> {
        Product::new(id, self.name, self.price, self.category)
    }
}
