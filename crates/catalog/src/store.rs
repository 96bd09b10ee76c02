//! Catalog store: the authoritative product list and its persisted snapshot.
//!
//! Every mutation builds the next catalog, writes the full snapshot to the
//! backend, and only then swaps it in. A failed write leaves memory untouched,
//! so memory and storage agree after every call.

use std::collections::HashSet;

use thiserror::Error;

use stockdesk_core::{DomainError, Entity, ProductId};

use crate::kv::{KeyValueStore, StorageError};
use crate::product::Product;
use crate::selection::Selection;

/// Key the catalog snapshot is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "products";

/// Suffix of the key a corrupt snapshot is copied to before it is discarded.
pub const CORRUPT_SUFFIX: &str = ".corrupt";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("failed to encode catalog snapshot: {0}")]
    Encode(#[from] serde_json::Error),
}

impl CatalogError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Domain(e) if e.is_validation())
    }
}

/// Result of [`CatalogStore::save`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Inserted,
    Replaced,
}

#[derive(Debug)]
pub struct CatalogStore<S> {
    backend: S,
    key: String,
    products: Vec<Product>,
}

impl<S: KeyValueStore> CatalogStore<S> {
    /// Load the snapshot stored under `key`.
    ///
    /// A missing entry yields an empty catalog. Records that fail validation
    /// (blank name, price not finite and positive) are dropped one by one; a
    /// snapshot that is not a JSON array at all yields an empty catalog. In
    /// both cases the raw text is first copied to `<key>.corrupt`. Only a
    /// backend read failure is returned as an error.
    pub fn load(backend: S, key: impl Into<String>) -> Result<Self, CatalogError> {
        let key = key.into();
        let products = match backend.get(&key)? {
            None => {
                tracing::info!(key = %key, "no stored catalog; starting empty");
                Vec::new()
            }
            Some(raw) => match serde_json::from_str::<Vec<serde_json::Value>>(&raw) {
                Ok(records) => {
                    let total = records.len();
                    let products: Vec<Product> = records
                        .into_iter()
                        .enumerate()
                        .filter_map(|(index, record)| match serde_json::from_value::<Product>(record) {
                            Ok(product) => Some(product),
                            Err(err) => {
                                tracing::warn!(key = %key, index, error = %err, "dropping invalid stored product");
                                None
                            }
                        })
                        .collect();
                    if products.len() != total {
                        back_up_corrupt(&backend, &key, &raw);
                    }
                    let products = dedupe_by_id(products);
                    tracing::info!(key = %key, count = products.len(), "catalog loaded");
                    products
                }
                Err(err) => {
                    tracing::warn!(key = %key, error = %err, "stored catalog is corrupt; starting empty");
                    back_up_corrupt(&backend, &key, &raw);
                    Vec::new()
                }
            },
        };

        Ok(Self {
            backend,
            key,
            products,
        })
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id() == id)
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Replace the product with the same id in place, or append it.
    pub fn save(&mut self, product: Product) -> Result<SaveOutcome, CatalogError> {
        let mut next = self.products.clone();
        let outcome = match next.iter_mut().find(|p| p.id() == product.id()) {
            Some(slot) => {
                *slot = product;
                SaveOutcome::Replaced
            }
            None => {
                next.push(product);
                SaveOutcome::Inserted
            }
        };

        self.commit(next)?;
        Ok(outcome)
    }

    /// Remove one product. Absent ids are a no-op and do not touch storage.
    pub fn delete(&mut self, id: ProductId) -> Result<Option<Product>, CatalogError> {
        let Some(index) = self.products.iter().position(|p| p.id() == id) else {
            return Ok(None);
        };

        let mut next = self.products.clone();
        let removed = next.remove(index);
        self.commit(next)?;
        Ok(Some(removed))
    }

    /// Remove every selected product and clear the selection.
    ///
    /// Survivors keep their relative order. Returns the number removed. On a
    /// failed write the selection is kept so the user can retry.
    pub fn bulk_delete(&mut self, selection: &mut Selection) -> Result<usize, CatalogError> {
        let next: Vec<Product> = self
            .products
            .iter()
            .filter(|p| !selection.contains(p.id()))
            .cloned()
            .collect();
        let removed = self.products.len() - next.len();

        self.commit(next)?;
        selection.clear();
        Ok(removed)
    }

    fn commit(&mut self, next: Vec<Product>) -> Result<(), CatalogError> {
        let snapshot = serde_json::to_string(&next)?;
        if let Err(err) = self.backend.set(&self.key, &snapshot) {
            tracing::error!(key = %self.key, error = %err, "failed to persist catalog");
            return Err(err.into());
        }
        tracing::debug!(key = %self.key, count = next.len(), "catalog persisted");
        self.products = next;
        Ok(())
    }
}

fn back_up_corrupt<S: KeyValueStore>(backend: &S, key: &str, raw: &str) {
    let backup = format!("{key}{CORRUPT_SUFFIX}");
    if let Err(err) = backend.set(&backup, raw) {
        tracing::warn!(key = %backup, error = %err, "failed to back up corrupt catalog");
    }
}

fn dedupe_by_id(products: Vec<Product>) -> Vec<Product> {
    let mut seen = HashSet::with_capacity(products.len());
    let before = products.len();
    let unique: Vec<Product> = products
        .into_iter()
        .filter(|p| seen.insert(p.id()))
        .collect();
    if unique.len() != before {
        tracing::warn!(dropped = before - unique.len(), "stored catalog had duplicate ids");
    }
    unique
}
