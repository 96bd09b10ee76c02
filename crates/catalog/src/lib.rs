//! Product catalog widget core.
//!
//! This crate holds the product model, the persisted catalog store, the
//! filter → sort → paginate view pipeline, checkbox selection, add/edit form
//! sessions and the [`InventoryWidget`] container that ties them together.
//! It has no UI and no storage backend of its own: callers inject a
//! [`KeyValueStore`] and a [`Prompt`].

pub mod config;
pub mod form;
pub mod ids;
pub mod kv;
pub mod product;
pub mod prompt;
pub mod selection;
pub mod store;
pub mod view;
pub mod widget;

pub use config::{DeletePolicy, WidgetConfig};
pub use form::{FormField, FormMode, INVALID_PRODUCT_MESSAGE, ProductDraft, ProductForm};
pub use ids::{ClockIds, IdSource, SequentialIds};
pub use kv::{InMemoryKvStore, KeyValueStore, StorageError};
pub use product::{Price, Product};
pub use prompt::{LogPrompt, Prompt};
pub use selection::Selection;
pub use store::{CatalogError, CatalogStore, DEFAULT_STORAGE_KEY, SaveOutcome};
pub use view::{
    PAGE_SIZE_OPTIONS, PageView, SortConfig, SortDirection, SortIndicator, SortKey, ViewParams,
};
pub use widget::{DELETE_CANCELLED_MESSAGE, DeleteOutcome, InventoryWidget};

pub use stockdesk_core::{DomainError, DomainResult, Entity, ProductId};
