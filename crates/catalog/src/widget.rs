//! The inventory widget: catalog store + view state + selection + form.
//!
//! Every method is a synchronous reaction to one user event. Mutations go
//! through the store (and are persisted) before the method returns, so the
//! next [`InventoryWidget::view`] always sees a consistent catalog.

use core::num::NonZeroUsize;

use stockdesk_core::{DomainError, Entity, ProductId};

use crate::config::{DeletePolicy, WidgetConfig};
use crate::form::{FormMode, INVALID_PRODUCT_MESSAGE, ProductForm};
use crate::ids::{ClockIds, IdSource};
use crate::kv::KeyValueStore;
use crate::product::Product;
use crate::prompt::Prompt;
use crate::selection::Selection;
use crate::store::{CatalogError, CatalogStore};
use crate::view::{self, PageView, SortConfig, SortIndicator, SortKey, ViewParams};

/// Acknowledgement shown when the user declines a delete.
pub const DELETE_CANCELLED_MESSAGE: &str = "Deletion cancelled.";

/// Result of a single-row delete.
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    Deleted(Product),
    /// The id was not in the catalog.
    Missing,
    /// The user answered "no" to the confirmation.
    Cancelled,
}

pub struct InventoryWidget<S> {
    store: CatalogStore<S>,
    params: ViewParams,
    selection: Selection,
    form: Option<ProductForm>,
    delete_policy: DeletePolicy,
    prompt: Box<dyn Prompt>,
    ids: Box<dyn IdSource>,
}

impl<S: KeyValueStore> core::fmt::Debug for InventoryWidget<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InventoryWidget")
            .field("key", &self.store.key())
            .field("products", &self.store.products().len())
            .field("params", &self.params)
            .field("selection", &self.selection)
            .field("form", &self.form)
            .field("delete_policy", &self.delete_policy)
            .finish_non_exhaustive()
    }
}

impl<S: KeyValueStore> InventoryWidget<S> {
    /// Load the catalog from `backend` and start with default view state.
    pub fn open(
        backend: S,
        config: &WidgetConfig,
        prompt: impl Prompt + 'static,
    ) -> Result<Self, CatalogError> {
        let store = CatalogStore::load(backend, config.storage_key.clone())?;
        let params = ViewParams {
            page_size: config.default_page_size,
            ..ViewParams::default()
        };

        Ok(Self {
            store,
            params,
            selection: Selection::new(),
            form: None,
            delete_policy: config.delete_policy,
            prompt: Box::new(prompt),
            ids: Box::new(ClockIds::new()),
        })
    }

    /// Replace the id generator (tests use deterministic ids).
    pub fn with_id_source(mut self, ids: impl IdSource + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    // ---- read side -------------------------------------------------------

    /// The current page after filter → sort → paginate.
    pub fn view(&self) -> PageView<'_> {
        view::render(self.store.products(), &self.params)
    }

    pub fn products(&self) -> &[Product] {
        self.store.products()
    }

    pub fn store(&self) -> &CatalogStore<S> {
        &self.store
    }

    pub fn params(&self) -> &ViewParams {
        &self.params
    }

    pub fn sort_config(&self) -> Option<SortConfig> {
        self.params.sort
    }

    pub fn sort_indicator(&self, key: SortKey) -> SortIndicator {
        SortIndicator::of(self.params.sort, key)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn is_selected(&self, id: ProductId) -> bool {
        self.selection.contains(id)
    }

    /// Header checkbox state: every row on the current page is selected.
    pub fn all_visible_selected(&self) -> bool {
        self.selection.all_selected(self.view().row_ids())
    }

    pub fn can_bulk_delete(&self) -> bool {
        !self.selection.is_empty()
    }

    pub fn delete_policy(&self) -> DeletePolicy {
        self.delete_policy
    }

    // ---- view parameters -------------------------------------------------

    /// Change the search text. Jumps back to the first page.
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.params.search = query.into();
        self.params.current_page = NonZeroUsize::MIN;
    }

    /// Header click on `key`.
    pub fn sort_by(&mut self, key: SortKey) -> SortConfig {
        let next = SortConfig::toggled(self.params.sort, key);
        self.params.sort = Some(next);
        next
    }

    /// Change the page size and reset to the first page.
    pub fn set_page_size(&mut self, size: usize) -> Result<(), DomainError> {
        let size = NonZeroUsize::new(size)
            .ok_or_else(|| DomainError::validation("page size must be positive"))?;
        self.params.page_size = size;
        self.params.current_page = NonZeroUsize::MIN;
        Ok(())
    }

    /// Jump to a page. Pages past the end are allowed and render empty.
    pub fn go_to_page(&mut self, page: usize) -> Result<(), DomainError> {
        self.params.current_page = NonZeroUsize::new(page)
            .ok_or_else(|| DomainError::validation("page numbers start at 1"))?;
        Ok(())
    }

    // ---- form sessions ---------------------------------------------------

    pub fn open_add(&mut self) {
        self.form = Some(ProductForm::blank());
    }

    pub fn open_edit(&mut self, id: ProductId) -> Result<(), DomainError> {
        let product = self.store.get(id).ok_or_else(DomainError::not_found)?;
        self.form = Some(ProductForm::for_product(product));
        Ok(())
    }

    pub fn form(&self) -> Option<&ProductForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut ProductForm> {
        self.form.as_mut()
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    /// Validate and save the open form.
    ///
    /// On a validation failure the user is alerted and the form stays open
    /// with its text intact; nothing is written.
    pub fn submit_form(&mut self) -> Result<Product, CatalogError> {
        let form = self
            .form
            .as_ref()
            .ok_or_else(|| DomainError::validation("no product form is open"))?;

        let draft = match form.validate() {
            Ok(draft) => draft,
            Err(err) => {
                tracing::debug!(error = %err, "product form rejected");
                self.prompt.alert(INVALID_PRODUCT_MESSAGE);
                return Err(err.into());
            }
        };

        let id = match form.mode() {
            FormMode::Add => self.fresh_id(),
            FormMode::Edit(id) => {
                // The product may have been deleted while the form was open.
                if !self.store.contains(id) {
                    return Err(DomainError::not_found().into());
                }
                id
            }
        };

        let product = draft.into_product(id)?;
        let outcome = self.store.save(product.clone())?;
        tracing::info!(id = %id, ?outcome, "product saved");
        self.form = None;
        Ok(product)
    }

    // ---- deletes & selection ---------------------------------------------

    pub fn delete(&mut self, id: ProductId) -> Result<DeleteOutcome, CatalogError> {
        let Some(product) = self.store.get(id) else {
            return Ok(DeleteOutcome::Missing);
        };

        if self.delete_policy == DeletePolicy::Confirm {
            let question = format!("Are you sure you want to delete \"{}\"?", product.name());
            if !self.prompt.confirm(&question) {
                tracing::warn!(id = %id, "delete declined");
                self.prompt.alert(DELETE_CANCELLED_MESSAGE);
                return Ok(DeleteOutcome::Cancelled);
            }
        }

        let outcome = match self.store.delete(id)? {
            Some(removed) => DeleteOutcome::Deleted(removed),
            None => DeleteOutcome::Missing,
        };
        self.selection.remove(id);
        self.clamp_page();
        Ok(outcome)
    }

    /// Row checkbox.
    pub fn toggle_select(&mut self, id: ProductId) -> bool {
        self.selection.toggle(id)
    }

    /// Header checkbox over the rows on the current page.
    pub fn toggle_select_all(&mut self) {
        let visible: Vec<ProductId> = self.view().row_ids().collect();
        self.selection.toggle_all(visible);
    }

    /// Delete every selected product. Does nothing while the selection is
    /// empty. Returns the number of products removed.
    pub fn bulk_delete(&mut self) -> Result<usize, CatalogError> {
        if self.selection.is_empty() {
            return Ok(0);
        }
        let removed = self.store.bulk_delete(&mut self.selection)?;
        tracing::info!(removed, "bulk delete");
        self.clamp_page();
        Ok(removed)
    }

    fn fresh_id(&mut self) -> ProductId {
        let mut id = self.ids.next_id();
        while self.store.contains(id) {
            id = id.successor();
        }
        id
    }

    /// Keep the current page inside `1..=page_count` after the result set
    /// shrinks.
    fn clamp_page(&mut self) {
        let total = view::filter(self.store.products(), &self.params.search).len();
        let last = view::page_count(total, self.params.page_size).max(1);
        if self.params.current_page.get() > last {
            self.params.current_page = NonZeroUsize::new(last).unwrap_or(NonZeroUsize::MIN);
        }
    }
}
