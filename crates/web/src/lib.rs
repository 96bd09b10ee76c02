//! `stockdesk-web`
//!
//! **Responsibility:** host bindings for the catalog widget.
//!
//! - In the browser (wasm32): `localStorage` persistence, `window.confirm` /
//!   `window.alert` dialogs and the Leptos frontend.
//! - On native hosts: a JSON file key/value store under the OS data directory.
//!
//! All catalog behaviour lives in `stockdesk-catalog`; this crate only wires
//! it to a concrete storage backend and UI.

#[cfg(target_arch = "wasm32")]
pub mod dialogs;
#[cfg(not(target_arch = "wasm32"))]
pub mod file_store;
#[cfg(target_arch = "wasm32")]
pub mod frontend;
#[cfg(target_arch = "wasm32")]
pub mod storage;

#[cfg(target_arch = "wasm32")]
pub use dialogs::BrowserPrompt;
#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileKvStore;
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorageStore;
