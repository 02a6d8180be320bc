//! Custom Yew hooks for the frontend application.
//!
//! These hooks encapsulate reusable state logic to keep components clean and focused.

mod use_local_storage;

pub use use_local_storage::{use_local_storage, use_local_storage_or};
