//! Hook for typed localStorage persistence with automatic save on change.

use serde::{de::DeserializeOwned, Serialize};
use yew::prelude::*;

/// Return value from the local-storage hooks.
pub struct UseLocalStorage<T: Clone + PartialEq + 'static> {
    /// Current value
    pub value: T,
    /// Set a new value (automatically persists to localStorage)
    pub set: Callback<T>,
}

/// Load a value from localStorage
fn load_from_storage<T: DeserializeOwned>(key: &str) -> Option<T> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(key).ok().flatten())
        .and_then(|json| serde_json::from_str(&json).ok())
}

/// Save a value to localStorage
fn save_to_storage<T: Serialize>(key: &str, value: &T) {
    if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
        if let Ok(json) = serde_json::to_string(value) {
            let _ = storage.set_item(key, &json);
        }
    }
}

/// Hook for managing state that persists to localStorage, with an explicit
/// default for slots whose empty value is not `T::default()` (e.g. the
/// voice name).
///
/// The value is loaded from localStorage on mount and saved whenever it
/// changes. If no value exists in localStorage (or it fails to parse), the
/// given default is used.
#[hook]
pub fn use_local_storage_or<T>(key: &'static str, default: T) -> UseLocalStorage<T>
where
    T: Clone + PartialEq + Serialize + DeserializeOwned + 'static,
{
    let state = use_state(|| load_from_storage::<T>(key).unwrap_or(default));

    let set = {
        let state = state.clone();
        Callback::from(move |new_value: T| {
            save_to_storage(key, &new_value);
            state.set(new_value);
        })
    };

    UseLocalStorage {
        value: (*state).clone(),
        set,
    }
}

/// [`use_local_storage_or`] with `T::default()` as the fallback.
///
/// # Example
/// ```ignore
/// let tools = use_local_storage::<ToolsState>("tools");
/// // Access current value
/// let grounding = tools.value.grounding;
/// // Update value (automatically persists)
/// tools.set.emit(ToolsState { grounding: true, ..tools.value });
/// ```
#[hook]
pub fn use_local_storage<T>(key: &'static str) -> UseLocalStorage<T>
where
    T: Clone + PartialEq + Serialize + DeserializeOwned + Default + 'static,
{
    use_local_storage_or(key, T::default())
}
