//! Session-scoped key/value storage.
//!
//! In the browser this is `window.sessionStorage`, which survives reloads of
//! the tab but not the tab itself. Native builds get an inert store that
//! never holds anything.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

/// Session-scoped string storage.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    /// Remove every entry.
    fn clear(&self);
}

/// `window.sessionStorage`. Failures (storage disabled, quota) are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSessionStorage;

#[cfg(feature = "csr")]
fn session_storage() -> Option<web_sys::Storage> {
    web_sys::window()
        .and_then(|w| w.session_storage().ok().flatten())
}

impl SessionStore for BrowserSessionStorage {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            session_storage()
                .and_then(|s| s.get_item(key).ok().flatten())
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = session_storage() {
                if storage.set_item(key, value).is_err() {
                    log::warn!("sessionStorage rejected write for key {key}");
                }
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (key, value);
        }
    }

    fn clear(&self) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = session_storage() {
                let _ = storage.clear();
            }
        }
    }
}
