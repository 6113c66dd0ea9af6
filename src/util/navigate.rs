//! Full-page navigation away from the chat client.

/// Leaves the current page.
pub trait Navigator {
    fn redirect(&self, path: &str);
}

/// Navigates via `window.location`. No-op outside the browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn redirect(&self, path: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(window) = web_sys::window() {
                if window.location().set_href(path).is_err() {
                    log::warn!("redirect to {path} failed");
                }
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = path;
        }
    }
}
