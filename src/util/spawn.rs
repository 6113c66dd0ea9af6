//! Spawning controller tasks onto the page's event loop.

use futures::future::LocalFutureObj;
use futures::task::{LocalSpawn, SpawnError};

/// [`LocalSpawn`] over `wasm_bindgen_futures::spawn_local`.
///
/// Native builds have no event loop to run on; spawns are refused.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSpawner;

impl LocalSpawn for BrowserSpawner {
    fn spawn_local_obj(&self, future: LocalFutureObj<'static, ()>) -> Result<(), SpawnError> {
        #[cfg(feature = "csr")]
        {
            wasm_bindgen_futures::spawn_local(future);
            Ok(())
        }
        #[cfg(not(feature = "csr"))]
        {
            drop(future);
            Err(SpawnError::shutdown())
        }
    }
}
