// This file is licensed under the Apache-2.0 License, see license file

use std::path::Path;
use std::sync::{Arc, Mutex};

use terrain_core::StoreError;
use tracing::info;

use crate::{options::StoreOptions, Store};

static STORE_SLOT: Mutex<Option<Arc<Store>>> = Mutex::new(None);

/// Opens the embedded store at `path` and installs it as the process-wide
/// singleton. Re-initialising a live store is an error; callers must
/// `shutdown` first.
pub fn initialize(path: impl AsRef<Path>, options: Option<StoreOptions>) -> Result<(), StoreError> {
	let mut slot = STORE_SLOT.lock().expect("store lock poisoned");
	if slot.is_some() {
		return Err(StoreError::AlreadyInitialized);
	}

	let store = Store::open(path.as_ref(), &options.unwrap_or_default())?;
	info!(path = %path.as_ref().display(), "terrain store initialized");
	*slot = Some(Arc::new(store));
	Ok(())
}

/// Tears down the process-wide singleton. Idempotent in the sense that a
/// second call fails cleanly rather than panicking.
pub fn shutdown() -> Result<(), StoreError> {
	let mut slot = STORE_SLOT.lock().expect("store lock poisoned");
	if slot.take().is_none() {
		return Err(StoreError::NotInitialized);
	}
	info!("terrain store shut down");
	Ok(())
}

/// Returns a shared handle onto the singleton store.
pub fn handle() -> Result<Arc<Store>, StoreError> {
	let slot = STORE_SLOT.lock().expect("store lock poisoned");
	slot.clone().ok_or(StoreError::NotInitialized)
}
