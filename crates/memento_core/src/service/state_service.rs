//! State persistence use-cases.
//!
//! # Responsibility
//! - Save, load and clear the single persisted state token.
//!
//! # Invariants
//! - Stored values are always `codec::encode_state` tokens.
//! - A missing or undecodable token loads as `None`; only storage failures
//!   are errors.

use crate::codec::{encode_state, try_decode_state};
use crate::config::STORAGE_KEY;
use crate::model::input::AppInputState;
use crate::store::{StateStore, StoreResult};
use log::{info, warn};

/// Persistence service over any `StateStore`.
pub struct StateService<S: StateStore> {
    store: S,
}

impl<S: StateStore> StateService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Encodes and stores `state` under `STORAGE_KEY`, replacing any prior value.
    pub fn save_state(&self, state: &AppInputState) -> StoreResult<()> {
        let token = encode_state(state);
        self.store.set(STORAGE_KEY, &token)?;
        info!(
            "event=state_save module=service status=ok bytes={} categories={}",
            token.len(),
            state.categories.len()
        );
        Ok(())
    }

    /// Loads the stored state.
    ///
    /// Returns `Ok(None)` when nothing is stored or the stored token no
    /// longer decodes (e.g. written by an older schema version).
    pub fn load_state(&self) -> StoreResult<Option<AppInputState>> {
        let Some(token) = self.store.get(STORAGE_KEY)? else {
            info!("event=state_load module=service status=ok found=false");
            return Ok(None);
        };

        match try_decode_state(&token) {
            Ok(state) => {
                info!("event=state_load module=service status=ok found=true");
                Ok(Some(state))
            }
            Err(err) => {
                warn!(
                    "event=state_load module=service status=error error_code={} error={}",
                    err.code(),
                    err
                );
                Ok(None)
            }
        }
    }

    /// Deletes the stored state; returns whether anything was removed.
    pub fn clear_state(&self) -> StoreResult<bool> {
        let removed = self.store.remove(STORAGE_KEY)?;
        info!("event=state_clear module=service status=ok removed={removed}");
        Ok(removed)
    }
}
