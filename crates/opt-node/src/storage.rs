//! Event and settings storage.
//!
//! [`MemoryStore`] keeps both event streams and the settings record behind a
//! single `parking_lot::RwLock`. When opened on a path it also writes a JSON
//! snapshot after every mutation and reloads it on the next open; a store
//! built with [`MemoryStore::new`] never touches the filesystem.
//!
//! A persistent mutation is applied to a copy of the state, written out, and
//! only then swapped in. A failed write leaves memory and disk unchanged.
//!
//! Readers (the query service) take the read lock only for the duration of a
//! fetch and compute on owned copies, so scoring never blocks writers.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use opt_core::calendar::{midnight, shift_forward};
use opt_core::constants::{DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use opt_core::error::{OptError, StoreError, ValidationError};
use opt_core::traits::{EventSource, SettingsStore};
use opt_core::types::{Action, Exposure, NewAction, NewExposure, Settings};

/// Filter and paging for list operations.
///
/// `start` and `end` are inclusive calendar days. A `limit` of `None` means
/// the default page size for actions and no limit for exposures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub limit: Option<usize>,
    pub offset: usize,
}

impl ListQuery {
    fn admits(&self, at: &NaiveDateTime) -> bool {
        let after_start = self.start.is_none_or(|s| *at >= midnight(s));
        let before_end = self.end.is_none_or(|e| *at < midnight(shift_forward(e, 1)));
        after_start && before_end
    }

    fn checked_limit(&self, default: Option<usize>) -> Result<Option<usize>, ValidationError> {
        match self.limit {
            Some(got) if got == 0 || got > MAX_LIST_LIMIT => Err(ValidationError::Limit {
                got,
                max: MAX_LIST_LIMIT,
            }),
            Some(got) => Ok(Some(got)),
            None => Ok(default),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreState {
    #[serde(default)]
    last_action_id: u64,
    #[serde(default)]
    last_exposure_id: u64,
    #[serde(default)]
    actions: BTreeMap<u64, Action>,
    #[serde(default)]
    exposures: BTreeMap<u64, Exposure>,
    #[serde(default)]
    settings: Option<Settings>,
}

impl StoreState {
    fn next_action_id(&mut self) -> u64 {
        self.last_action_id += 1;
        self.last_action_id
    }

    fn next_exposure_id(&mut self) -> u64 {
        self.last_exposure_id += 1;
        self.last_exposure_id
    }
}

/// In-process store for actions, exposures, and the settings record.
pub struct MemoryStore {
    state: RwLock<StoreState>,
    snapshot: Option<PathBuf>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// An empty store with no backing file.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
            snapshot: None,
        }
    }

    /// Open a store backed by the snapshot file at `path`.
    ///
    /// Creates parent directories as needed. A missing file yields an empty
    /// store; an unreadable or malformed one is an error.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, OptError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(backend)?;
        }

        let state = if path.exists() {
            let raw = fs::read(&path).map_err(backend)?;
            serde_json::from_slice::<StoreState>(&raw).map_err(backend)?
        } else {
            StoreState::default()
        };

        info!(
            path = %path.display(),
            actions = state.actions.len(),
            exposures = state.exposures.len(),
            "opened event store"
        );

        Ok(Self {
            state: RwLock::new(state),
            snapshot: Some(path),
        })
    }

    /// Whether mutations are written to disk.
    pub fn is_persistent(&self) -> bool {
        self.snapshot.is_some()
    }

    // ------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------

    /// Validate and record a new action.
    pub fn insert_action(&self, new: NewAction) -> Result<Action, OptError> {
        new.validate()?;
        let action = self.commit(|state| {
            let id = state.next_action_id();
            let action = new.into_action(id);
            state.actions.insert(id, action.clone());
            Ok(action)
        })?;
        debug!(id = action.id, o_delta = action.o_delta(), "recorded action");
        Ok(action)
    }

    /// Replace every field of an existing action.
    pub fn update_action(&self, id: u64, new: NewAction) -> Result<Action, OptError> {
        new.validate()?;
        let action = self.commit(|state| {
            let slot = state
                .actions
                .get_mut(&id)
                .ok_or(StoreError::ActionNotFound(id))?;
            *slot = new.into_action(id);
            Ok(slot.clone())
        })?;
        debug!(id, "updated action");
        Ok(action)
    }

    pub fn get_action(&self, id: u64) -> Result<Action, OptError> {
        self.state
            .read()
            .actions
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::ActionNotFound(id).into())
    }

    pub fn delete_action(&self, id: u64) -> Result<(), OptError> {
        self.commit(|state| {
            state
                .actions
                .remove(&id)
                .map(drop)
                .ok_or_else(|| StoreError::ActionNotFound(id).into())
        })?;
        debug!(id, "deleted action");
        Ok(())
    }

    /// Actions matching `query`, newest first.
    pub fn list_actions(&self, query: &ListQuery) -> Result<Vec<Action>, OptError> {
        let limit = query.checked_limit(Some(DEFAULT_LIST_LIMIT))?;
        let state = self.state.read();
        let mut matched: Vec<&Action> = state
            .actions
            .values()
            .filter(|a| query.admits(&a.occurred_at))
            .collect();
        matched.sort_by(|a, b| (b.occurred_at, b.id).cmp(&(a.occurred_at, a.id)));
        Ok(page(matched, query.offset, limit))
    }

    // ------------------------------------------------------------------
    // Exposures
    // ------------------------------------------------------------------

    pub fn insert_exposure(&self, new: NewExposure) -> Result<Exposure, OptError> {
        new.validate()?;
        let exposure = self.commit(|state| {
            let id = state.next_exposure_id();
            let exposure = new.into_exposure(id);
            state.exposures.insert(id, exposure.clone());
            Ok(exposure)
        })?;
        debug!(id = exposure.id, kind = %exposure.kind, "recorded exposure");
        Ok(exposure)
    }

    pub fn delete_exposure(&self, id: u64) -> Result<(), OptError> {
        self.commit(|state| {
            state
                .exposures
                .remove(&id)
                .map(drop)
                .ok_or_else(|| StoreError::ExposureNotFound(id).into())
        })?;
        debug!(id, "deleted exposure");
        Ok(())
    }

    /// Exposures matching `query`, newest first.
    pub fn list_exposures(&self, query: &ListQuery) -> Result<Vec<Exposure>, OptError> {
        let limit = query.checked_limit(None)?;
        let state = self.state.read();
        let mut matched: Vec<&Exposure> = state
            .exposures
            .values()
            .filter(|x| query.admits(&x.occurred_at))
            .collect();
        matched.sort_by(|a, b| (b.occurred_at, b.id).cmp(&(a.occurred_at, a.id)));
        Ok(page(matched, query.offset, limit))
    }

    pub fn action_count(&self) -> usize {
        self.state.read().actions.len()
    }

    pub fn exposure_count(&self) -> usize {
        self.state.read().exposures.len()
    }

    // ------------------------------------------------------------------
    // Internal helpers
    // ------------------------------------------------------------------

    /// Apply `mutate` under the write lock.
    ///
    /// With a snapshot, `mutate` runs on a copy that replaces the live state
    /// only once it is on disk. Without one it runs in place, so it must not
    /// fail after it has started mutating.
    fn commit<T>(
        &self,
        mutate: impl FnOnce(&mut StoreState) -> Result<T, OptError>,
    ) -> Result<T, OptError> {
        let mut state = self.state.write();
        let Some(path) = &self.snapshot else {
            return mutate(&mut *state);
        };
        let mut next = state.clone();
        let out = mutate(&mut next)?;
        write_snapshot(path, &next)?;
        *state = next;
        Ok(out)
    }
}

/// Write `state` to `path` via a temp file and rename.
fn write_snapshot(path: &Path, state: &StoreState) -> Result<(), OptError> {
    let tmp = path.with_extension("json.tmp");
    let encoded = serde_json::to_vec(state).map_err(backend)?;
    fs::write(&tmp, encoded)
        .and_then(|()| fs::rename(&tmp, path))
        .map_err(|e| {
            warn!(path = %path.display(), error = %e, "failed to write store snapshot");
            backend(e)
        })
}

fn page<T: Clone>(items: Vec<&T>, offset: usize, limit: Option<usize>) -> Vec<T> {
    let rest = items.into_iter().skip(offset);
    match limit {
        Some(n) => rest.take(n).cloned().collect(),
        None => rest.cloned().collect(),
    }
}

fn backend(e: impl std::fmt::Display) -> OptError {
    StoreError::Backend(e.to_string()).into()
}

impl EventSource for MemoryStore {
    fn actions_between(
        &self,
        from: NaiveDateTime,
        to_exclusive: NaiveDateTime,
    ) -> Result<Vec<Action>, OptError> {
        let state = self.state.read();
        let mut out: Vec<Action> = state
            .actions
            .values()
            .filter(|a| a.occurred_at >= from && a.occurred_at < to_exclusive)
            .cloned()
            .collect();
        out.sort_by_key(|a| (a.occurred_at, a.id));
        Ok(out)
    }

    fn exposures_between(
        &self,
        from: NaiveDateTime,
        to_exclusive: NaiveDateTime,
    ) -> Result<Vec<Exposure>, OptError> {
        let state = self.state.read();
        let mut out: Vec<Exposure> = state
            .exposures
            .values()
            .filter(|x| x.occurred_at >= from && x.occurred_at < to_exclusive)
            .cloned()
            .collect();
        out.sort_by_key(|x| (x.occurred_at, x.id));
        Ok(out)
    }
}

impl SettingsStore for MemoryStore {
    fn load_settings(&self) -> Result<Option<Settings>, OptError> {
        Ok(self.state.read().settings.clone())
    }

    fn store_settings(&self, settings: &Settings) -> Result<(), OptError> {
        self.commit(|state| {
            state.settings = Some(settings.clone());
            Ok(())
        })
    }
}
