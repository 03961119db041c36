// ABOUTME: TTL plan cache with request coalescing and background expiry sweeping
// ABOUTME: Concurrent misses on one fingerprint share a single spawned computation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach

/// Canonical request fingerprinting
pub mod fingerprint;

pub use fingerprint::PlanFingerprint;

use crate::config::CacheSettings;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::Instant;
use tracing::{debug, info};

/// Published outcome of an in-flight computation
enum ComputeState<T> {
    Pending,
    Ready(T),
    Failed(AppError),
}

struct CacheEntry<T> {
    value: T,
    expires_at: Instant,
}

impl<T> CacheEntry<T> {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// TTL cache over computed plans, keyed by request fingerprint
///
/// Concurrent `get_or_compute` calls for the same fingerprint coalesce: the
/// first caller becomes the leader and spawns the computation, everyone else
/// awaits the shared outcome. The computation runs on its own task, so a
/// cancelled caller never cancels work other callers are waiting on. Failures
/// fan out to every waiter and leave the key uncached; the next request
/// simply retries.
pub struct PlanCache<T> {
    store: Arc<DashMap<String, CacheEntry<T>>>,
    inflight: Arc<DashMap<String, watch::Receiver<ComputeState<T>>>>,
    ttl: Duration,
    max_entries: usize,
    shutdown: Option<mpsc::Sender<()>>,
}

impl<T: Clone + Send + Sync + 'static> PlanCache<T> {
    /// Create a cache from settings, optionally spawning the background
    /// sweep task
    ///
    /// Must be called within a tokio runtime when the background sweep is
    /// enabled.
    #[must_use]
    pub fn new(settings: &CacheSettings) -> Self {
        let store: Arc<DashMap<String, CacheEntry<T>>> = Arc::new(DashMap::new());
        let shutdown = if settings.enable_background_sweep {
            Some(spawn_sweeper(Arc::clone(&store), settings.sweep_interval()))
        } else {
            None
        };
        info!(
            ttl_secs = settings.plan_ttl_secs,
            max_entries = settings.max_entries,
            background_sweep = settings.enable_background_sweep,
            "Plan cache initialized"
        );
        Self {
            store,
            inflight: Arc::new(DashMap::new()),
            ttl: settings.plan_ttl(),
            max_entries: settings.max_entries,
            shutdown,
        }
    }

    /// Return the cached value or compute it, coalescing concurrent misses
    ///
    /// # Errors
    ///
    /// Propagates the computation's error to every coalesced waiter
    pub async fn get_or_compute<F, Fut>(
        &self,
        fingerprint: &PlanFingerprint,
        compute: F,
    ) -> AppResult<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<T>> + Send + 'static,
    {
        let key = fingerprint.as_str().to_owned();
        if let Some(value) = self.lookup(fingerprint) {
            AppLogger::log_cache_event(&key, true);
            return Ok(value);
        }
        AppLogger::log_cache_event(&key, false);

        let mut rx = match self.inflight.entry(key.clone()) {
            Entry::Occupied(occupied) => occupied.get().clone(),
            Entry::Vacant(vacant) => {
                let (tx, rx) = watch::channel(ComputeState::Pending);
                vacant.insert(rx.clone());

                let store = Arc::clone(&self.store);
                let inflight = Arc::clone(&self.inflight);
                let ttl = self.ttl;
                let max_entries = self.max_entries;
                let task_key = key;
                let fut = compute();
                // The computation runs detached so a cancelled caller never
                // aborts work other waiters share
                tokio::spawn(async move {
                    match fut.await {
                        Ok(value) => {
                            insert_bounded(&store, &task_key, value.clone(), ttl, max_entries);
                            let _ = tx.send(ComputeState::Ready(value));
                        }
                        Err(err) => {
                            let _ = tx.send(ComputeState::Failed(err));
                        }
                    }
                    inflight.remove(&task_key);
                });
                rx
            }
        };

        let state = rx
            .wait_for(|s| !matches!(s, ComputeState::Pending))
            .await
            .map_err(|_| {
                AppError::internal("plan computation task ended without publishing a result")
            })?;
        match &*state {
            ComputeState::Ready(value) => Ok(value.clone()),
            ComputeState::Failed(err) => Err(err.duplicate()),
            ComputeState::Pending => Err(AppError::internal("pending state after wait")),
        }
    }

    /// Non-computing lookup with lazy expiry
    #[must_use]
    pub fn lookup(&self, fingerprint: &PlanFingerprint) -> Option<T> {
        let key = fingerprint.as_str();
        let now = Instant::now();
        if let Some(entry) = self.store.get(key) {
            if !entry.is_expired(now) {
                return Some(entry.value.clone());
            }
        }
        // Expired entries are dropped on access, not just by the sweeper
        self.store
            .remove_if(key, |_, entry| entry.is_expired(now));
        None
    }

    /// Insert a value directly, bypassing computation
    pub fn insert(&self, fingerprint: &PlanFingerprint, value: T) {
        insert_bounded(
            &self.store,
            fingerprint.as_str(),
            value,
            self.ttl,
            self.max_entries,
        );
    }

    /// Drop a cached entry, if present
    pub fn invalidate(&self, fingerprint: &PlanFingerprint) {
        self.store.remove(fingerprint.as_str());
    }

    /// Drop every cached entry
    pub fn clear(&self) {
        self.store.clear();
    }

    /// Number of cached entries, expired ones included until swept
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Remove expired entries now
    pub fn sweep_expired(&self) {
        sweep(&self.store);
    }
}

impl<T> Drop for PlanCache<T> {
    fn drop(&mut self) {
        if let Some(tx) = &self.shutdown {
            let _ = tx.try_send(());
        }
    }
}

/// Insert with capacity enforcement: sweep expired first, then evict the
/// entry closest to expiry
fn insert_bounded<T>(
    store: &DashMap<String, CacheEntry<T>>,
    key: &str,
    value: T,
    ttl: Duration,
    max_entries: usize,
) {
    if store.len() >= max_entries && !store.contains_key(key) {
        sweep(store);
        if store.len() >= max_entries {
            let oldest = store
                .iter()
                .min_by_key(|entry| entry.value().expires_at)
                .map(|entry| entry.key().clone());
            if let Some(oldest_key) = oldest {
                store.remove(&oldest_key);
                debug!(key = %oldest_key, "Evicted cache entry at capacity");
            }
        }
    }
    store.insert(
        key.to_owned(),
        CacheEntry {
            value,
            expires_at: Instant::now() + ttl,
        },
    );
}

fn sweep<T>(store: &DashMap<String, CacheEntry<T>>) {
    let now = Instant::now();
    let before = store.len();
    store.retain(|_, entry| !entry.is_expired(now));
    let removed = before - store.len();
    if removed > 0 {
        debug!(removed, "Swept expired plan cache entries");
    }
}

/// Periodic expiry sweep with a shutdown channel; the returned sender stops
/// the task when signalled or dropped
fn spawn_sweeper<T: Send + Sync + 'static>(
    store: Arc<DashMap<String, CacheEntry<T>>>,
    interval: Duration,
) -> mpsc::Sender<()> {
    let (tx, mut rx) = mpsc::channel(1);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            tokio::select! {
                _ = ticker.tick() => sweep(&store),
                _ = rx.recv() => {
                    debug!("Plan cache sweeper shutting down");
                    break;
                }
            }
        }
    });
    tx
}
