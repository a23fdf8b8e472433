//! Store handle management
//!
//! A [`ConnectionManager`] is built once per process and shared by
//! reference. It lazily builds a sqlx `PgPool` and remembers the Tokio
//! runtime that was current at build time. A pool belongs to the runtime
//! that spawned its connections, so when that runtime has shut down (a test
//! harness or a host that recycles runtimes between requests) the pool is
//! discarded and rebuilt on the next access.

use std::future::Future;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use super::DbError;
use crate::config::StoreConfig;

/// How long a statement waits for a free connection.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// Observes shutdown of the runtime it was created on.
///
/// A sentinel task parked on that runtime owns the sender half of a
/// oneshot channel. Runtime shutdown drops the task, which closes the
/// channel.
struct RuntimeWatch {
    closed: oneshot::Receiver<()>,
    sentinel: JoinHandle<()>,
}

impl RuntimeWatch {
    fn on(runtime: &Handle) -> Self {
        let (tx, closed) = oneshot::channel::<()>();
        let sentinel = runtime.spawn(async move {
            let _tx = tx;
            std::future::pending::<()>().await;
        });
        Self { closed, sentinel }
    }

    fn is_closed(&mut self) -> bool {
        matches!(
            self.closed.try_recv(),
            Err(oneshot::error::TryRecvError::Closed)
        )
    }
}

impl Drop for RuntimeWatch {
    fn drop(&mut self) {
        self.sentinel.abort();
    }
}

struct Slot {
    pool: PgPool,
    generation: u64,
    watch: RuntimeWatch,
}

impl Slot {
    fn is_stale(&mut self) -> bool {
        self.pool.is_closed() || self.watch.is_closed()
    }
}

/// Lazily built, self-healing store handle.
pub struct ConnectionManager {
    config: StoreConfig,
    slot: Mutex<Option<Slot>>,
    generation: AtomicU64,
}

impl ConnectionManager {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            slot: Mutex::new(None),
            generation: AtomicU64::new(0),
        }
    }

    /// Return the shared pool, building it on first use or when the
    /// previous one went stale.
    ///
    /// Construction is synchronous (no connection is opened here) and
    /// serialized, so concurrent callers always receive a usable pool.
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// [`DbError::Config`] when the store URL or credential is missing or
    /// the URL does not parse, [`DbError::NoRuntime`] when called outside a
    /// Tokio runtime.
    pub fn handle(&self) -> Result<PgPool, DbError> {
        self.current().map(|(pool, _)| pool)
    }

    fn current(&self) -> Result<(PgPool, u64), DbError> {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(existing) = slot.as_mut() {
            if !existing.is_stale() {
                return Ok((existing.pool.clone(), existing.generation));
            }
            tracing::warn!(
                generation = existing.generation,
                "store handle is stale, rebuilding"
            );
        }

        let (pool, watch) = self.build()?;
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::info!(generation, "store handle created");

        *slot = Some(Slot {
            pool: pool.clone(),
            generation,
            watch,
        });
        Ok((pool, generation))
    }

    fn build(&self) -> Result<(PgPool, RuntimeWatch), DbError> {
        let url = self
            .config
            .url
            .as_deref()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| DbError::Config("missing DATABASE_URL".to_string()))?;
        let credential = self
            .config
            .credential
            .as_deref()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| DbError::Config("missing DATABASE_AUTH_TOKEN".to_string()))?;

        let mut options = PgConnectOptions::from_str(url)
            .map_err(|e| DbError::Config(format!("invalid DATABASE_URL: {}", e)))?
            .password(credential);
        if let Some(schema) = self.config.schema.as_deref() {
            options = options.options([("search_path", schema)]);
        }

        // sqlx spawns pool maintenance onto the current runtime
        let runtime = Handle::try_current().map_err(|_| DbError::NoRuntime)?;

        let pool = PgPoolOptions::new()
            .max_connections(self.config.max_connections.max(1))
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_lazy_with(options);
        Ok((pool, RuntimeWatch::on(&runtime)))
    }

    /// Drop the memoized pool if it is still the one from `generation`.
    fn discard(&self, generation: u64) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.as_ref().is_some_and(|s| s.generation == generation) {
            *slot = None;
        }
    }

    /// Run one store operation.
    ///
    /// If it fails because the pool's execution context is gone, the pool
    /// is rebuilt and the operation retried exactly once. Every other
    /// failure is returned as is.
    pub async fn run<T, F, Fut>(&self, op: F) -> Result<T, DbError>
    where
        F: Fn(PgPool) -> Fut,
        Fut: Future<Output = Result<T, sqlx::Error>>,
    {
        let (pool, generation) = self.current()?;
        match op(pool).await {
            Err(err) if is_context_closed(&err) => {
                tracing::warn!(error = %err, generation, "store context closed, retrying once");
                self.discard(generation);
                let pool = self.handle()?;
                Ok(op(pool).await?)
            }
            result => Ok(result?),
        }
    }

    /// Close the pool and forget it. A later `handle()` builds a new one.
    ///
    /// Meant for process shutdown and one-off scripts, not per request.
    pub async fn close(&self) {
        let slot = self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if let Some(slot) = slot {
            slot.pool.close().await;
            tracing::info!(generation = slot.generation, "store handle closed");
        }
    }

    /// Number of pools built so far.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}

fn is_context_closed(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::PoolClosed | sqlx::Error::WorkerCrashed)
}
