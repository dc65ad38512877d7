//! Query cache with in-flight request deduplication
//!
//! Each cached query is identified by a [`QueryKey`] (endpoint plus
//! normalized parameters). While a request for a key is in flight, further
//! callers await the same shared future instead of issuing their own. Once it
//! resolves, success is cached until invalidated; failure is recorded but not
//! cached, so the next call goes back to the network.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use futures::future::{BoxFuture, FutureExt, Shared};

use crate::error::AkibaError;

/// Cache key: endpoint name and sorted parameters
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    endpoint: &'static str,
    params: BTreeMap<String, String>,
}

impl QueryKey {
    pub fn new(endpoint: &'static str) -> Self {
        Self {
            endpoint,
            params: BTreeMap::new(),
        }
    }

    pub fn param(mut self, name: &str, value: impl ToString) -> Self {
        self.params.insert(name.to_string(), value.to_string());
        self
    }

    pub fn endpoint(&self) -> &'static str {
        self.endpoint
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.endpoint)?;
        for (i, (name, value)) in self.params.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{}{}={}", sep, name, value)?;
        }
        Ok(())
    }
}

/// Observable state of one query
#[derive(Debug, Clone)]
pub enum QueryStatus<V> {
    /// Never requested, or invalidated
    Idle,
    Loading,
    Ready(Arc<V>),
    Failed(AkibaError),
}

impl<V> QueryStatus<V> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn data(&self) -> Option<&Arc<V>> {
        match self {
            Self::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&AkibaError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }
}

type SharedFetch<V> = Shared<BoxFuture<'static, Result<Arc<V>, AkibaError>>>;

enum Slot<V> {
    Loading {
        generation: u64,
        fetch: SharedFetch<V>,
    },
    Ready(Arc<V>),
    Failed(AkibaError),
}

struct Inner<V> {
    slots: HashMap<QueryKey, Slot<V>>,
    next_generation: u64,
}

/// Cache for one response type
pub struct QueryCache<V> {
    name: &'static str,
    inner: Mutex<Inner<V>>,
}

impl<V> QueryCache<V>
where
    V: Send + Sync + 'static,
{
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            inner: Mutex::new(Inner {
                slots: HashMap::new(),
                next_generation: 0,
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner<V>>, AkibaError> {
        self.inner
            .lock()
            .map_err(|e| AkibaError::Storage(format!("Failed to acquire cache lock: {}", e)))
    }

    /// Return the cached value, join an in-flight request, or start one
    ///
    /// `make` is only called when a new request is needed.
    pub async fn fetch<F, Fut>(&self, key: QueryKey, make: F) -> Result<Arc<V>, AkibaError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, AkibaError>> + Send + 'static,
    {
        let (generation, fetch) = {
            let mut inner = self.lock()?;
            let in_flight = match inner.slots.get(&key) {
                Some(Slot::Ready(data)) => {
                    tracing::debug!(cache = self.name, key = %key, "cache hit");
                    return Ok(Arc::clone(data));
                }
                Some(Slot::Loading { generation, fetch }) => Some((*generation, fetch.clone())),
                Some(Slot::Failed(_)) | None => None,
            };

            match in_flight {
                Some(joined) => {
                    tracing::debug!(cache = self.name, key = %key, "joining in-flight request");
                    joined
                }
                None => {
                    inner.next_generation += 1;
                    let generation = inner.next_generation;
                    let request = make();
                    let fetch = async move { request.await.map(Arc::new) }
                        .boxed()
                        .shared();
                    inner.slots.insert(
                        key.clone(),
                        Slot::Loading {
                            generation,
                            fetch: fetch.clone(),
                        },
                    );
                    tracing::debug!(cache = self.name, key = %key, "cache miss");
                    (generation, fetch)
                }
            }
        };

        let result = fetch.await;
        self.settle(&key, generation, &result)?;
        result
    }

    /// Store a finished result, unless the key was invalidated meanwhile
    fn settle(
        &self,
        key: &QueryKey,
        generation: u64,
        result: &Result<Arc<V>, AkibaError>,
    ) -> Result<(), AkibaError> {
        let mut inner = self.lock()?;
        let current = matches!(
            inner.slots.get(key),
            Some(Slot::Loading { generation: g, .. }) if *g == generation
        );
        if !current {
            return Ok(());
        }

        let slot = match result {
            Ok(data) => Slot::Ready(Arc::clone(data)),
            Err(err) => Slot::Failed(err.clone()),
        };
        inner.slots.insert(key.clone(), slot);
        Ok(())
    }

    /// Current state of a query
    pub fn status(&self, key: &QueryKey) -> Result<QueryStatus<V>, AkibaError> {
        let inner = self.lock()?;
        Ok(match inner.slots.get(key) {
            None => QueryStatus::Idle,
            Some(Slot::Loading { .. }) => QueryStatus::Loading,
            Some(Slot::Ready(data)) => QueryStatus::Ready(Arc::clone(data)),
            Some(Slot::Failed(err)) => QueryStatus::Failed(err.clone()),
        })
    }

    /// Forget one key; an in-flight result for it will not be stored
    pub fn invalidate(&self, key: &QueryKey) -> Result<(), AkibaError> {
        let mut inner = self.lock()?;
        inner.slots.remove(key);
        tracing::debug!(cache = self.name, key = %key, "invalidated");
        Ok(())
    }

    /// Forget every key
    pub fn clear(&self) -> Result<(), AkibaError> {
        let mut inner = self.lock()?;
        inner.slots.clear();
        tracing::debug!(cache = self.name, "cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    fn counting_fetch(
        calls: &Arc<AtomicUsize>,
        value: u32,
    ) -> impl Future<Output = Result<u32, AkibaError>> + Send + 'static {
        let calls = Arc::clone(calls);
        async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(value)
        }
    }

    #[test]
    fn test_key_normalizes_param_order() {
        let a = QueryKey::new("transactions").param("skip", 0).param("limit", 5);
        let b = QueryKey::new("transactions").param("limit", 5).param("skip", 0);
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "transactions?limit=5&skip=0");
    }

    #[tokio::test]
    async fn test_second_fetch_is_cache_hit() {
        let cache = QueryCache::<u32>::new("test");
        let calls = Arc::new(AtomicUsize::new(0));
        let key = QueryKey::new("accounts");

        let first = cache.fetch(key.clone(), || counting_fetch(&calls, 7)).await.unwrap();
        let second = cache.fetch(key.clone(), || counting_fetch(&calls, 8)).await.unwrap();

        assert_eq!(*first, 7);
        assert_eq!(*second, 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.status(&key).unwrap().data().map(|d| **d), Some(7));
    }

    #[tokio::test]
    async fn test_concurrent_fetches_share_one_request() {
        let cache = Arc::new(QueryCache::<u32>::new("test"));
        let calls = Arc::new(AtomicUsize::new(0));
        let gate = Arc::new(Notify::new());
        let key = QueryKey::new("categories");

        let make = |calls: Arc<AtomicUsize>, gate: Arc<Notify>| {
            move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                gate.notified().await;
                Ok::<u32, AkibaError>(42)
            }
        };

        let a = {
            let cache = Arc::clone(&cache);
            let key = key.clone();
            let make = make(Arc::clone(&calls), Arc::clone(&gate));
            tokio::spawn(async move { cache.fetch(key, make).await })
        };
        let b = {
            let cache = Arc::clone(&cache);
            let key = key.clone();
            let make = make(Arc::clone(&calls), Arc::clone(&gate));
            tokio::spawn(async move { cache.fetch(key, make).await })
        };

        // Let both tasks register before releasing the request
        while !cache.status(&key).unwrap().is_loading() {
            tokio::task::yield_now().await;
        }
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        gate.notify_waiters();
        gate.notify_one();

        assert_eq!(*a.await.unwrap().unwrap(), 42);
        assert_eq!(*b.await.unwrap().unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_is_recorded_but_not_cached() {
        let cache = QueryCache::<u32>::new("test");
        let calls = Arc::new(AtomicUsize::new(0));
        let key = QueryKey::new("whoami");

        let failing = {
            let calls = Arc::clone(&calls);
            || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(AkibaError::Transport("offline".into()))
            }
        };
        assert!(cache.fetch(key.clone(), failing).await.is_err());
        assert!(matches!(
            cache.status(&key).unwrap().error(),
            Some(AkibaError::Transport(_))
        ));

        let value = cache.fetch(key.clone(), || counting_fetch(&calls, 3)).await.unwrap();
        assert_eq!(*value, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let cache = QueryCache::<u32>::new("test");
        let calls = Arc::new(AtomicUsize::new(0));
        let key = QueryKey::new("accounts");

        cache.fetch(key.clone(), || counting_fetch(&calls, 1)).await.unwrap();
        cache.invalidate(&key).unwrap();
        assert!(matches!(cache.status(&key).unwrap(), QueryStatus::Idle));

        let value = cache.fetch(key.clone(), || counting_fetch(&calls, 2)).await.unwrap();
        assert_eq!(*value, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_result_invalidated_in_flight_is_not_stored() {
        let cache = Arc::new(QueryCache::<u32>::new("test"));
        let gate = Arc::new(Notify::new());
        let key = QueryKey::new("transactions");

        let task = {
            let cache = Arc::clone(&cache);
            let gate = Arc::clone(&gate);
            let key = key.clone();
            tokio::spawn(async move {
                cache
                    .fetch(key, move || async move {
                        gate.notified().await;
                        Ok::<u32, AkibaError>(9)
                    })
                    .await
            })
        };

        while !cache.status(&key).unwrap().is_loading() {
            tokio::task::yield_now().await;
        }
        cache.invalidate(&key).unwrap();
        gate.notify_one();

        // The waiting caller still gets its answer
        assert_eq!(*task.await.unwrap().unwrap(), 9);
        assert!(matches!(cache.status(&key).unwrap(), QueryStatus::Idle));
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let cache = QueryCache::<u32>::new("test");
        let calls = Arc::new(AtomicUsize::new(0));
        let page_one = QueryKey::new("transactions").param("skip", 0);
        let page_two = QueryKey::new("transactions").param("skip", 100);

        cache.fetch(page_one.clone(), || counting_fetch(&calls, 1)).await.unwrap();
        cache.fetch(page_two.clone(), || counting_fetch(&calls, 2)).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        cache.clear().unwrap();
        assert!(matches!(cache.status(&page_one).unwrap(), QueryStatus::Idle));
        assert!(matches!(cache.status(&page_two).unwrap(), QueryStatus::Idle));
    }
}
