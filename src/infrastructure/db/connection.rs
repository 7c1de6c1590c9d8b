use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::OnceCell;

/// Something able to open a connection handle to a backing store.
#[async_trait]
pub trait Connector: Send + Sync {
    type Handle: Clone + Send + Sync + 'static;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Makes a single attempt; callers decide whether to try again.
    async fn connect(&self) -> Result<Self::Handle, Self::Error>;

    /// Releases a handle obtained from `connect`.
    async fn close(&self, _handle: &Self::Handle) {}
}

/// Owns the single connection handle of the process.
///
/// The first call to [`ConnectionCache::get`] opens the connection; every
/// later call gets a clone of the same handle. Concurrent first callers wait
/// on the same attempt instead of racing to open their own. A failed attempt
/// is returned to the caller at once and leaves the cache empty.
pub struct ConnectionCache<C: Connector> {
    connector: C,
    handle: OnceCell<C::Handle>,
}

impl<C: Connector> ConnectionCache<C> {
    pub fn new(connector: C) -> Self {
        ConnectionCache {
            connector,
            handle: OnceCell::new(),
        }
    }

    pub async fn get(&self) -> Result<C::Handle, C::Error> {
        let handle = self.handle
            .get_or_try_init(|| async {
                tracing::info!("Opening database connection");
                self.connector.connect().await
            })
            .await?;

        Ok(handle.clone())
    }

    /// Startup variant of [`ConnectionCache::get`]: retries up to `max_retries`
    /// times, doubling the wait after each failure.
    pub async fn get_with_retries(
        &self,
        max_retries: u32,
        first_backoff: Duration,
    ) -> Result<C::Handle, C::Error> {
        let mut retry_count = 0;
        let mut wait = first_backoff;

        loop {
            match self.get().await {
                Ok(handle) => return Ok(handle),
                Err(e) if retry_count < max_retries => {
                    retry_count += 1;
                    tracing::warn!(
                        "Failed to connect to database (attempt {}/{}): {}. Retrying in {:?}...",
                        retry_count, max_retries, e, wait);

                    tokio::time::sleep(wait).await;
                    wait *= 2;
                }
                Err(e) => return Err(e),
            }
        }
    }

    pub fn is_connected(&self) -> bool {
        self.handle.initialized()
    }

    pub async fn close(&self) {
        if let Some(handle) = self.handle.get() {
            self.connector.close(handle).await;
            tracing::info!("Database connection closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use super::*;

    #[derive(Default)]
    struct CountingConnector {
        connects: AtomicUsize,
        closes: AtomicUsize,
        fail_first: bool,
        always_fail: bool,
    }

    #[async_trait]
    impl Connector for CountingConnector {
        type Handle = Arc<usize>;
        type Error = std::io::Error;

        async fn connect(&self) -> Result<Self::Handle, Self::Error> {
            let attempt = self.connects.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            if self.always_fail || (self.fail_first && attempt == 0) {
                return Err(std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused"));
            }
            Ok(Arc::new(attempt))
        }

        async fn close(&self, _handle: &Self::Handle) {
            self.closes.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn second_call_reuses_the_handle() {
        let cache = ConnectionCache::new(CountingConnector::default());

        let first = cache.get().await.unwrap();
        let second = cache.get().await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.connector.connects.load(Ordering::SeqCst), 1);
        assert!(cache.is_connected());
    }

    #[tokio::test]
    async fn concurrent_first_callers_share_one_connect() {
        let cache = ConnectionCache::new(CountingConnector::default());

        let (a, b, c) = tokio::join!(cache.get(), cache.get(), cache.get());

        assert!(Arc::ptr_eq(&a.unwrap(), &b.unwrap()));
        assert!(c.is_ok());
        assert_eq!(cache.connector.connects.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_connect_propagates_and_is_retried_by_next_caller() {
        let cache = ConnectionCache::new(CountingConnector {
            fail_first: true,
            ..Default::default()
        });

        let err = cache.get().await.unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::ConnectionRefused);
        assert!(!cache.is_connected());

        assert!(cache.get().await.is_ok());
        assert_eq!(cache.connector.connects.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn unreachable_store_fails_after_one_attempt() {
        let cache = ConnectionCache::new(CountingConnector {
            always_fail: true,
            ..Default::default()
        });

        let started = std::time::Instant::now();
        assert!(cache.get().await.is_err());
        assert!(cache.get().await.is_err());

        assert!(started.elapsed() < Duration::from_millis(500));
        assert_eq!(cache.connector.connects.load(Ordering::SeqCst), 2);
        assert!(!cache.is_connected());
    }

    #[tokio::test]
    async fn startup_retries_are_bounded() {
        let cache = ConnectionCache::new(CountingConnector {
            always_fail: true,
            ..Default::default()
        });

        assert!(cache.get_with_retries(2, Duration::from_millis(1)).await.is_err());
        assert_eq!(cache.connector.connects.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn startup_retry_recovers_from_a_transient_failure() {
        let cache = ConnectionCache::new(CountingConnector {
            fail_first: true,
            ..Default::default()
        });

        assert!(cache.get_with_retries(3, Duration::from_millis(1)).await.is_ok());
        assert_eq!(cache.connector.connects.load(Ordering::SeqCst), 2);
        assert!(cache.is_connected());
    }

    #[tokio::test]
    async fn close_only_touches_an_open_handle() {
        let cache = ConnectionCache::new(CountingConnector::default());

        cache.close().await;
        assert_eq!(cache.connector.closes.load(Ordering::SeqCst), 0);

        cache.get().await.unwrap();
        cache.close().await;
        assert_eq!(cache.connector.closes.load(Ordering::SeqCst), 1);
    }
}
