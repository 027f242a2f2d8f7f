//! Time-bounded caching of source fetches
//!
//! A cached export is reused until it is older than the TTL. A failed
//! refresh is reported to the caller and the stale copy is not served.
//! Refreshes run without holding the cache lock, so readers and
//! [`CachedSource::is_fresh`] never wait on network I/O.

use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::source::SheetSource;
use crate::IngestError;

/// Default lifetime of a cached export
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// Source of the current instant
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[derive(Debug)]
struct CacheEntry {
    fetched_at: Instant,
    bytes: Vec<u8>,
}

/// A [`SheetSource`] that remembers its last export for `ttl`
#[derive(Debug)]
pub struct CachedSource<S, C = SystemClock> {
    inner: S,
    ttl: Duration,
    clock: C,
    entry: Mutex<Option<CacheEntry>>,
}

impl<S: SheetSource> CachedSource<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self::with_clock(inner, ttl, SystemClock)
    }
}

impl<S: SheetSource, C: Clock> CachedSource<S, C> {
    pub fn with_clock(inner: S, ttl: Duration, clock: C) -> Self {
        Self {
            inner,
            ttl,
            clock,
            entry: Mutex::new(None),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Forget the cached export so the next fetch goes to the source
    pub fn invalidate(&self) {
        *self.entry.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Whether a cached export exists and is younger than the TTL
    pub fn is_fresh(&self) -> bool {
        let entry = self.entry.lock().unwrap_or_else(PoisonError::into_inner);
        entry
            .as_ref()
            .is_some_and(|e| self.clock.now().saturating_duration_since(e.fetched_at) < self.ttl)
    }
}

impl<S: SheetSource, C: Clock> SheetSource for CachedSource<S, C> {
    fn fetch(&self) -> Result<Vec<u8>, IngestError> {
        {
            let entry = self.entry.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(cached) = entry.as_ref() {
                let age = self.clock.now().saturating_duration_since(cached.fetched_at);
                if age < self.ttl {
                    debug!(source = %self.inner.describe(), age_ms = age.as_millis() as u64, "cache hit");
                    return Ok(cached.bytes.clone());
                }
            }
        }

        // The lock is not held across the fetch; concurrent misses each fetch
        // and the last one to finish is stored.
        let bytes = self.inner.fetch()?;
        let fetched_at = self.clock.now();
        info!(
            source = %self.inner.describe(),
            bytes = bytes.len(),
            ttl_secs = self.ttl.as_secs(),
            "cache refreshed"
        );
        *self.entry.lock().unwrap_or_else(PoisonError::into_inner) = Some(CacheEntry {
            fetched_at,
            bytes: bytes.clone(),
        });
        Ok(bytes)
    }

    fn describe(&self) -> String {
        format!("{} (cached {}s)", self.inner.describe(), self.ttl.as_secs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Barrier};

    #[derive(Clone)]
    struct ManualClock(Arc<Mutex<Instant>>);

    impl ManualClock {
        fn new() -> Self {
            Self(Arc::new(Mutex::new(Instant::now())))
        }

        fn advance(&self, by: Duration) {
            *self.0.lock().unwrap() += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            *self.0.lock().unwrap()
        }
    }

    #[derive(Default)]
    struct CountingSource {
        calls: AtomicUsize,
        failing: AtomicBool,
    }

    impl SheetSource for CountingSource {
        fn fetch(&self) -> Result<Vec<u8>, IngestError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.failing.load(Ordering::SeqCst) {
                return Err(IngestError::InvalidSource("offline".into()));
            }
            Ok(format!("n\n{n}\n").into_bytes())
        }

        fn describe(&self) -> String {
            "counting".into()
        }
    }

    fn cached(ttl: Duration) -> (CachedSource<CountingSource, ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let source = CachedSource::with_clock(CountingSource::default(), ttl, clock.clone());
        (source, clock)
    }

    #[test]
    fn serves_cached_copy_within_ttl() {
        let (source, clock) = cached(Duration::from_secs(60));
        assert!(!source.is_fresh());

        let first = source.fetch().unwrap();
        clock.advance(Duration::from_secs(59));
        let second = source.fetch().unwrap();

        assert_eq!(first, second);
        assert_eq!(source.inner().calls.load(Ordering::SeqCst), 1);
        assert!(source.is_fresh());
    }

    #[test]
    fn refetches_after_ttl() {
        let (source, clock) = cached(Duration::from_secs(60));
        let first = source.fetch().unwrap();
        clock.advance(Duration::from_secs(60));
        assert!(!source.is_fresh());

        let second = source.fetch().unwrap();
        assert_ne!(first, second);
        assert_eq!(source.inner().calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn invalidate_forces_refetch() {
        let (source, _clock) = cached(Duration::from_secs(600));
        source.fetch().unwrap();
        source.invalidate();
        source.fetch().unwrap();
        assert_eq!(source.inner().calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn failed_refresh_is_not_masked() {
        let (source, clock) = cached(Duration::from_secs(60));
        source.fetch().unwrap();
        clock.advance(Duration::from_secs(61));
        source.inner().failing.store(true, Ordering::SeqCst);

        assert!(source.fetch().is_err());
        assert!(!source.is_fresh());
    }

    #[test]
    fn load_table_goes_through_cache() {
        let (source, _clock) = cached(DEFAULT_TTL);
        let a = source.load_table().unwrap();
        let b = source.load_table().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.rows[0].cell("n"), "1");
        assert!(source.describe().contains("cached 60s"));
    }

    struct GatedSource {
        entered: Barrier,
        release: Barrier,
    }

    impl SheetSource for GatedSource {
        fn fetch(&self) -> Result<Vec<u8>, IngestError> {
            self.entered.wait();
            self.release.wait();
            Ok(b"n\n1\n".to_vec())
        }

        fn describe(&self) -> String {
            "gated".into()
        }
    }

    #[test]
    fn cache_stays_readable_during_refresh() {
        let gated = GatedSource {
            entered: Barrier::new(2),
            release: Barrier::new(2),
        };
        let source = CachedSource::with_clock(gated, DEFAULT_TTL, ManualClock::new());

        std::thread::scope(|scope| {
            let refresh = scope.spawn(|| source.fetch());

            source.inner().entered.wait();
            assert!(!source.is_fresh());
            source.invalidate();
            source.inner().release.wait();

            assert_eq!(refresh.join().unwrap().unwrap(), b"n\n1\n".to_vec());
        });
        assert!(source.is_fresh());
    }
}
