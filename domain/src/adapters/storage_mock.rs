use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{SellerStorage, Sellers, StorageError};

type ReadFn = Box<dyn Fn() -> Result<Sellers, StorageError> + Send + Sync>;
type WriteFn = Box<dyn Fn(&Sellers) -> Result<(), StorageError> + Send + Sync>;

/// Number of calls observed by [`StorageMock`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StorageCalls {
    pub read: usize,
    pub write: usize,
}

/// Storage test double with injectable behavior and call observers.
///
/// Without injected closures `read` returns an empty set and `write` succeeds.
#[derive(Default)]
pub struct StorageMock {
    read_fn: Option<ReadFn>,
    write_fn: Option<WriteFn>,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl StorageMock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_read<F>(mut self, f: F) -> Self
    where
        F: Fn() -> Result<Sellers, StorageError> + Send + Sync + 'static,
    {
        self.read_fn = Some(Box::new(f));
        self
    }

    pub fn with_write<F>(mut self, f: F) -> Self
    where
        F: Fn(&Sellers) -> Result<(), StorageError> + Send + Sync + 'static,
    {
        self.write_fn = Some(Box::new(f));
        self
    }

    pub fn calls(&self) -> StorageCalls {
        StorageCalls {
            read: self.reads.load(Ordering::SeqCst),
            write: self.writes.load(Ordering::SeqCst),
        }
    }
}

impl SellerStorage for StorageMock {
    fn read(&self) -> Result<Sellers, StorageError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        match &self.read_fn {
            Some(f) => f(),
            None => Ok(Sellers::new()),
        }
    }

    fn write(&self, sellers: &Sellers) -> Result<(), StorageError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        match &self.write_fn {
            Some(f) => f(sellers),
            None => Ok(()),
        }
    }
}
