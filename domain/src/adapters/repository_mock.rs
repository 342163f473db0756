use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{NewSeller, RepositoryError, Seller, SellerId, SellerRepository};

type GetByIdFn = Box<dyn Fn(SellerId) -> Result<Seller, RepositoryError> + Send + Sync>;
type SaveFn = Box<dyn Fn(NewSeller) -> Result<Seller, RepositoryError> + Send + Sync>;

/// Number of calls observed by [`RepositoryMock`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RepositoryCalls {
    pub get_by_id: usize,
    pub save: usize,
}

/// Repository test double.
///
/// Without injected closures `get_by_id` reports not found and `save`
/// assigns id 1.
#[derive(Default)]
pub struct RepositoryMock {
    get_by_id_fn: Option<GetByIdFn>,
    save_fn: Option<SaveFn>,
    get_by_id_calls: AtomicUsize,
    save_calls: AtomicUsize,
}

impl RepositoryMock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_get_by_id<F>(mut self, f: F) -> Self
    where
        F: Fn(SellerId) -> Result<Seller, RepositoryError> + Send + Sync + 'static,
    {
        self.get_by_id_fn = Some(Box::new(f));
        self
    }

    pub fn with_save<F>(mut self, f: F) -> Self
    where
        F: Fn(NewSeller) -> Result<Seller, RepositoryError> + Send + Sync + 'static,
    {
        self.save_fn = Some(Box::new(f));
        self
    }

    pub fn calls(&self) -> RepositoryCalls {
        RepositoryCalls {
            get_by_id: self.get_by_id_calls.load(Ordering::SeqCst),
            save: self.save_calls.load(Ordering::SeqCst),
        }
    }
}

impl SellerRepository for RepositoryMock {
    fn get_by_id(&self, id: SellerId) -> Result<Seller, RepositoryError> {
        self.get_by_id_calls.fetch_add(1, Ordering::SeqCst);
        match &self.get_by_id_fn {
            Some(f) => f(id),
            None => Err(RepositoryError::NotFound),
        }
    }

    fn save(&self, seller: NewSeller) -> Result<Seller, RepositoryError> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        match &self.save_fn {
            Some(f) => f(seller),
            None => Ok(seller.with_id(1)),
        }
    }
}
