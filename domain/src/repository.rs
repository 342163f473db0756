use std::sync::{Mutex, PoisonError};

use tracing::debug;

use crate::{NewSeller, RepositoryError, Seller, SellerId, SellerRepository, SellerStorage, Sellers};

/// Default repository built on top of a [`SellerStorage`].
///
/// Storage is read and written as a whole set; this layer turns that into
/// lookups by id and inserts with a generated id. Saves are serialized so two
/// concurrent callers never compute the same next id.
pub struct DefaultSellerRepository<S: SellerStorage> {
    storage: S,
    save_lock: Mutex<()>,
}

impl<S: SellerStorage> DefaultSellerRepository<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            save_lock: Mutex::new(()),
        }
    }
}

/// Next id to assign: highest existing id plus one, or 1 for an empty set.
fn next_id(sellers: &Sellers) -> Result<SellerId, RepositoryError> {
    match sellers.keys().max() {
        None => Ok(1),
        Some(highest) => highest.checked_add(1).ok_or(RepositoryError::IdOverflow),
    }
}

impl<S: SellerStorage> SellerRepository for DefaultSellerRepository<S> {
    fn get_by_id(&self, id: SellerId) -> Result<Seller, RepositoryError> {
        let mut sellers = self.storage.read()?;
        sellers.remove(&id).ok_or(RepositoryError::NotFound)
    }

    fn save(&self, seller: NewSeller) -> Result<Seller, RepositoryError> {
        // The guard protects no data, so a poisoned lock is still usable.
        let _guard = self.save_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut sellers = self.storage.read()?;
        let id = next_id(&sellers)?;
        let seller = seller.with_id(id);
        sellers.insert(id, seller.clone());
        self.storage.write(&sellers)?;

        debug!(id, "seller saved");
        Ok(seller)
    }
}
