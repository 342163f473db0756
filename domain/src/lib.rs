//! Domain library for the sellers service.
//!
//! Holds the seller record, the storage and repository ports (traits), and
//! their error definitions. HTTP and process concerns stay out of this crate.

use std::collections::BTreeMap;
use std::sync::Arc;

/// Identifier assigned to a seller by the repository.
pub type SellerId = i64;

/// Full id -> seller mapping exchanged with storage.
pub type Sellers = BTreeMap<SellerId, Seller>;

/// Stored seller record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Seller {
    pub id: SellerId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Input data for creating a new seller. The id is assigned on save.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewSeller {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl NewSeller {
    /// Attach an assigned id, producing the stored record.
    pub fn with_id(self, id: SellerId) -> Seller {
        Seller {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
        }
    }
}

/// Storage port: bulk access to the whole seller set.
///
/// Implementations own the canonical mapping. `read` hands out an independent
/// snapshot and `write` replaces the stored set with a copy of the argument.
pub trait SellerStorage: Send + Sync {
    /// Return every stored seller.
    fn read(&self) -> Result<Sellers, StorageError>;
    /// Replace the stored set wholesale.
    fn write(&self, sellers: &Sellers) -> Result<(), StorageError>;
}

impl<T: SellerStorage + ?Sized> SellerStorage for Arc<T> {
    fn read(&self) -> Result<Sellers, StorageError> {
        (**self).read()
    }

    fn write(&self, sellers: &Sellers) -> Result<(), StorageError> {
        (**self).write(sellers)
    }
}

/// Repository port: entity-level operations on sellers.
pub trait SellerRepository: Send + Sync {
    /// Look up a seller by id.
    fn get_by_id(&self, id: SellerId) -> Result<Seller, RepositoryError>;
    /// Persist a new seller and return it with its assigned id.
    fn save(&self, seller: NewSeller) -> Result<Seller, RepositoryError>;
}

impl<T: SellerRepository + ?Sized> SellerRepository for Arc<T> {
    fn get_by_id(&self, id: SellerId) -> Result<Seller, RepositoryError> {
        (**self).get_by_id(id)
    }

    fn save(&self, seller: NewSeller) -> Result<Seller, RepositoryError> {
        (**self).save(seller)
    }
}

/// Storage-level failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("storage sellers error: internal error: {0}")]
    Internal(String),
}

/// Repository-level failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository error: internal error")]
    Internal(#[from] StorageError),
    #[error("repository error: seller not found")]
    NotFound,
    #[error("repository error: seller id space exhausted")]
    IdOverflow,
}

/// Return a short about/version line for the binary to print.
pub fn about() -> String {
    let pkg = env!("CARGO_PKG_NAME");
    let ver = env!("CARGO_PKG_VERSION");
    format!("{} v{} - domain library loaded", pkg, ver)
}

pub mod adapters;
pub mod repository;
