use crate::domain::cart::Cart;
use crate::domain::ports::CartStore;
use crate::error::{Result, StorefrontError};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use std::path::Path;
use std::sync::Arc;

/// Column Family holding saved carts.
pub const CF_CARTS: &str = "carts";
/// Key of the single session cart.
const SESSION_KEY: &[u8] = b"session";

/// A persistent cart store backed by RocksDB.
///
/// The cart is stored as JSON under one key, so a later session resumes where
/// the previous one stopped. `Clone` shares the underlying `Arc<DB>`.
#[derive(Clone)]
pub struct RocksDbCartStore {
    db: Arc<DB>,
}

impl RocksDbCartStore {
    /// Opens or creates a RocksDB instance at the specified path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_carts = ColumnFamilyDescriptor::new(CF_CARTS, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_carts])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn missing_cf() -> StorefrontError {
        StorefrontError::InternalError(Box::new(std::io::Error::other(
            "Carts column family not found",
        )))
    }
}

#[async_trait]
impl CartStore for RocksDbCartStore {
    async fn load(&self) -> Result<Option<Cart>> {
        let cf = self.db.cf_handle(CF_CARTS).ok_or_else(Self::missing_cf)?;
        match self.db.get_cf(&cf, SESSION_KEY)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, cart: &Cart) -> Result<()> {
        let cf = self.db.cf_handle(CF_CARTS).ok_or_else(Self::missing_cf)?;
        let value = serde_json::to_vec(cart)?;
        self.db.put_cf(&cf, SESSION_KEY, value)?;
        Ok(())
    }
}
