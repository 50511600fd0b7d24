use std::path::Path;
use std::sync::Arc;

use im_core::{ArticleStore, Result};

pub mod backends;

pub use backends::*;

/// SQLite at `db_path` when one is given, otherwise an in-memory store.
pub async fn create_storage(db_path: Option<&Path>) -> Result<Arc<dyn ArticleStore>> {
    match db_path {
        #[cfg(feature = "sqlite")]
        Some(path) => {
            let storage = SQLiteStorage::new_with_path(path).await?;
            tracing::info!("🏦 Using SQLite storage at {}", path.display());
            Ok(Arc::new(storage))
        }
        #[cfg(not(feature = "sqlite"))]
        Some(path) => Err(im_core::Error::Config(format!(
            "cannot open {}: built without the `sqlite` feature",
            path.display()
        ))),
        None => {
            tracing::info!("🏦 Using in-memory storage");
            Ok(Arc::new(MemoryStorage::new()))
        }
    }
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::create_storage;
}
