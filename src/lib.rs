use std::path::Path;
use std::sync::Arc;

use sqlx::SqlitePool;

pub mod controller;
pub mod db;
pub mod error;
pub mod migrate;
pub mod model;
pub mod store;
pub mod time;

mod logging;

pub use controller::{BiodataController, BiodataInput};
pub use error::StorageError;
pub use logging::init_logging;
pub use model::{Biodata, NewBiodata, BIODATA_ID};
pub use store::BiodataStore;

/// Everything a caller holds after startup: the pool for maintenance tasks
/// and the wired store + controller for the presentation layer.
pub struct App {
    pub pool: SqlitePool,
    pub store: Arc<BiodataStore>,
    pub controller: BiodataController,
}

/// Opens the database, applies migrations, and wires the store and
/// controller. Construct once at process start and pass the pieces to
/// whatever builds the presentation layer; there is no ambient global
/// instance.
pub async fn bootstrap(db_path: &Path) -> anyhow::Result<App> {
    let pool = db::open_sqlite_pool(db_path).await?;
    migrate::apply_migrations(&pool).await?;
    let store = Arc::new(BiodataStore::new(pool.clone()).await?);
    let controller = BiodataController::new(store.clone());
    Ok(App {
        pool,
        store,
        controller,
    })
}
