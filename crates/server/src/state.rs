//! Application state shared across all handlers.

use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::PgPool;

use crate::config::Config;
use crate::db;
use crate::file::{FileService, LocalFileStorage};
use crate::listing::{
    ListingEngine, POSTS_PER_PAGE, PgPostStore, PgWorksheetStore, WORKSHEETS_PER_PAGE,
};

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// PostgreSQL connection pool.
    db: PgPool,

    /// Listing engine over blog posts (page size 5, no author dimension).
    posts: ListingEngine<PgPostStore>,

    /// Listing engine over worksheets (page size 9, author dimension,
    /// favorites overlay).
    worksheets: ListingEngine<PgWorksheetStore>,

    /// Worksheet PDF storage.
    files: FileService,

    /// Admin login username.
    admin_username: String,

    /// Argon2 hash of the admin password.
    admin_password_hash: String,
}

impl AppState {
    /// Initialize state: connect, bootstrap the schema, build the engines.
    pub async fn new(config: &Config) -> Result<Self> {
        let db = db::create_pool(config).await?;
        db::init_schema(&db)
            .await
            .context("failed to initialize database schema")?;

        let posts = ListingEngine::new(PgPostStore::new(db.clone()), POSTS_PER_PAGE);
        let worksheets = ListingEngine::new(PgWorksheetStore::new(db.clone()), WORKSHEETS_PER_PAGE);

        let storage = Arc::new(LocalFileStorage::new(
            config.uploads_dir.clone(),
            config.files_url.clone(),
        ));
        let files = FileService::new(storage);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                db,
                posts,
                worksheets,
                files,
                admin_username: config.admin_username.clone(),
                admin_password_hash: config.admin_password_hash.clone(),
            }),
        })
    }

    pub fn db(&self) -> &PgPool {
        &self.inner.db
    }

    pub fn posts(&self) -> &ListingEngine<PgPostStore> {
        &self.inner.posts
    }

    pub fn worksheets(&self) -> &ListingEngine<PgWorksheetStore> {
        &self.inner.worksheets
    }

    pub fn files(&self) -> &FileService {
        &self.inner.files
    }

    pub fn admin_username(&self) -> &str {
        &self.inner.admin_username
    }

    pub fn admin_password_hash(&self) -> &str {
        &self.inner.admin_password_hash
    }
}
