//! Repository for broker platforms in the local database.

use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use platform_settings_core::errors::{DatabaseError, Result};
use platform_settings_core::platforms::{Platform, PlatformRepositoryTrait};

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::platforms::dsl::*;

use super::model::PlatformDB;

pub struct PlatformRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl PlatformRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl PlatformRepositoryTrait for PlatformRepository {
    fn list(&self) -> Result<Vec<Platform>> {
        let mut conn = get_connection(&self.pool)?;

        let results = platforms
            .select(PlatformDB::as_select())
            .order(id.asc())
            .load::<PlatformDB>(&mut conn)
            .into_core()?;

        Ok(results.into_iter().map(Platform::from).collect())
    }

    fn get_by_id(&self, platform_id: &str) -> Result<Option<Platform>> {
        let mut conn = get_connection(&self.pool)?;

        let result = platforms
            .select(PlatformDB::as_select())
            .find(platform_id)
            .first::<PlatformDB>(&mut conn)
            .optional()
            .into_core()?;

        Ok(result.map(Platform::from))
    }

    async fn update_enabled(&self, platform_id: &str, is_enabled: bool) -> Result<Platform> {
        let target = platform_id.to_string();

        self.writer
            .exec(move |conn| {
                let updated = diesel::update(platforms.find(&target))
                    .set(enabled.eq(is_enabled))
                    .returning(PlatformDB::as_returning())
                    .get_result::<PlatformDB>(conn)
                    .optional()
                    .map_err(StorageError::from)?;

                updated
                    .map(Platform::from)
                    .ok_or_else(|| DatabaseError::NotFound(format!("platform {}", target)).into())
            })
            .await
    }
}
