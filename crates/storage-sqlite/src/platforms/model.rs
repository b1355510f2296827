//! Database model for broker platforms.

use diesel::prelude::*;
use platform_settings_core::platforms::Platform;
use serde::{Deserialize, Serialize};

#[derive(
    Queryable,
    Identifiable,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::platforms)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PlatformDB {
    pub id: String,
    pub name: Option<String>,
    pub url: String,
    pub enabled: bool,
}

impl From<PlatformDB> for Platform {
    fn from(db: PlatformDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            url: db.url,
            enabled: db.enabled,
        }
    }
}
