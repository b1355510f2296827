//! Port to the external broker sync engine.

use async_trait::async_trait;

use crate::errors::Result;

/// Pulls activities for every linked broker account.
///
/// The engine itself lives outside this crate; the settings layer only
/// triggers it and never waits on its effects to refresh the cache.
#[async_trait]
pub trait BrokerSyncServiceTrait: Send + Sync {
    async fn sync_all_accounts(&self) -> Result<()>;
}
