use futures::future::join_all;
use serde::Serialize;

use crate::queries::{QueryState, SettingsQueries};

use super::sorting::sorted;
use super::view_model::PlatformView;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "camelCase")]
pub enum PageState {
    Loading,
    Error(String),
    Ready(Vec<PlatformView>),
}

/// Assembles the broker settings screen from the queries.
pub struct SettingsPage<'a> {
    queries: &'a SettingsQueries,
}

impl<'a> SettingsPage<'a> {
    pub fn new(queries: &'a SettingsQueries) -> Self {
        Self { queries }
    }

    pub async fn load(&self) -> PageState {
        let platforms = match self.queries.platform_settings().await {
            QueryState::Loading => return PageState::Loading,
            QueryState::Error(message) => return PageState::Error(message),
            QueryState::Ready(platforms) => sorted(&platforms),
        };

        let statuses = join_all(
            platforms
                .iter()
                .map(|platform| self.queries.api_key_status(platform)),
        )
        .await;

        PageState::Ready(
            platforms
                .iter()
                .zip(statuses)
                .map(|(platform, status)| PlatformView::new(platform, status))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::cache::SettingsCache;
    use crate::presentation::PlatformStatus;
    use crate::test_support::{setting, MockBridge};

    #[tokio::test]
    async fn test_load_sorts_and_derives_views() {
        let bridge = Arc::new(MockBridge::with_platforms(vec![
            setting("COINBASE", true),
            setting("BITVAVO", false),
            setting("ALPACA", true),
        ]));
        bridge.set_server_secret("COINBASE", Some("key"));
        let queries = SettingsQueries::new(bridge, Arc::new(SettingsCache::new()));

        let PageState::Ready(views) = SettingsPage::new(&queries).load().await else {
            panic!("expected ready page");
        };

        let ids: Vec<_> = views.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["ALPACA", "COINBASE", "BITVAVO"]);
        assert_eq!(views[0].status, PlatformStatus::NeedsConfiguration);
        assert_eq!(views[1].status, PlatformStatus::Ready);
        assert_eq!(views[2].status, PlatformStatus::Disabled);
    }

    #[tokio::test]
    async fn test_load_surfaces_read_failure() {
        let bridge = Arc::new(MockBridge::with_platforms(vec![]));
        bridge.fail_list("Error loading broker platform settings.");
        let queries = SettingsQueries::new(bridge, Arc::new(SettingsCache::new()));

        assert_eq!(
            SettingsPage::new(&queries).load().await,
            PageState::Error("Error loading broker platform settings.".to_string())
        );
    }
}
