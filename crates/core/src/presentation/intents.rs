use std::sync::Arc;

use serde::Deserialize;

use crate::mutations::MutationCoordinator;

/// Actions the settings screen can request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum UserIntent {
    #[serde(rename_all = "camelCase")]
    Toggle { platform_id: String, enabled: bool },
    /// Save the API key field. A blank value clears the stored key.
    #[serde(rename_all = "camelCase")]
    SaveApiKey { platform_id: String, api_key: String },
    #[serde(rename_all = "camelCase")]
    ValidateCredentials { platform_id: String },
    SyncAll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchResult {
    /// The mutation settled. Notifications have already been raised.
    Settled { committed: bool },
    /// Handed off without waiting for the outcome.
    Spawned,
}

impl UserIntent {
    pub async fn dispatch(self, coordinator: &Arc<MutationCoordinator>) -> DispatchResult {
        let committed = match self {
            UserIntent::Toggle {
                platform_id,
                enabled,
            } => coordinator
                .toggle_enabled(&platform_id, enabled)
                .await
                .is_committed(),
            UserIntent::SaveApiKey {
                platform_id,
                api_key,
            } => coordinator
                .set_api_key(&platform_id, &api_key)
                .await
                .is_committed(),
            UserIntent::ValidateCredentials { platform_id } => coordinator
                .validate_credentials(&platform_id)
                .await
                .is_committed(),
            UserIntent::SyncAll => {
                // Detached; the outcome is reported through notifications.
                drop(coordinator.spawn_sync_all());
                return DispatchResult::Spawned;
            }
        };
        DispatchResult::Settled { committed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::SettingsCache;
    use crate::notifications::{MockNotificationSink, NoOpNotificationSink, NotificationVariant};
    use crate::test_support::{setting, MockBridge};

    fn coordinator(bridge: Arc<MockBridge>) -> Arc<MutationCoordinator> {
        Arc::new(MutationCoordinator::new(
            bridge,
            Arc::new(SettingsCache::new()),
            Arc::new(NoOpNotificationSink),
        ))
    }

    #[test]
    fn test_intent_deserializes_from_ui_payload() {
        let intent: UserIntent = serde_json::from_value(serde_json::json!({
            "type": "saveApiKey",
            "platformId": "COINBASE",
            "apiKey": ""
        }))
        .unwrap();
        assert_eq!(
            intent,
            UserIntent::SaveApiKey {
                platform_id: "COINBASE".to_string(),
                api_key: String::new(),
            }
        );
    }

    #[tokio::test]
    async fn test_dispatch_routes_to_coordinator() {
        let bridge = Arc::new(MockBridge::with_platforms(vec![setting("A", false)]));
        let coordinator = coordinator(bridge.clone());

        let toggled = UserIntent::Toggle {
            platform_id: "A".to_string(),
            enabled: true,
        }
        .dispatch(&coordinator)
        .await;
        assert_eq!(toggled, DispatchResult::Settled { committed: true });

        let cleared = UserIntent::SaveApiKey {
            platform_id: "A".to_string(),
            api_key: " ".to_string(),
        }
        .dispatch(&coordinator)
        .await;
        assert_eq!(cleared, DispatchResult::Settled { committed: true });

        assert_eq!(
            bridge.calls(),
            vec!["update_platform:A:true", "clear_secret:A"]
        );
    }

    #[tokio::test]
    async fn test_sync_all_is_spawned() {
        let bridge = Arc::new(MockBridge::with_platforms(vec![]));
        let coordinator = coordinator(bridge.clone());

        let result = UserIntent::SyncAll.dispatch(&coordinator).await;
        assert_eq!(result, DispatchResult::Spawned);

        // Let the spawned task run on the current-thread runtime.
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert_eq!(bridge.calls(), vec!["sync_all"]);
    }

    #[tokio::test]
    async fn test_detached_sync_failure_is_still_notified() {
        let bridge = Arc::new(MockBridge::with_platforms(vec![]));
        bridge.fail_sync("host offline");
        let sink = MockNotificationSink::new();
        let coordinator = Arc::new(MutationCoordinator::new(
            bridge,
            Arc::new(SettingsCache::new()),
            Arc::new(sink.clone()),
        ));

        let result = UserIntent::SyncAll.dispatch(&coordinator).await;
        assert_eq!(result, DispatchResult::Spawned);

        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        let last = sink.last().unwrap();
        assert_eq!(last.title, "Failed to sync brokers");
        assert_eq!(last.variant, NotificationVariant::Destructive);
    }
}
