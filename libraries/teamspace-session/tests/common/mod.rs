//! Common test utilities and fixtures
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;
use teamspace_client::{GatewayConfig, HttpGateway};
use teamspace_core::NavigationIntent;
use teamspace_session::{MemoryTokenStore, SessionSettings, Workspace};
use wiremock::MockServer;

mockall::mock! {
    pub Navigator {}

    impl teamspace_session::Navigator for Navigator {
        fn goto(&self, intent: NavigationIntent);
    }
}

/// Navigator that accepts any number of intents
pub fn permissive_navigator() -> MockNavigator {
    let mut navigator = MockNavigator::new();
    navigator.expect_goto().return_const(());
    navigator
}

/// Workspace backed by the mock server and an in-memory token store
pub fn workspace_with(
    server: &MockServer,
    tokens: Arc<MemoryTokenStore>,
    navigator: MockNavigator,
    settings: SessionSettings,
) -> Workspace {
    let gateway = HttpGateway::new(GatewayConfig::new(server.uri()), tokens.clone()).unwrap();
    Workspace::new(&settings, tokens, Arc::new(gateway), Arc::new(navigator))
}

/// Workspace with default settings and a navigator that accepts anything
pub fn workspace(server: &MockServer, tokens: Arc<MemoryTokenStore>) -> Workspace {
    workspace_with(
        server,
        tokens,
        permissive_navigator(),
        SessionSettings::default(),
    )
}

/// Poll until `check` holds, failing the test after about two seconds
pub async fn wait_until<F, Fut>(mut check: F)
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    for _ in 0..200 {
        if check().await {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not reached in time");
}

pub mod fixtures {
    pub const EMAIL: &str = "a@x.com";
    pub const PASSWORD: &str = "pw";

    pub fn auth_body(token: &str) -> serde_json::Value {
        serde_json::json!({
            "token": token,
            "user": { "id": 1, "name": "A", "email": EMAIL }
        })
    }
}
