//! Project directory tests against a mock server.

mod common;

use common::{wait_until, workspace, workspace_with, MockNavigator};
use std::sync::Arc;
use std::time::Duration;
use teamspace_core::{CollaboratorRef, Project, ResourceId};
use teamspace_session::{
    MemoryTokenStore, Operation, SessionSettings, WorkspaceError, WorkspaceEvent,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn projects_body(projects: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({ "projects": projects }))
}

#[tokio::test]
async fn test_list_all_replaces_cache_with_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/all"))
        .respond_with(projects_body(serde_json::json!([
            { "id": 1, "name": "Old", "users": [1] },
            { "id": 2, "name": "Gone", "users": [1] }
        ])))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/projects/all"))
        .respond_with(projects_body(serde_json::json!([
            { "id": 5, "name": "Demo", "users": [1, 2] }
        ])))
        .mount(&server)
        .await;

    let ws = workspace(&server, Arc::new(MemoryTokenStore::with_token("t1")));
    let directory = ws.directory();

    assert_eq!(directory.list_all().await.unwrap().len(), 2);

    let projects = directory.list_all().await.unwrap();
    let expected = vec![Project {
        id: ResourceId::from(5),
        name: "Demo".into(),
        users: vec![
            CollaboratorRef::Id(ResourceId::from(1)),
            CollaboratorRef::Id(ResourceId::from(2)),
        ],
    }];

    assert_eq!(projects, expected);
    assert_eq!(directory.items().await, expected);
    assert!(directory.find(&ResourceId::from(1)).await.is_none());
}

#[tokio::test]
async fn test_failed_list_leaves_cache_untouched() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/all"))
        .respond_with(projects_body(serde_json::json!([
            { "id": 5, "name": "Demo", "users": [] }
        ])))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/projects/all"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let ws = workspace(&server, Arc::new(MemoryTokenStore::with_token("t1")));
    let mut events = ws.subscribe();

    ws.directory().list_all().await.unwrap();
    let error = ws.directory().list_all().await.unwrap_err();

    assert!(matches!(error, WorkspaceError::Gateway(_)));
    assert_eq!(ws.directory().items().await.len(), 1);

    let mut failure = None;
    while let Ok(event) = events.try_recv() {
        if let WorkspaceEvent::OperationFailed { operation, message } = event {
            failure = Some((operation, message));
        }
    }
    assert_eq!(
        failure,
        Some((
            Operation::ListProjects,
            "Could not reach the server. Please try again.".to_string()
        ))
    );
}

#[tokio::test]
async fn test_unauthorized_list_does_not_log_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/all"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let tokens = Arc::new(MemoryTokenStore::with_token("t1"));
    let ws = workspace(&server, tokens.clone());

    assert!(ws.directory().list_all().await.is_err());
    assert_eq!(
        teamspace_session::TokenStore::load(tokens.as_ref()).await.as_deref(),
        Some("t1")
    );
}

#[tokio::test]
async fn test_response_after_reset_is_not_cached() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/all"))
        .respond_with(
            projects_body(serde_json::json!([{ "id": 5, "name": "Demo", "users": [] }]))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;

    let ws = workspace(&server, Arc::new(MemoryTokenStore::with_token("t1")));
    let directory = ws.directory().clone();

    let in_flight = {
        let directory = directory.clone();
        tokio::spawn(async move { directory.list_all().await })
    };

    let server = &server;
    wait_until(|| async move {
        !server.received_requests().await.unwrap_or_default().is_empty()
    })
    .await;
    directory.reset().await;

    let late = in_flight.await.unwrap().unwrap();
    assert_eq!(late.len(), 1);
    assert!(directory.items().await.is_empty());
}

#[tokio::test]
async fn test_list_projects_requires_a_session() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/all"))
        .respond_with(projects_body(serde_json::json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let ws = workspace(&server, Arc::new(MemoryTokenStore::new()));

    let result = ws.list_projects().await;
    assert!(matches!(result, Err(WorkspaceError::NotAuthenticated)));
}

#[tokio::test]
async fn test_list_projects_rehydrates_first() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "user": { "id": 1, "name": "A" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/projects/all"))
        .respond_with(projects_body(serde_json::json!([
            { "id": 5, "name": "Demo", "users": [1] }
        ])))
        .expect(2)
        .mount(&server)
        .await;

    let ws = workspace(&server, Arc::new(MemoryTokenStore::with_token("t1")));

    assert_eq!(ws.list_projects().await.unwrap().len(), 1);
    assert_eq!(ws.list_projects().await.unwrap().len(), 1);
    assert!(ws.session().current().await.is_authenticated());
}

#[tokio::test]
async fn test_open_project_navigates_with_project_state() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/all"))
        .respond_with(projects_body(serde_json::json!([
            { "_id": "p1", "name": "Demo", "users": ["u1", "u2"] }
        ])))
        .mount(&server)
        .await;

    let mut navigator = MockNavigator::new();
    navigator
        .expect_goto()
        .withf(|intent| {
            intent.path == "/project"
                && matches!(
                    &intent.state,
                    Some(teamspace_core::NavigationState::Project { project })
                        if project.id.as_str() == "p1" && project.collaborator_count() == 2
                )
        })
        .times(1)
        .return_const(());

    let ws = workspace_with(
        &server,
        Arc::new(MemoryTokenStore::with_token("t1")),
        navigator,
        SessionSettings::default(),
    );

    ws.directory().list_all().await.unwrap();
    let opened = ws.open_project(&ResourceId::from("p1")).await.unwrap();
    assert_eq!(opened.name, "Demo");

    let missing = ws.open_project(&ResourceId::from("nope")).await;
    assert!(matches!(missing, Err(WorkspaceError::ProjectNotCached(_))));
}

#[tokio::test]
async fn test_logout_drops_cached_projects() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/users/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::fixtures::auth_body("t1")))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/projects/all"))
        .respond_with(projects_body(serde_json::json!([
            { "id": 5, "name": "Demo", "users": [1] }
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/logout"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let ws = workspace(&server, Arc::new(MemoryTokenStore::new()));

    ws.lifecycle()
        .login(common::fixtures::EMAIL, common::fixtures::PASSWORD)
        .await
        .unwrap();
    ws.list_projects().await.unwrap();
    assert_eq!(ws.directory().items().await.len(), 1);

    ws.logout().await.unwrap();
    assert!(ws.directory().items().await.is_empty());
}
