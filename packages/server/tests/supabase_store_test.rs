use serde_json::json;
use wiremock::{
    matchers::{body_json, header, header_exists, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

use werewolf_tasks::{
    models::{member::Member, role::Role, team::Team},
    store::{GameStore, StoreError, SupabaseStore},
    utils::test_setup::sample_config,
};

fn member_row(position: usize, name: &str) -> serde_json::Value {
    json!({
        "position": position,
        "name": name,
        "team": "A",
        "role": "werewolf",
        "large_tasks": ["baron"],
        "small_tasks": []
    })
}

#[tokio::test]
async fn load_config_reads_single_row() {
    let mock_server = MockServer::start().await;
    let config = sample_config();

    Mock::given(method("GET"))
        .and(path("/rest/v1/game_config"))
        .and(query_param("id", "eq.1"))
        .and(header("apikey", "test-key"))
        .and(header("Authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 1,
            "mode": "auto",
            "team_a": config.team_a,
            "team_b": config.team_b,
            "villager_count": 3,
            "werewolf_count": 2,
            "large_task_pool": config.large_task_pool,
            "small_task_pool": config.small_task_pool,
            "large_tasks_per_member": 1,
            "small_tasks_per_member": 1
        }])))
        .mount(&mock_server)
        .await;

    let store = SupabaseStore::new(mock_server.uri(), "test-key");
    assert_eq!(store.load_config().await.unwrap(), Some(config));
}

#[tokio::test]
async fn load_config_without_rows_is_none() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/game_config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let store = SupabaseStore::new(format!("{}/", mock_server.uri()), "test-key");
    assert_eq!(store.load_config().await.unwrap(), None);
}

#[tokio::test]
async fn replace_config_upserts() {
    let mock_server = MockServer::start().await;
    let config = sample_config();

    Mock::given(method("POST"))
        .and(path("/rest/v1/game_config"))
        .and(header_exists("Prefer"))
        .and(body_json(json!({
            "id": 1,
            "mode": "auto",
            "team_a": config.team_a,
            "team_b": config.team_b,
            "villager_count": 3,
            "werewolf_count": 2,
            "large_task_pool": config.large_task_pool,
            "small_task_pool": config.small_task_pool,
            "large_tasks_per_member": 1,
            "small_tasks_per_member": 1
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = SupabaseStore::new(mock_server.uri(), "test-key");
    store.replace_config(&config).await.unwrap();
}

#[tokio::test]
async fn replace_members_deletes_then_inserts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/members"))
        .and(query_param("position", "gte.0"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/members"))
        .and(body_json(json!([member_row(0, "A1"), member_row(1, "A2")])))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&mock_server)
        .await;

    let members: Vec<Member> = ["A1", "A2"]
        .iter()
        .map(|name| Member {
            name: name.to_string(),
            team: Team::A,
            role: Role::Werewolf,
            large_tasks: vec!["baron".to_string()],
            small_tasks: vec![],
        })
        .collect();

    let store = SupabaseStore::new(mock_server.uri(), "test-key");
    store.replace_members(&members).await.unwrap();
}

#[tokio::test]
async fn load_members_are_ordered_by_position() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/members"))
        .and(query_param("order", "position.asc"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([member_row(0, "A1"), member_row(1, "A2")])),
        )
        .mount(&mock_server)
        .await;

    let store = SupabaseStore::new(mock_server.uri(), "test-key");
    let members = store.load_members().await.unwrap();
    let names: Vec<_> = members.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["A1", "A2"]);
    assert_eq!(members[0].large_tasks, ["baron"]);
}

#[tokio::test]
async fn load_member_filters_by_name() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/members"))
        .and(query_param("name", "eq.ミッド 太郎"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([member_row(3, "ミッド 太郎")])))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/members"))
        .and(query_param("name", "eq.nobody"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let store = SupabaseStore::new(mock_server.uri(), "test-key");
    let member = store.load_member("ミッド 太郎").await.unwrap().unwrap();
    assert_eq!(member.role, Role::Werewolf);
    assert_eq!(store.load_member("nobody").await.unwrap(), None);
}

#[tokio::test]
async fn reset_deletes_config_and_members() {
    let mock_server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/rest/v1/game_config"))
        .and(query_param("id", "eq.1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/rest/v1/members"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = SupabaseStore::new(mock_server.uri(), "test-key");
    store.reset().await.unwrap();
}

#[tokio::test]
async fn error_status_is_reported() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/members"))
        .respond_with(ResponseTemplate::new(503).set_body_string("database is starting"))
        .mount(&mock_server)
        .await;

    let store = SupabaseStore::new(mock_server.uri(), "test-key");
    match store.load_members().await {
        Err(StoreError::Status { status, body }) => {
            assert_eq!(status, 503);
            assert_eq!(body, "database is starting");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn malformed_rows_are_a_decode_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/members"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "name": "A1" }])))
        .mount(&mock_server)
        .await;

    let store = SupabaseStore::new(mock_server.uri(), "test-key");
    assert!(matches!(
        store.load_members().await,
        Err(StoreError::Decode(_))
    ));
}
