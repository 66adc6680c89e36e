use secrecy::Secret;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use taiga_board::filters::{Dimension, Filters};
use taiga_board::taiga::TaigaError;
use taiga_board::taiga::client::{TaigaClient, filters_to_query};

fn token() -> Secret<String> {
    Secret::new("test-token".to_owned())
}

#[tokio::test]
async fn list_issues_sends_filter_query_params() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/issues"))
        .and(query_param("project", "1"))
        .and(query_param("priority", "5,6"))
        .and(query_param("exclude_type", "9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "id": 42,
                "subject": "Crash when saving a draft",
                "project": 1,
                "status": 3,
                "status_extra_info": {"name": "Closed", "color": "#a8e440", "is_closed": true},
                "priority": 5,
                "type": 20
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = TaigaClient::new(&server.uri()).unwrap();
    let filters = Filters::default()
        .apply(Dimension::Priority, vec![6, 5], false)
        .apply(Dimension::Type, vec![9], true);
    let query = filters_to_query(&filters, &[1]);

    let issues = client.list_issues(&token(), &query).await.unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].id, 42);
    assert_eq!(issues[0].issue_type, Some(20));
    assert_eq!(
        issues[0].status_extra_info.as_ref().unwrap().color,
        "#a8e440"
    );
}

#[tokio::test]
async fn get_project_returns_catalogs() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/projects/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 7,
            "name": "Larch",
            "slug": "larch",
            "issue_statuses": [
                {"id": 1, "name": "New", "color": "#70728f", "order": 1}
            ],
            "priorities": [
                {"id": 5, "name": "High", "color": "#ff3333", "order": 3}
            ],
            "severities": [],
            "issue_types": [
                {"id": 20, "name": "Bug", "color": "#e44057", "order": 1}
            ],
            "members": [
                {"id": 12, "full_name": "Ada Byron", "role_name": "Developer"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = TaigaClient::new(&server.uri()).unwrap();
    let dto = client.get_project(&token(), 7).await.unwrap();
    let (project, metadata) = dto.into_parts();

    assert_eq!(project.name, "Larch");
    assert_eq!(metadata.statuses.len(), 1);
    assert_eq!(metadata.priorities[0].name, "High");
    assert_eq!(metadata.issue_types[0].color, "#e44057");
    assert_eq!(metadata.members[0].full_name, "Ada Byron");
}

#[tokio::test]
async fn unauthorized_is_a_distinct_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/issues"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = TaigaClient::new(&server.uri()).unwrap();
    let err = client.list_issues(&token(), &[]).await.unwrap_err();
    assert!(matches!(err, TaigaError::Unauthorized(_)));
}

#[tokio::test]
async fn server_errors_surface_status_and_context() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/projects/1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = TaigaClient::new(&server.uri()).unwrap();
    let err = client.get_project(&token(), 1).await.unwrap_err();
    match err {
        TaigaError::Status { status, context } => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(context, "projects");
        }
        other => panic!("expected Status error, got {other:?}"),
    }
}
