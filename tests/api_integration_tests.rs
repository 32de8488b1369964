use std::sync::Arc;

use cloudnav::api::jobs::CreateJobInput;
use cloudnav::api::types::JobStatus;
use cloudnav::api::{Client, JobRepo, ListJobsInput, OwnerRepo, PostgresRepo, ProjectRepo, ServiceRepo};
use cloudnav::core::error::AppError;
use cloudnav::core::resource::{ResourceService, ServiceSource};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path, query_param},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn client(server: &MockServer) -> Client {
    Client::new(server.uri(), Some("test-key".to_string())).unwrap()
}

fn job_json(id: &str, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "serviceId": "srv-1",
        "startCommand": "rake db:migrate",
        "planId": "plan-starter",
        "status": status,
        "createdAt": "2024-05-01T12:00:00Z",
        "startedAt": null,
        "finishedAt": null
    })
}

/// Mounts one service, one database, and the project/environment they live in.
async fn mount_workspace(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/services"))
        .and(query_param("ownerId", "tea-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "cursor": "c1",
                "service": {
                    "id": "srv-1",
                    "name": "api",
                    "type": "web_service",
                    "environmentId": "evm-1",
                    "ownerId": "tea-1"
                }
            }
        ])))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/postgres"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "cursor": "c2",
                "postgres": { "id": "dpg-1", "name": "main-db", "status": "available" }
            }
        ])))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "cursor": "c3", "project": { "id": "prj-1", "name": "Shop" } }
        ])))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/environments"))
        .and(query_param("projectId", "prj-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "cursor": "c4",
                "environment": { "id": "evm-1", "name": "Production", "projectId": "prj-1" }
            }
        ])))
        .mount(server)
        .await;
}

fn resource_service(client: &Client) -> ResourceService {
    ResourceService::new(
        Arc::new(ServiceRepo::new(client.clone())),
        Arc::new(PostgresRepo::new(client.clone())),
        Arc::new(ProjectRepo::new(client.clone())),
    )
}

// ============================================================================
// Services and Resources
// ============================================================================

#[tokio::test]
async fn test_list_services_unwraps_envelope_and_sends_auth() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/services"))
        .and(header("authorization", "Bearer test-key"))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "cursor": "c1", "service": { "id": "srv-1", "name": "api", "type": "web_service" } },
            { "cursor": "c2", "service": { "id": "crn-1", "name": "nightly", "type": "cron_job" } }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let services = ServiceRepo::new(client(&server))
        .list_services(None)
        .await
        .unwrap();

    let ids: Vec<&str> = services.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["srv-1", "crn-1"]);
    assert_eq!(services[1].service_type, "cron_job");
}

#[tokio::test]
async fn test_list_resources_joins_project_and_environment_names() {
    let server = MockServer::start().await;
    mount_workspace(&server).await;

    let resources = resource_service(&client(&server))
        .list_resources(Some("tea-1"))
        .await
        .unwrap();

    assert_eq!(resources.len(), 2);
    assert_eq!(resources[0].id(), "srv-1");
    assert_eq!(resources[0].project_name, "Shop");
    assert_eq!(resources[0].environment_name, "Production");

    // Databases come after services; this one has no environment.
    assert_eq!(resources[1].id(), "dpg-1");
    assert_eq!(resources[1].resource_type(), "postgres");
    assert_eq!(resources[1].project_name, "");
}

#[tokio::test]
async fn test_restart_routes_by_prefix() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/srv-1/restart"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/postgres/dpg-1/restart"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let resources = resource_service(&client(&server));
    resources.restart_resource("srv-1").await.unwrap();
    resources.restart_resource("dpg-1").await.unwrap();

    let err = resources.restart_resource("crn-1").await.unwrap_err();
    assert_eq!(err, AppError::Unsupported("cron jobs cannot be restarted".to_string()));
}

#[tokio::test]
async fn test_deploy_service() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/srv-1/deploys"))
        .and(body_json(json!({})))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "id": "dep-1", "status": "created" })),
        )
        .mount(&server)
        .await;

    let deploy = ServiceRepo::new(client(&server))
        .deploy_service("srv-1")
        .await
        .unwrap();

    assert_eq!(deploy.id, "dep-1");
    assert_eq!(deploy.status.as_deref(), Some("created"));
}

// ============================================================================
// Errors
// ============================================================================

#[tokio::test]
async fn test_api_error_uses_body_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/owners"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "id": "unauthorized", "message": "invalid API key" })),
        )
        .mount(&server)
        .await;

    let err = OwnerRepo::new(client(&server)).list_owners().await.unwrap_err();

    assert_eq!(
        err,
        AppError::Api {
            status: 401,
            message: "invalid API key".to_string()
        }
    );
    assert_eq!(err.to_string(), "API error (HTTP 401): invalid API key");
}

#[tokio::test]
async fn test_api_error_falls_back_to_body_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/srv-1/restart"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let err = ServiceRepo::new(client(&server))
        .restart_service("srv-1")
        .await
        .unwrap_err();

    assert_eq!(
        err,
        AppError::Api {
            status: 503,
            message: "upstream unavailable".to_string()
        }
    );
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/owners"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = OwnerRepo::new(client(&server)).list_owners().await.unwrap_err();
    assert!(matches!(err, AppError::Parse(_)), "got {err:?}");
}

// ============================================================================
// Jobs
// ============================================================================

#[tokio::test]
async fn test_list_jobs_sends_status_filters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/services/srv-1/jobs"))
        .and(query_param("limit", "100"))
        .and(query_param("status", "running"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "cursor": "c1", "job": job_json("job-1", "running") }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let mut input = ListJobsInput::for_service("srv-1");
    input.status = vec!["running".to_string()];
    let jobs = JobRepo::new(client(&server)).list_jobs(&input).await.unwrap();

    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].status, Some(JobStatus::Running));
}

#[tokio::test]
async fn test_list_jobs_rejects_invalid_status_without_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let mut input = ListJobsInput::for_service("srv-1");
    input.status = vec!["canceled".to_string()];
    let err = JobRepo::new(client(&server)).list_jobs(&input).await.unwrap_err();

    assert_eq!(err, AppError::InvalidInput("invalid status: canceled".to_string()));
}

#[tokio::test]
async fn test_create_get_and_cancel_job() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/srv-1/jobs"))
        .and(body_json(json!({ "startCommand": "rake db:migrate", "planId": "plan-starter" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(job_json("job-1", "pending")))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/services/srv-1/jobs/job-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(job_json("job-1", "running")))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/services/srv-1/jobs/job-1/cancel"))
        .respond_with(ResponseTemplate::new(200).set_body_json(job_json("job-1", "canceled")))
        .mount(&server)
        .await;

    let repo = JobRepo::new(client(&server));

    let created = repo
        .create_job(&CreateJobInput {
            service_id: "srv-1".to_string(),
            start_command: "rake db:migrate".to_string(),
            plan_id: Some("plan-starter".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(created.status, Some(JobStatus::Pending));

    let fetched = repo.get_job("srv-1", "job-1").await.unwrap();
    assert_eq!(fetched.status, Some(JobStatus::Running));

    let canceled = repo.cancel_job("srv-1", "job-1").await.unwrap();
    assert_eq!(canceled.status, Some(JobStatus::Canceled));
}
