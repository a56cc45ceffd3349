//! HttpSock against a wiremock server: request shape, reply mapping, errors.

use std::collections::HashMap;
use std::time::Duration;

use configs::RequestHandlerConfig;
use requesthandler::http::{HttpSock, PUBLISHER_HEADER};
use requesthandler::{
    CallRequest,
    Filters,
    FlowRequest,
    RequestError,
    RequestHandlerClient,
    TagRequest,
};
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, service: &str) -> RequestHandlerClient<HttpSock> {
    let cfg = RequestHandlerConfig {
        publisher: "api-manager".into(),
        timeout_ms: 3000,
        endpoints: HashMap::from([(service.to_string(), format!("{}/", server.uri()))]),
    };
    RequestHandlerClient::from_config(&cfg).expect("client build")
}

#[tokio::test]
async fn get_hits_endpoint_with_publisher_header() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path(format!("/v1/tags/{id}")))
        .and(header(PUBLISHER_HEADER, "api-manager"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "id": id,
                "name": "vip",
                "tm_delete": "9999-01-01 00:00:00.000000"
            })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let rh = client_for(&server, "tag-manager");
    let tag = rh.tag_v1_tag_get(id).await.expect("tag get");
    assert_eq!(tag.id, id);
    assert_eq!(tag.name, "vip");
}

#[tokio::test]
async fn list_sends_page_query_and_filter_body() {
    let server = MockServer::start().await;
    let customer_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/v1/activeflows"))
        .and(query_param("page_token", "2020-09-20 03:23:20.995000"))
        .and(query_param("page_size", "10"))
        .and(body_json(json!({"customer_id": customer_id, "deleted": false})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"customer_id": customer_id}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let rh = client_for(&server, "flow-manager");
    let mut filters = Filters::new();
    filters.insert("customer_id".into(), json!(customer_id));
    filters.insert("deleted".into(), json!(false));

    let res = rh.flow_v1_activeflow_list("2020-09-20 03:23:20.995000", 10, &filters)
        .await
        .expect("list");
    assert_eq!(res.len(), 1);
    assert_eq!(res[0].customer_id, customer_id);
}

#[tokio::test]
async fn error_status_maps_to_status_error() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path(format!("/v1/calls/{id}/hangup")))
        .respond_with(ResponseTemplate::new(400).set_body_string("invalid call status"))
        .expect(1)
        .mount(&server)
        .await;

    let rh = client_for(&server, "call-manager");
    let err = rh.call_v1_call_hangup(id).await.unwrap_err();
    assert!(matches!(err, RequestError::Status(400)));
}

#[tokio::test]
async fn empty_reply_body_is_accepted_for_unit_rpcs() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();

    Mock::given(method("DELETE"))
        .and(path(format!("/v1/calls/{id}/hold")))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let rh = client_for(&server, "call-manager");
    rh.call_v1_call_hold_off(id).await.expect("hold off");
}

#[tokio::test]
async fn missing_endpoint_is_reported() {
    let server = MockServer::start().await;
    let rh = client_for(&server, "call-manager");

    let err = rh.tag_v1_tag_get(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, RequestError::NoEndpoint(q) if q == "bin-manager.tag-manager.request"));
}

#[tokio::test]
async fn slow_reply_times_out() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path(format!("/v1/calls/{id}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(500))
                .set_body_json(json!({"id": id})),
        )
        .mount(&server)
        .await;

    let rh = client_for(&server, "call-manager").with_timeout(Duration::from_millis(50));
    let err = rh.call_v1_call_get(id).await.unwrap_err();
    assert!(matches!(err, RequestError::Timeout { .. }), "unexpected error: {err}");
}
