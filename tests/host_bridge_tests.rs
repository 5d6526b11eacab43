//! Host bridge tests
//!
//! Drive the plugin through newline-delimited JSON exactly as the dashboard
//! would, using in-memory readers and writers.

use std::sync::Arc;

use serde_json::{Value, json};
use traceflow_plugin::plugin::HostResponse;
use traceflow_plugin::{
    HostBridge, MemoryTraceflowStore, NewTraceRequest, TraceRequestManager, TraceflowPlugin,
    TraceflowStore,
};

fn bridge() -> (HostBridge<TraceflowPlugin>, MemoryTraceflowStore) {
    let store = MemoryTraceflowStore::new();
    let manager = TraceRequestManager::new(Arc::new(store.clone()));
    (HostBridge::new(TraceflowPlugin::new(manager)), store)
}

async fn run(bridge: &mut HostBridge<TraceflowPlugin>, requests: &[Value]) -> Vec<Value> {
    let input: String = requests
        .iter()
        .map(|r| format!("{}\n", r))
        .collect();
    let mut output = Vec::new();

    bridge.serve(input.as_bytes(), &mut output).await.unwrap();

    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[tokio::test]
async fn test_register_and_navigation() {
    let (mut bridge, _) = bridge();
    let responses = run(
        &mut bridge,
        &[
            json!({ "type": "register" }),
            json!({ "type": "navigation", "basePath": "/traceflow-plugin" }),
        ],
    )
    .await;

    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["type"], "register");
    assert_eq!(responses[0]["metadata"]["name"], "traceflowPlugin");
    assert_eq!(
        responses[0]["metadata"]["actionNames"],
        json!(["traceflowPlugin/addTf", "traceflowPlugin/showGraphAction"])
    );
    assert_eq!(responses[0]["routes"], json!(["/components"]));

    assert_eq!(responses[1]["navigation"]["title"], "Trace Flow");
    assert_eq!(
        responses[1]["navigation"]["path"],
        "/traceflow-plugin/components"
    );
}

#[tokio::test]
async fn test_action_errors_are_reported_not_fatal() {
    let (mut bridge, store) = bridge();
    let responses = run(
        &mut bridge,
        &[
            json!({
                "type": "action",
                "sessionId": "s1",
                "payload": { "action": "traceflowPlugin/addTf", "name": "" }
            }),
            json!({
                "type": "action",
                "sessionId": "s1",
                "payload": {
                    "action": "traceflowPlugin/addTf",
                    "name": "t1",
                    "fromNamespace": "default",
                    "fromPod": "pod-a",
                    "toNamespace": "default",
                    "toPod": "pod-b"
                }
            }),
        ],
    )
    .await;

    assert!(
        responses[0]["error"]
            .as_str()
            .unwrap()
            .contains("name must not be empty")
    );
    assert_eq!(responses[1], json!({ "type": "action" }));
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_graph_follows_session_through_bridge() {
    let (mut bridge, _) = bridge();
    let responses = run(
        &mut bridge,
        &[
            json!({
                "type": "action",
                "sessionId": "s1",
                "payload": {
                    "action": "traceflowPlugin/addTf",
                    "name": "t1",
                    "fromNamespace": "default",
                    "fromPod": "pod-a",
                    "toNamespace": "default",
                    "toPod": "pod-b"
                }
            }),
            json!({
                "type": "action",
                "sessionId": "s1",
                "payload": { "action": "traceflowPlugin/showGraphAction", "name": "t1" }
            }),
            json!({ "type": "content", "sessionId": "s1", "path": "/components" }),
            json!({ "type": "content", "sessionId": "s2", "path": "/components" }),
        ],
    )
    .await;

    let members = |response: &Value| {
        response["content"]["components"][0]["config"]["sections"][0]["members"]
            .as_array()
            .unwrap()
            .len()
    };
    assert_eq!(members(&responses[2]), 2);
    assert_eq!(members(&responses[3]), 1);

    let graph = &responses[2]["content"]["components"][0]["config"]["sections"][0]["members"][1]
        ["view"]["config"]["body"];
    assert_eq!(graph["type"], "graphviz");
    assert!(graph["config"]["dot"].as_str().unwrap().contains("digraph"));
    assert_eq!(bridge.session_count(), 1);
}

#[tokio::test]
async fn test_malformed_lines_do_not_stop_the_loop() {
    let (mut bridge, _) = bridge();
    let mut output = Vec::new();
    let input = "not json\n\n{\"type\":\"register\"}\n";

    bridge.serve(input.as_bytes(), &mut output).await.unwrap();

    let responses: Vec<HostResponse> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(responses.len(), 2);
    assert!(matches!(responses[0], HostResponse::Error { .. }));
    assert!(matches!(responses[1], HostResponse::Register { .. }));
}

#[tokio::test]
async fn test_stateless_actions_do_not_track_sessions() {
    let (mut bridge, store) = bridge();
    run(
        &mut bridge,
        &[
            json!({ "type": "action", "sessionId": "s1", "payload": { "action": "x" } }),
            json!({
                "type": "action",
                "sessionId": "s2",
                "payload": {
                    "action": "traceflowPlugin/addTf",
                    "name": "t1",
                    "fromNamespace": "default",
                    "fromPod": "pod-a",
                    "toNamespace": "default",
                    "toPod": "pod-b"
                }
            }),
            json!({
                "type": "action",
                "sessionId": "s3",
                "payload": { "action": "traceflowPlugin/showGraphAction", "name": "ghost" }
            }),
        ],
    )
    .await;

    assert_eq!(store.len(), 1);
    assert_eq!(bridge.session_count(), 0);
}

#[tokio::test]
async fn test_close_session_drops_state() {
    let (mut bridge, store) = bridge();
    store
        .create(&NewTraceRequest::new(
            "t1", "default", "pod-a", "default", "pod-b",
        ))
        .await
        .unwrap();

    run(
        &mut bridge,
        &[json!({
            "type": "action",
            "sessionId": "s1",
            "payload": { "action": "traceflowPlugin/showGraphAction", "name": "t1" }
        })],
    )
    .await;
    assert_eq!(bridge.session_count(), 1);

    run(
        &mut bridge,
        &[json!({ "type": "closeSession", "sessionId": "s1" })],
    )
    .await;
    assert_eq!(bridge.session_count(), 0);
}

#[tokio::test]
async fn test_unknown_route_reports_error() {
    let (mut bridge, _) = bridge();
    let responses = run(
        &mut bridge,
        &[json!({ "type": "content", "sessionId": "s1", "path": "/nowhere" })],
    )
    .await;

    assert!(responses[0].get("content").is_none());
    assert!(responses[0]["error"].as_str().unwrap().contains("not found"));
}
