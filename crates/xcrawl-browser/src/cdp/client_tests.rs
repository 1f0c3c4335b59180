//! Client tests against an in-process fake DevTools endpoint.

use futures::SinkExt;
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::Message;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

enum Reply {
    Ok(Value),
    Fail(&'static str),
    Hangup,
}

type Handler = Arc<dyn Fn(&str, &Value) -> Reply + Send + Sync>;

/// Serve `/json/version` over HTTP and answer CDP commands on a WebSocket with `handler`.
async fn fake_browser(handler: Handler) -> MockServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let ws_url = format!(
        "ws://{}/devtools/browser/fake",
        listener.local_addr().unwrap()
    );

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let handler = handler.clone();
            tokio::spawn(async move {
                let Ok(mut ws) = tokio_tungstenite::accept_async(stream).await else {
                    return;
                };
                while let Some(Ok(msg)) = ws.next().await {
                    let Message::Text(text) = msg else {
                        continue;
                    };
                    let req: Value = serde_json::from_str(&text).unwrap();
                    let name = req["method"].as_str().unwrap_or_default().to_string();
                    let reply = match handler(&name, &req["params"]) {
                        Reply::Ok(result) => json!({
                            "id": req["id"],
                            "result": result,
                            "sessionId": req["sessionId"],
                        }),
                        Reply::Fail(message) => json!({
                            "id": req["id"],
                            "error": {"code": -32000, "message": message},
                        }),
                        Reply::Hangup => return,
                    };
                    if ws.send(Message::Text(reply.to_string().into())).await.is_err() {
                        return;
                    }
                }
            });
        }
    });

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json/version"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Browser": "HeadlessChrome/120.0.6099.109",
            "Protocol-Version": "1.3",
            "User-Agent": "Mozilla/5.0 HeadlessChrome",
            "webSocketDebuggerUrl": ws_url,
        })))
        .mount(&server)
        .await;
    server
}

/// A browser with one blank page; `page` answers everything else.
fn with_page(page: impl Fn(&str, &Value) -> Reply + Send + Sync + 'static) -> Handler {
    Arc::new(move |name: &str, params: &Value| match name {
        "Target.createTarget" => Reply::Ok(json!({"targetId": "T1"})),
        "Target.attachToTarget" => Reply::Ok(json!({"sessionId": "S1"})),
        "Page.enable" | "Runtime.enable" => Reply::Ok(json!({})),
        _ => page(name, params),
    })
}

fn unhandled(_: &str, _: &Value) -> Reply {
    Reply::Fail("unhandled")
}

#[tokio::test]
async fn test_connect_reports_browser() {
    let server = fake_browser(with_page(unhandled)).await;
    let client = CdpClient::connect(&server.uri()).await.unwrap();

    assert_eq!(client.browser(), "HeadlessChrome/120.0.6099.109");
    assert!(client.is_connected());
}

#[tokio::test]
async fn test_connect_without_devtools_endpoint() {
    let server = MockServer::start().await;
    let err = CdpClient::connect(&server.uri()).await.err().unwrap();
    assert!(matches!(err, CdpError::ChromeNotAvailable(_)));
}

#[tokio::test]
async fn test_new_page_and_title() {
    let server = fake_browser(with_page(|name: &str, params: &Value| {
        match (name, params["expression"].as_str()) {
            ("Runtime.evaluate", Some("document.title")) => {
                Reply::Ok(json!({"result": {"type": "string", "value": "Fake page"}}))
            }
            _ => Reply::Fail("unhandled"),
        }
    }))
    .await;
    let client = CdpClient::connect(&server.uri()).await.unwrap();

    let page = client.new_page().await.unwrap();
    assert_eq!(page.target_id(), "T1");
    assert_eq!(page.session_id(), "S1");
    assert_eq!(page.get_title().await.unwrap(), "Fake page");
}

#[tokio::test]
async fn test_navigate_waits_for_complete_document() {
    let server = fake_browser(with_page(|name: &str, params: &Value| {
        match (name, params["expression"].as_str()) {
            ("Page.navigate", _) => Reply::Ok(json!({"frameId": "F1", "loaderId": "L1"})),
            ("Runtime.evaluate", Some("[document.readyState, location.href]")) => {
                Reply::Ok(json!({"result": {
                    "type": "object",
                    "value": ["complete", "https://example.com/"]
                }}))
            }
            _ => Reply::Fail("unhandled"),
        }
    }))
    .await;
    let client = CdpClient::connect(&server.uri()).await.unwrap();
    let page = client.new_page().await.unwrap();

    assert_eq!(page.navigate("https://example.com").await.unwrap(), "F1");
}

#[tokio::test]
async fn test_navigate_error_text() {
    let server = fake_browser(with_page(|name: &str, _: &Value| match name {
        "Page.navigate" => Reply::Ok(json!({
            "frameId": "F1",
            "errorText": "net::ERR_NAME_NOT_RESOLVED"
        })),
        _ => Reply::Fail("unhandled"),
    }))
    .await;
    let client = CdpClient::connect(&server.uri()).await.unwrap();
    let page = client.new_page().await.unwrap();

    let err = page.navigate("https://unreachable.invalid").await.unwrap_err();
    assert!(matches!(err, CdpError::NavigationFailed(ref m) if m == "net::ERR_NAME_NOT_RESOLVED"));
}

#[tokio::test]
async fn test_evaluate_exception() {
    let server = fake_browser(with_page(|name: &str, _: &Value| match name {
        "Runtime.evaluate" => Reply::Ok(json!({
            "result": {"type": "object", "subtype": "error"},
            "exceptionDetails": {
                "exceptionId": 1,
                "text": "Uncaught",
                "lineNumber": 0,
                "columnNumber": 0,
                "exception": {
                    "type": "object",
                    "subtype": "error",
                    "description": "SyntaxError: The string '//[' is not a valid XPath expression."
                }
            }
        })),
        _ => Reply::Fail("unhandled"),
    }))
    .await;
    let client = CdpClient::connect(&server.uri()).await.unwrap();
    let page = client.new_page().await.unwrap();

    let err = page.evaluate("1 +").await.unwrap_err();
    match err {
        CdpError::JavaScript(message) => assert!(message.contains("not a valid XPath")),
        other => panic!("unexpected: {:?}", other),
    }
}

#[tokio::test]
async fn test_evaluate_xpath_collects_elements() {
    let server = fake_browser(with_page(|name: &str, params: &Value| match name {
        "Runtime.evaluate" => {
            assert_eq!(params["objectGroup"], "xpath-1");
            Reply::Ok(json!({"result": {"type": "object", "subtype": "array", "objectId": "arr"}}))
        }
        "Runtime.getProperties" => Reply::Ok(json!({"result": [
            {"name": "0", "value": {
                "type": "object", "subtype": "node", "description": "h1", "objectId": "n0"
            }},
            {"name": "1", "value": {
                "type": "object", "subtype": "node", "description": "img", "objectId": "n1"
            }},
            {"name": "length", "value": {"type": "number", "value": 2}}
        ]})),
        _ => Reply::Fail("unhandled"),
    }))
    .await;
    let client = CdpClient::connect(&server.uri()).await.unwrap();
    let page = client.new_page().await.unwrap();

    let nodes = page.evaluate_xpath("//h1 | //img", "xpath-1").await.unwrap();
    let ids: Vec<_> = nodes.iter().filter_map(|n| n.object_id.as_deref()).collect();
    assert_eq!(ids, vec!["n0", "n1"]);
}

#[tokio::test]
async fn test_protocol_error_surfaces() {
    let server = fake_browser(with_page(unhandled)).await;
    let client = CdpClient::connect(&server.uri()).await.unwrap();

    let err = client.call("Foo.bar", None).await.unwrap_err();
    assert!(matches!(err, CdpError::Protocol { code: -32000, .. }));
}

#[tokio::test]
async fn test_hangup_fails_pending_call() {
    let server = fake_browser(with_page(|_: &str, _: &Value| Reply::Hangup)).await;
    let client = CdpClient::connect(&server.uri()).await.unwrap();
    let page = client.new_page().await.unwrap();

    let err = page.get_title().await.unwrap_err();
    assert!(matches!(err, CdpError::SessionClosed));
    assert!(!client.is_connected());
}

#[tokio::test]
async fn test_close_browser_tolerates_hangup() {
    let server = fake_browser(with_page(|name: &str, _: &Value| match name {
        "Browser.close" => Reply::Hangup,
        _ => Reply::Fail("unhandled"),
    }))
    .await;
    let client = CdpClient::connect(&server.uri()).await.unwrap();

    client.close_browser().await.unwrap();
}
