//! End-to-end tests: MCP session over in-memory pipes, real `RemoteToolClient`,
//! and a raw TCP server standing in for the remote tool-provider API.

use std::sync::Arc;

use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader, DuplexStream, Lines};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use toolbridge_api::RemoteToolClient;
use toolbridge_mcp::{ProtocolAdapter, Session, ShutdownReason, StdioTransport};

fn http_response(status: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {status}\r\n\
         Content-Type: application/json\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\
         \r\n\
         {body}",
        body.len(),
    )
}

/// Consume one HTTP request (headers plus Content-Length body) so the socket
/// is never closed with unread input.
async fn read_request(socket: &mut TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => n,
        };
        buf.extend_from_slice(&chunk[..n]);
        let text = String::from_utf8_lossy(&buf);
        let Some(header_end) = text.find("\r\n\r\n") else {
            continue;
        };
        let content_length = text[..header_end]
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        if buf.len() >= header_end + 4 + content_length {
            return;
        }
    }
}

/// Answer each incoming connection with the next canned response.
async fn start_stub(responses: Vec<String>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        for response in responses {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            read_request(&mut socket).await;
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });
    format!("http://{addr}")
}

/// A running bridge: the client's write end and read end, and the serve task.
struct Bridge {
    input: DuplexStream,
    output: Lines<BufReader<DuplexStream>>,
    task: JoinHandle<ShutdownReason>,
}

impl Bridge {
    fn start(base_url: &str) -> Self {
        let client = RemoteToolClient::new(base_url, "test-jwt-token").unwrap();
        let (input, server_in) = tokio::io::duplex(64 * 1024);
        let (server_out, output) = tokio::io::duplex(64 * 1024);

        let mut session = Session::new(ProtocolAdapter::new(Arc::new(client)));
        session
            .bind(StdioTransport::new(server_in, server_out))
            .unwrap();

        let task = tokio::spawn(async move {
            let reason = session.serve(&CancellationToken::new()).await.unwrap();
            session.close().await.unwrap();
            reason
        });

        Self {
            input,
            output: BufReader::new(output).lines(),
            task,
        }
    }

    async fn request(&mut self, message: Value) -> Value {
        let mut line = serde_json::to_vec(&message).unwrap();
        line.push(b'\n');
        self.input.write_all(&line).await.unwrap();
        let response = self.output.next_line().await.unwrap().unwrap();
        serde_json::from_str(&response).unwrap()
    }

    async fn finish(self) -> ShutdownReason {
        drop(self.input);
        self.task.await.unwrap()
    }
}

fn call_tool(id: u64, name: &str, arguments: Option<Value>) -> Value {
    let mut params = json!({"name": name});
    if let Some(arguments) = arguments {
        params["arguments"] = arguments;
    }
    json!({"jsonrpc": "2.0", "id": id, "method": "tools/call", "params": params})
}

#[tokio::test]
async fn echo_catalog_is_listed() {
    let base_url = start_stub(vec![http_response(
        "200 OK",
        r#"{"tools":[{"name":"echo","parameters":{"type":"object","properties":{"text":{"type":"string"}}}}]}"#,
    )])
    .await;
    let mut bridge = Bridge::start(&base_url);

    let resp = bridge
        .request(json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"}))
        .await;
    assert_eq!(
        resp["result"],
        json!({
            "tools": [{
                "name": "echo",
                "description": "",
                "inputSchema": {"type": "object", "properties": {"text": {"type": "string"}}}
            }]
        })
    );

    assert_eq!(bridge.finish().await, ShutdownReason::EndOfInput);
}

#[tokio::test]
async fn echo_invocation_returns_pretty_payload() {
    let base_url = start_stub(vec![http_response(
        "200 OK",
        r#"{"success":true,"result":"hi"}"#,
    )])
    .await;
    let mut bridge = Bridge::start(&base_url);

    let resp = bridge
        .request(call_tool(2, "echo", Some(json!({"text": "hi"}))))
        .await;
    let result = &resp["result"];
    assert_eq!(result["content"].as_array().unwrap().len(), 1);
    assert_eq!(result["content"][0]["type"], "text");
    assert_eq!(
        result["content"][0]["text"],
        "{\n  \"success\": true,\n  \"result\": \"hi\"\n}"
    );
    assert!(result.get("isError").is_none());

    bridge.finish().await;
}

#[tokio::test]
async fn unauthorized_invocation_is_structured_failure() {
    let base_url = start_stub(vec![http_response(
        "401 Unauthorized",
        r#"{"message":"jwt expired"}"#,
    )])
    .await;
    let mut bridge = Bridge::start(&base_url);

    let resp = bridge.request(call_tool(3, "echo", None)).await;
    assert!(resp.get("error").is_none());
    assert_eq!(resp["result"]["isError"], true);
    let failure: Value =
        serde_json::from_str(resp["result"]["content"][0]["text"].as_str().unwrap()).unwrap();
    assert_eq!(
        failure,
        json!({"success": false, "error": "Authentication failed: Invalid or expired JWT token"})
    );

    bridge.finish().await;
}

#[tokio::test]
async fn unknown_tool_is_structured_failure() {
    let base_url = start_stub(vec![http_response("404 Not Found", "")]).await;
    let mut bridge = Bridge::start(&base_url);

    let resp = bridge.request(call_tool(4, "ghost", Some(json!({})))).await;
    assert_eq!(resp["result"]["isError"], true);
    let failure: Value =
        serde_json::from_str(resp["result"]["content"][0]["text"].as_str().unwrap()).unwrap();
    let message = failure["error"].as_str().unwrap();
    assert!(message.contains("ghost"), "{message}");
    assert!(message.contains("not found"), "{message}");

    bridge.finish().await;
}

#[tokio::test]
async fn malformed_catalog_is_protocol_error() {
    let base_url = start_stub(vec![http_response("200 OK", r#"{"data":{}}"#)]).await;
    let mut bridge = Bridge::start(&base_url);

    let resp = bridge
        .request(json!({"jsonrpc": "2.0", "id": 5, "method": "tools/list"}))
        .await;
    assert!(resp.get("result").is_none());
    assert_eq!(resp["error"]["code"], -32603);
    assert!(
        resp["error"]["message"]
            .as_str()
            .unwrap()
            .contains("missing tools array")
    );

    bridge.finish().await;
}

#[tokio::test]
async fn session_survives_failures() {
    let base_url = start_stub(vec![
        http_response("500 Internal Server Error", r#"{"error":"boom"}"#),
        http_response("200 OK", r#"{"success":true,"result":"after"}"#),
    ])
    .await;
    let mut bridge = Bridge::start(&base_url);

    let failed = bridge.request(call_tool(6, "echo", None)).await;
    assert_eq!(failed["result"]["isError"], true);
    assert!(
        failed["result"]["content"][0]["text"]
            .as_str()
            .unwrap()
            .contains("Remote API error")
    );

    let ok = bridge.request(call_tool(7, "echo", None)).await;
    assert_eq!(ok["id"], 7);
    assert!(ok["result"].get("isError").is_none());

    assert_eq!(bridge.finish().await, ShutdownReason::EndOfInput);
}
