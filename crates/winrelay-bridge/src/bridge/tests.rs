use super::*;
use crate::window::mock::MockWindow;
use serde_json::{json, Value};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::{accept_async, WebSocketStream};

type Server = WebSocketStream<TcpStream>;

async fn listen() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("ws://{}/bridge", listener.local_addr().unwrap());
    (listener, url)
}

async fn accept(listener: &TcpListener) -> Server {
    let (stream, _) = listener.accept().await.unwrap();
    accept_async(stream).await.unwrap()
}

async fn next_json(ws: &mut Server) -> Value {
    loop {
        match ws.next().await.unwrap().unwrap() {
            Message::Text(text) => return serde_json::from_str(text.as_str()).unwrap(),
            _ => continue,
        }
    }
}

async fn send_json(ws: &mut Server, value: Value) {
    ws.send(Message::Text(value.to_string().into())).await.unwrap();
}

async fn send_raw(ws: &mut Server, text: &str) {
    ws.send(Message::Text(text.to_string().into())).await.unwrap();
}

fn spawn_bridge(
    url: String,
    window: MockWindow,
) -> (
    tokio::task::JoinHandle<(Result<CloseReason, BridgeError>, Bridge<MockWindow>)>,
    BridgeHandle,
) {
    let (mut bridge, handle) = Bridge::new(url, window, Duration::from_secs(1));
    let task = tokio::spawn(async move {
        let result = bridge.run().await;
        (result, bridge)
    });
    (task, handle)
}

#[tokio::test]
async fn ready_is_sent_first() {
    let (listener, url) = listen().await;
    let (window, _recorded) = MockWindow::new();
    let (task, _handle) = spawn_bridge(url, window);

    let mut ws = accept(&listener).await;
    assert_eq!(next_json(&mut ws).await, json!({"type": "extension_ready"}));

    ws.close(None).await.unwrap();
    let (result, bridge) = task.await.unwrap();
    assert_eq!(result.unwrap(), CloseReason::PeerClosed);
    assert_eq!(bridge.state(), BridgeState::Closed);
}

#[tokio::test]
async fn set_title_is_applied_without_a_response() {
    let (listener, url) = listen().await;
    let (window, recorded) = MockWindow::new();
    let (task, _handle) = spawn_bridge(url, window.with_picks(&["/srv/data"]));

    let mut ws = accept(&listener).await;
    next_json(&mut ws).await;

    send_json(
        &mut ws,
        json!({
            "type": "extension",
            "extension_call": "setTitle",
            "extension_id": "1",
            "extension_parameters": "{\"title\":\"X\"}",
        }),
    )
    .await;
    send_json(
        &mut ws,
        json!({
            "type": "extension",
            "extension_call": "openDir",
            "extension_id": "2",
            "extension_parameters": "{\"dir\":null,\"filter\":null}",
        }),
    )
    .await;

    // The first reply belongs to openDir: setTitle answered nothing.
    assert_eq!(
        next_json(&mut ws).await,
        json!({
            "type": "extension_response",
            "extension_call": "openDirResponse",
            "extension_id": "2",
            "openDirResponse": "/srv/data",
        })
    );
    assert_eq!(recorded.lock().unwrap().title.as_deref(), Some("X"));

    ws.close(None).await.unwrap();
    let (result, _) = task.await.unwrap();
    assert_eq!(result.unwrap(), CloseReason::PeerClosed);
}

#[tokio::test]
async fn open_file_response_echoes_correlation_id() {
    let (listener, url) = listen().await;
    let (window, recorded) = MockWindow::new();
    let (task, _handle) = spawn_bridge(url, window.with_picks(&["/tmp/photo.png"]));

    let mut ws = accept(&listener).await;
    next_json(&mut ws).await;

    let params = json!({"dir": "/tmp", "filter": {"Images": ["*.png", "*.jpg"]}});
    send_json(
        &mut ws,
        json!({
            "type": "extension",
            "extension_call": "openFile",
            "extension_id": 99,
            "extension_parameters": params.to_string(),
        }),
    )
    .await;

    let reply = next_json(&mut ws).await;
    assert_eq!(reply["extension_call"], "openFileResponse");
    assert_eq!(reply["extension_id"], 99);
    assert_eq!(reply["openFileResponse"], "/tmp/photo.png");
    assert_eq!(
        recorded.lock().unwrap().dialogs[0].filters[0].display(),
        "Images (*.png;*.jpg)"
    );

    ws.close(None).await.unwrap();
    task.await.unwrap().0.unwrap();
}

#[tokio::test]
async fn unknown_messages_and_bad_parameters_are_skipped() {
    let (listener, url) = listen().await;
    let (window, recorded) = MockWindow::new();
    let (task, _handle) = spawn_bridge(url, window);

    let mut ws = accept(&listener).await;
    next_json(&mut ws).await;

    send_json(&mut ws, json!({"type": "theme_changed"})).await;
    send_json(&mut ws, json!({"no_type": true})).await;
    send_json(
        &mut ws,
        json!({"type": "extension", "extension_call": "vibrate", "extension_id": 1}),
    )
    .await;
    send_json(
        &mut ws,
        json!({
            "type": "extension",
            "extension_call": "resize",
            "extension_id": 2,
            "extension_parameters": "{\"width\":\"wide\"}",
        }),
    )
    .await;
    send_json(
        &mut ws,
        json!({
            "type": "extension",
            "extension_call": "openFiles",
            "extension_id": 3,
            "extension_parameters": "{}",
        }),
    )
    .await;

    let reply = next_json(&mut ws).await;
    assert_eq!(reply["extension_id"], 3);
    assert_eq!(reply["openFilesResponse"], json!([]));
    assert!(recorded.lock().unwrap().resized.is_empty());

    ws.close(None).await.unwrap();
    let (result, bridge) = task.await.unwrap();
    assert_eq!(result.unwrap(), CloseReason::PeerClosed);
    assert!(bridge.window().is_destroyed());
}

#[tokio::test]
async fn resize_request_adds_window_border() {
    let (listener, url) = listen().await;
    let (window, recorded) = MockWindow::new();
    let (task, _handle) = spawn_bridge(url, window);

    let mut ws = accept(&listener).await;
    next_json(&mut ws).await;

    send_json(
        &mut ws,
        json!({
            "type": "extension",
            "extension_call": "resize",
            "extension_id": 1,
            "extension_parameters": "{\"width\":640,\"height\":480}",
        }),
    )
    .await;
    ws.close(None).await.unwrap();
    task.await.unwrap().0.unwrap();

    assert_eq!(
        recorded.lock().unwrap().resized,
        vec![crate::window::WindowSize::new(656, 512)]
    );
}

#[tokio::test]
async fn exit_request_then_close_destroys_once() {
    let (listener, url) = listen().await;
    let (window, recorded) = MockWindow::new();
    let (task, _handle) = spawn_bridge(url, window);

    let mut ws = accept(&listener).await;
    next_json(&mut ws).await;

    send_json(&mut ws, json!({"type": "exit_request"})).await;
    ws.close(None).await.unwrap();

    let (result, bridge) = task.await.unwrap();
    assert_eq!(result.unwrap(), CloseReason::PeerClosed);
    assert!(bridge.window().is_destroyed());
    assert_eq!(recorded.lock().unwrap().destroyed, 1);
}

#[tokio::test]
async fn malformed_json_is_fatal() {
    let (listener, url) = listen().await;
    let (window, recorded) = MockWindow::new();
    let (task, _handle) = spawn_bridge(url, window);

    let mut ws = accept(&listener).await;
    next_json(&mut ws).await;
    send_raw(&mut ws, "{not json").await;

    let (result, bridge) = task.await.unwrap();
    assert!(matches!(result, Err(BridgeError::MalformedMessage(_))));
    assert_eq!(bridge.state(), BridgeState::Closed);
    assert_eq!(recorded.lock().unwrap().destroyed, 1);
}

#[tokio::test]
async fn non_object_json_is_fatal() {
    let (listener, url) = listen().await;
    let (window, _recorded) = MockWindow::new();
    let (task, _handle) = spawn_bridge(url, window);

    let mut ws = accept(&listener).await;
    next_json(&mut ws).await;
    send_raw(&mut ws, "[1, 2, 3]").await;

    let (result, _) = task.await.unwrap();
    assert!(matches!(result, Err(BridgeError::MalformedMessage(_))));
}

#[tokio::test]
async fn cancel_closes_the_channel() {
    let (listener, url) = listen().await;
    let (window, recorded) = MockWindow::new();
    let (task, handle) = spawn_bridge(url, window);

    let mut ws = accept(&listener).await;
    next_json(&mut ws).await;

    handle.cancel();
    assert!(handle.is_cancelled());

    let frame = tokio::time::timeout(Duration::from_secs(5), ws.next())
        .await
        .expect("bridge did not close the channel");
    assert!(matches!(frame, Some(Ok(Message::Close(_)))));

    let (result, bridge) = task.await.unwrap();
    assert_eq!(result.unwrap(), CloseReason::Cancelled);
    assert_eq!(bridge.state(), BridgeState::Closed);
    assert_eq!(recorded.lock().unwrap().destroyed, 1);
}

#[tokio::test]
async fn cancel_interrupts_an_open_dialog() {
    let (listener, url) = listen().await;
    let (window, recorded) = MockWindow::new();
    let (task, handle) = spawn_bridge(url, window.stalled());

    let mut ws = accept(&listener).await;
    next_json(&mut ws).await;

    send_json(
        &mut ws,
        json!({
            "type": "extension",
            "extension_call": "openFile",
            "extension_id": 7,
            "extension_parameters": "{}",
        }),
    )
    .await;

    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while recorded.lock().unwrap().dialogs.is_empty() {
        assert!(tokio::time::Instant::now() < deadline, "dialog was never opened");
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    handle.cancel();

    let frame = tokio::time::timeout(Duration::from_secs(5), ws.next())
        .await
        .expect("bridge stayed blocked on the dialog");
    assert!(matches!(frame, Some(Ok(Message::Close(_)))));

    let (result, bridge) = task.await.unwrap();
    assert_eq!(result.unwrap(), CloseReason::Cancelled);
    assert_eq!(bridge.state(), BridgeState::Closed);
    assert_eq!(recorded.lock().unwrap().destroyed, 1);
}

#[tokio::test]
async fn cancel_before_connect_skips_the_channel() {
    let (_listener, url) = listen().await;
    let (window, recorded) = MockWindow::new();
    let (mut bridge, handle) = Bridge::new(url, window, Duration::from_secs(1));

    handle.cancel();
    assert_eq!(bridge.run().await.unwrap(), CloseReason::Cancelled);
    assert_eq!(bridge.state(), BridgeState::Closed);
    assert_eq!(recorded.lock().unwrap().destroyed, 1);
}

#[tokio::test]
async fn connect_failure_is_reported() {
    let (listener, url) = listen().await;
    drop(listener);

    let (window, _recorded) = MockWindow::new();
    let (mut bridge, _handle) = Bridge::new(url, window, Duration::from_secs(1));
    let result = tokio::time::timeout(Duration::from_secs(10), bridge.run())
        .await
        .expect("connect did not fail promptly");
    assert!(matches!(result, Err(BridgeError::Connect(_))));
}
