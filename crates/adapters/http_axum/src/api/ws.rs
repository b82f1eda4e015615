//! Live-update WebSocket feeds.
//!
//! Each connection follows the same lifecycle: upgrade, register with the
//! feed's registry, send one full snapshot, then forward broadcast frames
//! while watching the inbound half for closure. Inbound messages are never
//! interpreted; they only prove the connection is alive.

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use hearth_app::broadcast::{SubscriberId, SubscriberRegistry, change_log_frame, devices_frame};
use hearth_app::ports::{ChangeLogRepository, ChangePublisher, DeviceRepository};
use hearth_domain::event::ChangeAction;

use crate::state::AppState;

/// `GET /devices/ws` — upgrade to the device feed.
pub async fn devices<DR, LR, P>(
    State(state): State<AppState<DR, LR, P>>,
    ws: WebSocketUpgrade,
) -> Response
where
    DR: DeviceRepository + Send + Sync + 'static,
    LR: ChangeLogRepository + Send + Sync + 'static,
    P: ChangePublisher + Send + Sync + 'static,
{
    ws.on_upgrade(move |socket| device_feed(socket, state))
}

/// `GET /change-log/ws` — upgrade to the audit feed.
pub async fn change_log<DR, LR, P>(
    State(state): State<AppState<DR, LR, P>>,
    ws: WebSocketUpgrade,
) -> Response
where
    DR: DeviceRepository + Send + Sync + 'static,
    LR: ChangeLogRepository + Send + Sync + 'static,
    P: ChangePublisher + Send + Sync + 'static,
{
    ws.on_upgrade(move |socket| change_log_feed(socket, state))
}

async fn device_feed<DR, LR, P>(socket: WebSocket, state: AppState<DR, LR, P>)
where
    DR: DeviceRepository + Send + Sync + 'static,
    LR: ChangeLogRepository + Send + Sync + 'static,
    P: ChangePublisher + Send + Sync + 'static,
{
    let (id, frames) = state.device_feed.register();
    tracing::debug!(subscriber = %id, "device feed client connected");

    // Registering before the snapshot read means a mutation that lands in
    // between is queued behind the snapshot instead of being missed.
    let initial = state
        .device_service
        .list_devices()
        .await
        .map_err(|err| tracing::error!(%err, "failed to load device snapshot"))
        .and_then(|devices| {
            devices_frame(ChangeAction::Init, &devices)
                .map_err(|err| tracing::error!(%err, "failed to serialize device snapshot"))
        });

    match initial {
        Ok(frame) => run_connection(socket, &state.device_feed, id, frame, frames).await,
        Err(()) => state.device_feed.deregister(id),
    }
}

async fn change_log_feed<DR, LR, P>(socket: WebSocket, state: AppState<DR, LR, P>)
where
    DR: DeviceRepository + Send + Sync + 'static,
    LR: ChangeLogRepository + Send + Sync + 'static,
    P: ChangePublisher + Send + Sync + 'static,
{
    let (id, frames) = state.change_log_feed.register();
    tracing::debug!(subscriber = %id, "change-log feed client connected");

    let initial = state
        .change_log_service
        .list_entries()
        .await
        .map_err(|err| tracing::error!(%err, "failed to load change-log snapshot"))
        .and_then(|entries| {
            change_log_frame(&entries)
                .map_err(|err| tracing::error!(%err, "failed to serialize change-log snapshot"))
        });

    match initial {
        Ok(frame) => run_connection(socket, &state.change_log_feed, id, frame, frames).await,
        Err(()) => state.change_log_feed.deregister(id),
    }
}

/// Drive one registered connection until it closes.
///
/// The socket splits into a writer task forwarding broadcast frames and a
/// read loop that exists purely to detect closure. Either side ending —
/// client close, network error, or the dispatcher dropping the subscriber's
/// sender after a failed send — tears the connection down and deregisters
/// exactly once (deregistration is idempotent, so racing the dispatcher is
/// harmless).
async fn run_connection(
    socket: WebSocket,
    feed: &SubscriberRegistry,
    id: SubscriberId,
    initial: String,
    mut frames: mpsc::Receiver<String>,
) {
    let (mut sink, mut stream) = socket.split();

    if sink.send(Message::Text(initial.into())).await.is_err() {
        feed.deregister(id);
        return;
    }

    let mut writer = tokio::spawn(async move {
        while let Some(frame) = frames.recv().await {
            if sink.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
        // The registry dropped our sender (or the socket died): say goodbye.
        let _ = sink.close().await;
    });

    loop {
        tokio::select! {
            inbound = stream.next() => match inbound {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
            _ = &mut writer => break,
        }
    }

    feed.deregister(id);
    writer.abort();
    tracing::debug!(subscriber = %id, "feed client disconnected");
}
