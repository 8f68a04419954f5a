//! One socket's lifetime
//!
//! Register, then race the writer, the reader, the idle timer and a close
//! request from a failed broadcast. Traffic in either direction counts as
//! activity for the idle timer. Whichever finishes first ends the
//! session, and the connection is released exactly once.

use std::fmt::Display;
use std::hash::Hash;

use axum::extract::ws::{Message as WsMessage, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::connection::{ChannelRegistry, Connection};
use crate::hub::ConnectionSettings;
use crate::protocol::Frame;

use super::inbox::Inbox;

/// Drive a socket registered under `key` until it closes
pub async fn serve<K, I>(
    registry: &ChannelRegistry<K>,
    key: K,
    socket: WebSocket,
    settings: ConnectionSettings,
    inbox: I,
) where
    K: Eq + Hash + Copy + Display,
    I: Inbox,
{
    let (tx, mut rx) = mpsc::channel::<Frame>(settings.send_buffer);
    let connection = Connection::new(tx);
    let connection_id = connection.id();
    let (mut sink, mut stream) = socket.split();

    registry.register(key, connection.clone());
    info!(addressee = %key, connection_id, "Realtime connection opened");

    let writer = async {
        while let Some(frame) = rx.recv().await {
            if let Err(e) = sink.send(WsMessage::Text(frame.to_string())).await {
                debug!(connection_id, error = %e, "Socket write failed");
                break;
            }
            // Listeners on receive-only channels stay alive while pushes flow
            connection.touch();
        }
    };

    let reader = async {
        while let Some(message) = stream.next().await {
            match message {
                Ok(WsMessage::Text(text)) => {
                    connection.touch();
                    if let Some(error) = inbox.on_text(&text).await {
                        if connection.try_send(error.to_frame()).is_err() {
                            break;
                        }
                    }
                }
                Ok(WsMessage::Close(_)) => break,
                Ok(_) => connection.touch(),
                Err(e) => {
                    debug!(connection_id, error = %e, "Socket read failed");
                    break;
                }
            }
        }
    };

    let idle = async {
        loop {
            let idle_for = connection.idle_for();
            if idle_for >= settings.idle_timeout {
                break;
            }
            tokio::time::sleep(settings.idle_timeout - idle_for).await;
        }
    };

    tokio::select! {
        () = writer => debug!(connection_id, "Writer finished"),
        () = reader => debug!(connection_id, "Peer disconnected"),
        () = idle => info!(connection_id, "Closing idle connection"),
        () = connection.closed() => debug!(connection_id, "Connection closed by broadcast"),
    }

    registry.release(key, &connection);
    let _ = sink.close().await;
    info!(addressee = %key, connection_id, "Realtime connection closed");
}
