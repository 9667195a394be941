//! WebSocket bridge
//!
//! Connects to the messaging gateway and moves `ChannelMessage`s between the
//! socket and a pair of mpsc queues. Reconnection and authentication are the
//! gateway's concern and are not handled here.

use crate::channel::MpscChannel;
use crate::protocol::ChannelMessage;
use futures_util::{SinkExt, StreamExt};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;

/// Bridge errors
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The WebSocket connection could not be established
    #[error("WebSocket connect failed: {0}")]
    Connect(Box<tokio_tungstenite::tungstenite::Error>),
}

/// Running reader and writer tasks of a bridge
#[derive(Debug)]
pub struct BridgeHandle {
    reader: JoinHandle<()>,
    writer: JoinHandle<()>,
}

impl BridgeHandle {
    /// Stop both tasks
    pub fn abort(&self) {
        self.reader.abort();
        self.writer.abort();
    }

    /// Check if the socket has stopped delivering inbound messages
    pub fn is_finished(&self) -> bool {
        self.reader.is_finished()
    }
}

/// A connected gateway
#[derive(Debug)]
pub struct Bridge {
    /// Outbound channel for the tracker
    pub channel: MpscChannel,
    /// Messages received from the gateway
    pub inbound: mpsc::Receiver<ChannelMessage>,
    /// Reader and writer tasks
    pub handle: BridgeHandle,
}

/// Connect to the gateway at `url`
///
/// `buffer` bounds both the outbound and the inbound queue.
pub async fn connect(url: &str, buffer: usize) -> Result<Bridge, BridgeError> {
    let (socket, _response) = tokio_tungstenite::connect_async(url)
        .await
        .map_err(|e| BridgeError::Connect(Box::new(e)))?;
    tracing::info!(url = %url, "Connected to gateway");

    let (mut ws_sink, mut ws_stream) = socket.split();
    let (channel, mut outbound) = MpscChannel::pair(buffer);
    let (inbound_tx, inbound) = mpsc::channel::<ChannelMessage>(buffer);

    let writer = tokio::spawn(async move {
        while let Some(message) = outbound.recv().await {
            let json = match message.to_json() {
                Ok(json) => json,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to encode channel message");
                    continue;
                }
            };
            if ws_sink.send(Message::Text(json.into())).await.is_err() {
                tracing::warn!("Failed to send message to gateway");
                break;
            }
        }

        // Close the WebSocket when channel is closed
        let _ = ws_sink.close().await;
    });

    let reader = tokio::spawn(async move {
        while let Some(frame) = ws_stream.next().await {
            match frame {
                Ok(Message::Text(text)) => match ChannelMessage::from_json(&text) {
                    Ok(message) => {
                        if inbound_tx.send(message).await.is_err() {
                            tracing::debug!("Inbound receiver dropped");
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::debug!(error = %e, "Ignoring undecodable gateway frame");
                    }
                },
                Ok(Message::Close(_)) => {
                    tracing::info!("Gateway closed connection");
                    break;
                }
                Ok(_) => {
                    tracing::trace!("Ignoring non-text frame");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "WebSocket error");
                    break;
                }
            }
        }
    });

    Ok(Bridge {
        channel,
        inbound,
        handle: BridgeHandle { reader, writer },
    })
}
