//! Request/response plumbing shared by the browser client and its page sessions.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, trace, warn};

use super::error::CdpError;
use super::protocol::{CdpRequest, CdpResponse};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
pub(crate) type WsSink = SplitSink<WsStream, Message>;
pub(crate) type WsSource = SplitStream<WsStream>;

/// Upper bound on a single CDP round trip.
const COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

type Reply = oneshot::Sender<Result<Value, CdpError>>;

#[derive(Default)]
struct PendingState {
    closed: bool,
    waiting: HashMap<u64, Reply>,
}

/// Requests awaiting a response, keyed by request id.
///
/// Once closed, every waiter is failed with [`CdpError::SessionClosed`] and no new request
/// can register.
#[derive(Default)]
pub(crate) struct PendingRequests {
    state: Mutex<PendingState>,
}

impl PendingRequests {
    pub(crate) fn register(
        &self,
        id: u64,
    ) -> Result<oneshot::Receiver<Result<Value, CdpError>>, CdpError> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(CdpError::SessionClosed);
        }
        let (tx, rx) = oneshot::channel();
        state.waiting.insert(id, tx);
        Ok(rx)
    }

    pub(crate) fn cancel(&self, id: u64) {
        self.state.lock().waiting.remove(&id);
    }

    /// Route a response to its waiter. Events and unknown ids are ignored.
    pub(crate) fn resolve(&self, resp: CdpResponse) {
        let Some(id) = resp.id else {
            return;
        };
        let Some(tx) = self.state.lock().waiting.remove(&id) else {
            trace!("Dropping response for unknown request {}", id);
            return;
        };
        let result = match resp.error {
            Some(error) => Err(CdpError::Protocol {
                code: error.code,
                message: error.message,
            }),
            None => Ok(resp.result.unwrap_or(Value::Null)),
        };
        let _ = tx.send(result);
    }

    pub(crate) fn close(&self) {
        let waiting = {
            let mut state = self.state.lock();
            state.closed = true;
            std::mem::take(&mut state.waiting)
        };
        for (_, tx) in waiting {
            let _ = tx.send(Err(CdpError::SessionClosed));
        }
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.state.lock().waiting.len()
    }
}

/// One WebSocket connection to the browser.
pub(crate) struct Transport {
    sink: tokio::sync::Mutex<WsSink>,
    pending: PendingRequests,
    request_id: AtomicU64,
}

impl Transport {
    pub(crate) fn new(sink: WsSink) -> Self {
        Self {
            sink: tokio::sync::Mutex::new(sink),
            pending: PendingRequests::default(),
            request_id: AtomicU64::new(1),
        }
    }

    pub(crate) fn pending(&self) -> &PendingRequests {
        &self.pending
    }

    /// Send a command and wait for its response.
    pub(crate) async fn call(
        &self,
        method: &str,
        params: Option<Value>,
        session_id: Option<&str>,
    ) -> Result<Value, CdpError> {
        let id = self.request_id.fetch_add(1, Ordering::SeqCst);

        let request = CdpRequest {
            id,
            method: method.to_string(),
            params,
            session_id: session_id.map(|s| s.to_string()),
        };

        let json = serde_json::to_string(&request)?;
        trace!("CDP send: {}", json);

        let rx = self.pending.register(id)?;

        let sent = {
            let mut ws = self.sink.lock().await;
            ws.send(Message::Text(json.into())).await
        };
        if let Err(e) = sent {
            self.pending.cancel(id);
            return Err(e.into());
        }

        match tokio::time::timeout(COMMAND_TIMEOUT, rx).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(CdpError::SessionClosed),
            Err(_) => {
                self.pending.cancel(id);
                Err(CdpError::Timeout(format!("Request {} timed out", method)))
            }
        }
    }

    /// Drain the socket until it closes, then fail whatever is still waiting.
    pub(crate) async fn receive_loop(&self, mut source: WsSource) {
        while let Some(msg) = source.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    trace!("CDP recv: {}", text);
                    match serde_json::from_str::<CdpResponse>(&text) {
                        Ok(resp) => self.pending.resolve(resp),
                        Err(e) => warn!("Failed to parse CDP message: {}", e),
                    }
                }
                Ok(Message::Close(_)) => {
                    debug!("WebSocket closed");
                    break;
                }
                Err(e) => {
                    debug!("WebSocket error: {}", e);
                    break;
                }
                _ => {}
            }
        }
        self.pending.close();
    }
}
