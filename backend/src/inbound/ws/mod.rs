//! WebSocket inbound adapter: the campus-wide broadcast channel.
//!
//! Responsibilities:
//! - upgrade `/ws` requests into per-connection sessions
//! - register each connection with the shared [`hub::ChatHub`]
//! - keep WebSocket-specific concerns at the edge of the system
//!
//! The channel is unauthenticated and unmoderated; any connected client may
//! send and will receive every message, its own included.

use std::sync::Arc;

use actix_web::web::{self, Payload};
use actix_web::{get, HttpRequest, HttpResponse};
use tracing::error;

pub mod hub;
mod session;

pub use hub::{ChatHub, ChatSink, SinkClosed};

/// Handle WebSocket upgrade for the `/ws` endpoint.
#[get("/ws")]
pub async fn ws_entry(
    hub: web::Data<Arc<ChatHub>>,
    req: HttpRequest,
    stream: Payload,
) -> actix_web::Result<HttpResponse> {
    let (response, ws_session, message_stream) =
        actix_ws::handle(&req, stream).map_err(|err| {
            error!(error = %err, "WebSocket upgrade failed");
            err
        })?;

    let hub = hub.get_ref().clone();
    actix_web::rt::spawn(session::handle_ws_session(hub, ws_session, message_stream));

    Ok(response)
}
