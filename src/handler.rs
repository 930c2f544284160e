//! Webhook endpoint for Discord interactions.

use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use log::{debug, error, info};

use crate::error::{BotError, Result};
use crate::formatter::format_message;
use crate::lookup::DocLookup;
use crate::types::{Interaction, InteractionResponse, InteractionType};

/// Build the router serving interactions on `/`.
pub fn router<L: DocLookup>(lookup: L) -> Router {
    Router::new()
        .route("/", post(handle_interaction::<L>))
        .with_state(Arc::new(lookup))
}

async fn handle_interaction<L: DocLookup>(State(lookup): State<Arc<L>>, body: Bytes) -> Response {
    match dispatch(lookup.as_ref(), &body).await {
        Ok(Some(response)) => encode(&response),
        Ok(None) => StatusCode::OK.into_response(),
        Err(e) => {
            error!("Failed to handle interaction: {}", e);
            e.into_response()
        }
    }
}

/// Decode an interaction and produce the response to send back, if any.
pub async fn dispatch<L: DocLookup>(
    lookup: &L,
    body: &[u8],
) -> Result<Option<InteractionResponse>> {
    let interaction: Interaction = serde_json::from_slice(body).map_err(BotError::Decode)?;

    match interaction.kind {
        InteractionType::Ping => {
            debug!("Answering ping");
            Ok(Some(InteractionResponse::pong()))
        }
        InteractionType::ApplicationCommand => {
            let symbol = interaction.symbol()?;
            info!("Looking up documentation for '{}'", symbol);

            let output = lookup.lookup(symbol).await?;
            let content = format_message(symbol, &output);
            Ok(Some(InteractionResponse::message(content)))
        }
        InteractionType::Other(kind) => {
            debug!("Ignoring interaction of type {}", kind);
            Ok(None)
        }
    }
}

fn encode(response: &InteractionResponse) -> Response {
    match serde_json::to_vec(response) {
        Ok(body) => {
            debug!("Sending {} response", response.kind);
            ([(header::CONTENT_TYPE, "application/json")], body).into_response()
        }
        Err(e) => {
            let err = BotError::Encode(e);
            error!("Failed to write response: {}", err);
            err.into_response()
        }
    }
}
