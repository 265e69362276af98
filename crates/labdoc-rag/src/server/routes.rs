//! HTTP handlers for the chat and ingestion endpoints

use axum::{extract::State, Json};

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::{ChatRequest, ChatResponse, Document, IngestResponse};

/// POST /chat - answer a user message with citations
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    tracing::info!("Chat: \"{}\"", request.message);

    let answer = state.chat().answer(&request.message, request.top_k).await?;

    Ok(Json(ChatResponse {
        answer: answer.text,
        sources: answer.sources,
    }))
}

/// POST /documents - ingest one document
pub async fn insert_document(
    State(state): State<AppState>,
    Json(document): Json<Document>,
) -> Result<Json<IngestResponse>> {
    let id = state.ingestor().insert(document).await?;
    Ok(Json(IngestResponse::upserted(id)))
}
