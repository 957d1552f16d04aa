use axum::Json;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use billfinder_core::keys::Collection;
use billfinder_core::models::bill::{BillCard, StoredBill};
use billfinder_core::models::chat_history::{ChatHistory, ChatHistoryMessage};
use billfinder_core::models::demographics::Demographics;
use billfinder_llm::assistant::{AssistantTurn, reply};
use billfinder_llm::context::ContextBill;
use billfinder_storage::store::{DocumentStore, load, save_merged};

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::routes::demographics::{MessageResponse, require_user_id};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ChatContext {
    #[serde(default)]
    pub demographics: Value,
    #[serde(rename = "contextCards", default)]
    pub context_cards: Vec<BillCard>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub context: ChatContext,
    #[serde(rename = "chatHistory", default)]
    pub chat_history: Vec<ChatHistoryMessage>,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub success: bool,
    pub response: String,
}

#[derive(Debug, Deserialize)]
pub struct SaveHistoryRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub messages: Vec<ChatHistoryMessage>,
}

#[derive(Debug, Deserialize)]
pub struct LoadHistoryQuery {
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Serialize)]
pub struct HistoryResponse {
    pub success: bool,
    pub messages: Vec<ChatHistoryMessage>,
}

/// Text link recorded for a stored bill. Links on the incoming card are
/// never fetched.
async fn stored_text_link(state: &AppState, bill_id: &str) -> Option<String> {
    if bill_id.trim().is_empty() {
        return None;
    }
    match state.store.get(Collection::Bills, bill_id).await {
        Ok(Some(doc)) => StoredBill::new(doc.id, doc.data).xml_link().map(str::to_string),
        Ok(None) => None,
        Err(e) => {
            warn!(bill = %bill_id, error = %e, "bill lookup failed, using description");
            None
        }
    }
}

/// Full text for cards naming a stored bill with a text link, falling back
/// to the card's description.
async fn context_bills(state: &AppState, cards: &[BillCard]) -> Vec<ContextBill> {
    let mut bills = Vec::with_capacity(cards.len());
    for card in cards {
        let fetched = match stored_text_link(state, &card.id).await {
            Some(link) => match state.bills.fetch_document_text(&link).await {
                Ok(text) if !text.is_empty() => Some(text),
                Ok(_) => None,
                Err(e) => {
                    warn!(bill = %card.id, error = %e, "bill text fetch failed, using description");
                    None
                }
            },
            None => None,
        };

        bills.push(match fetched {
            Some(text) => ContextBill::full_text(&card.title, &text),
            None => ContextBill::description(&card.title, &card.description),
        });
    }
    bills
}

pub async fn send_message(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let message = req.message.trim();
    if message.is_empty() {
        return Err(ApiError::BadRequest("Message required".to_string()));
    }

    let demographics = Demographics::from_value(&req.context.demographics);
    let context = context_bills(&state, &req.context.context_cards).await;

    let turn = AssistantTurn {
        message,
        transcript: &req.chat_history,
        demographics: demographics.as_ref(),
        context: &context,
    };
    let response = reply(state.model.as_ref(), turn).await?;

    Ok(Json(ChatResponse {
        success: true,
        response,
    }))
}

pub async fn save_history(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SaveHistoryRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let user_id = require_user_id(req.user_id.as_deref())?;

    let history = ChatHistory {
        messages: req.messages,
        updated_at: jiff::Timestamp::now(),
    };
    save_merged(state.store.as_ref(), Collection::ChatHistories, user_id, &history).await?;

    Ok(Json(MessageResponse {
        success: true,
        message: "Chat history saved successfully".to_string(),
    }))
}

pub async fn load_history(
    State(state): State<AppState>,
    Query(query): Query<LoadHistoryQuery>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let user_id = require_user_id(query.user_id.as_deref())?;

    let history: Option<ChatHistory> =
        load(state.store.as_ref(), Collection::ChatHistories, user_id).await?;

    Ok(Json(HistoryResponse {
        success: true,
        messages: history.map(|h| h.messages).unwrap_or_default(),
    }))
}
