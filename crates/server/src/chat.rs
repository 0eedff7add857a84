//! Chat relay route.
//!
//! Browsers post the raw cart and message here; the prompt is assembled
//! server-side and the Gemini key never leaves the process. The shopping
//! recommendation is frozen per chat session: the first message computes
//! it and every later prompt in that session names the same store, even
//! though the comparison table itself stays live. Rate-limited calls come
//! back as 429 with a countdown; upstream failures come back as 200
//! carrying the variant's canned fallback, per the product rule that raw
//! service errors never reach user-facing text.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use cartwheel_agent::{
    AssistantReply, ChatAssistant, ChatContext, DietaryContext, LlmClient, PromptVariant,
    ShoppingContext,
};
use cartwheel_core::{
    compute_store_totals, Cart, CartLine, FulfillmentMode, RecommendationEngine,
    RecommendationSession,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Shown on the shopping variant when the cart has nothing to compare.
const EMPTY_CART_MESSAGE: &str =
    "Your cart is empty, so there is no store comparison to talk through yet. Add a few items \
     and ask again!";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub session_id: String,
    pub user_message: String,
    pub variant: PromptVariant,
    #[serde(default)]
    pub mode: Option<FulfillmentMode>,
    #[serde(default)]
    pub cart: Vec<CartLine>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub response: String,
    pub degraded: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitedResponse {
    pub error: &'static str,
    pub retry_after_secs: i64,
}

pub struct ChatState<C> {
    pub assistant: ChatAssistant<C>,
    // One frozen recommendation per chat session, keyed like the limiters.
    sessions: Mutex<HashMap<String, RecommendationSession>>,
}

pub fn router<C: LlmClient + 'static>(assistant: ChatAssistant<C>) -> Router {
    Router::new()
        .route("/api/chat", post(handle_chat::<C>))
        .with_state(Arc::new(ChatState { assistant, sessions: Mutex::new(HashMap::new()) }))
}

async fn handle_chat<C: LlmClient>(
    State(state): State<Arc<ChatState<C>>>,
    Json(request): Json<ChatRequest>,
) -> Response {
    let mode = request.mode.unwrap_or(FulfillmentMode::Pickup);
    let cart = Cart::from_lines(request.cart);

    let context = match request.variant {
        PromptVariant::Dietary => ChatContext::Dietary(DietaryContext::from_cart(&cart)),
        PromptVariant::Shopping => {
            let totals = compute_store_totals(cart.lines(), mode);
            // Empty cart is a valid state, not an error.
            if totals.is_empty() {
                return Json(ChatResponse {
                    response: EMPTY_CART_MESSAGE.to_string(),
                    degraded: false,
                })
                .into_response();
            }

            // First message in a session freezes the recommendation; later
            // messages reuse it so the explanation never shifts mid-chat.
            let recommendation = {
                let mut sessions = state.sessions.lock().expect("session lock poisoned");
                let session = sessions.entry(request.session_id.clone()).or_default();
                session
                    .recommend_once(&cart, mode, &mut RecommendationEngine::default())
                    .cloned()
            };

            match recommendation {
                Some(recommendation) => {
                    ChatContext::Shopping(ShoppingContext { recommendation, totals, mode })
                }
                None => {
                    return Json(ChatResponse {
                        response: EMPTY_CART_MESSAGE.to_string(),
                        degraded: false,
                    })
                    .into_response();
                }
            }
        }
    };

    let reply = state
        .assistant
        .respond(&request.session_id, &context, &request.user_message, Utc::now())
        .await;

    match reply {
        AssistantReply::Answer { text, degraded } => {
            info!(
                event_name = "chat.reply",
                session_id = %request.session_id,
                variant = ?request.variant,
                degraded,
                "chat reply produced"
            );
            Json(ChatResponse { response: text, degraded }).into_response()
        }
        AssistantReply::RateLimited { seconds_until_reset } => {
            info!(
                event_name = "chat.rate_limited",
                session_id = %request.session_id,
                retry_after_secs = seconds_until_reset,
                "chat message rejected by the rate limiter"
            );
            (
                StatusCode::TOO_MANY_REQUESTS,
                Json(RateLimitedResponse {
                    error: "rate_limited",
                    retry_after_secs: seconds_until_reset,
                }),
            )
                .into_response()
        }
    }
}
