//! Chat context builder.
//!
//! Two prompt variants share one entry point but carry structurally
//! separate payloads: the shopping variant embeds the full store comparison
//! and recommendation, the dietary variant sees only cart contents. Neither
//! variant can reach the other's data, which is what keeps the
//! "nutrition answers never cite stores or prices" guarantee honest.

use cartwheel_core::domain::store::FulfillmentMode;
use cartwheel_core::pricing::StoreTotal;
use cartwheel_core::quality::quality_profile;
use cartwheel_core::recommend::Recommendation;
use cartwheel_core::{health_score, Cart};
use serde::{Deserialize, Serialize};

/// User text beyond this many characters is truncated before it enters the
/// prompt, keeping the assembled blob bounded.
pub const MAX_USER_MESSAGE_CHARS: usize = 500;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptVariant {
    Shopping,
    Dietary,
}

#[derive(Clone, Debug)]
pub struct ShoppingContext {
    pub recommendation: Recommendation,
    pub totals: Vec<StoreTotal>,
    pub mode: FulfillmentMode,
}

/// One cart line as the nutrition assistant sees it: no prices, no stores.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItemSummary {
    pub name: String,
    pub category: Option<String>,
    pub quantity: u32,
}

#[derive(Clone, Debug, Default)]
pub struct DietaryContext {
    pub items: Vec<CartItemSummary>,
    pub produce_quantity: u32,
    pub total_quantity: u32,
}

impl DietaryContext {
    pub fn from_cart(cart: &Cart) -> Self {
        let health = health_score(cart);
        Self {
            items: cart
                .lines()
                .iter()
                .map(|line| CartItemSummary {
                    name: line.product.name.clone(),
                    category: line.product.category.as_ref().map(|c| c.name.clone()),
                    quantity: line.quantity,
                })
                .collect(),
            produce_quantity: health.produce_quantity,
            total_quantity: health.total_quantity,
        }
    }
}

#[derive(Clone, Debug)]
pub enum ChatContext {
    Shopping(ShoppingContext),
    Dietary(DietaryContext),
}

impl ChatContext {
    pub fn variant(&self) -> PromptVariant {
        match self {
            Self::Shopping(_) => PromptVariant::Shopping,
            Self::Dietary(_) => PromptVariant::Dietary,
        }
    }

    /// Assembles the full prompt for the text-generation service.
    pub fn build_prompt(&self, user_message: &str) -> String {
        let user_message = truncate_chars(user_message.trim(), MAX_USER_MESSAGE_CHARS);
        match self {
            Self::Shopping(context) => shopping_prompt(context, &user_message),
            Self::Dietary(context) => dietary_prompt(context, &user_message),
        }
    }

    /// Static text shown when the downstream service fails. Raw upstream
    /// errors never replace it.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::Shopping(_) => {
                "I'm having trouble answering right now. The store comparison above is still \
                 accurate, so feel free to use it while I recover—then ask me again in a moment."
            }
            Self::Dietary(_) => {
                "I'm here to help with health recommendations! You can ask me about dietary \
                 alternatives, allergy-friendly products, or nutrition tips based on your cart \
                 items."
            }
        }
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

fn shopping_prompt(context: &ShoppingContext, user_message: &str) -> String {
    let recommended = &context.recommendation.store;
    let comparison = context
        .totals
        .iter()
        .map(|total| {
            let marker = if total.store == recommended.store { " (RECOMMENDED)" } else { "" };
            let quality = quality_profile(total.store);
            format!(
                "- **{name}**: ${total}{marker}\n  \
                 - **Reviews**: {review}★ - _{review_why}_\n  \
                 - **Freshness**: {freshness}★ - _{freshness_why}_\n  \
                 - **Availability**: {availability}★ - _{availability_why}_\n  \
                 - **Service**: {service}★ - _{service_why}_",
                name = total.display_name,
                total = total.total,
                review = quality.review_score,
                review_why = quality.review_rationale,
                freshness = quality.freshness,
                freshness_why = quality.freshness_rationale,
                availability = quality.availability,
                availability_why = quality.availability_rationale,
                service = quality.service,
                service_why = quality.service_rationale,
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a friendly AI shopping assistant helping users understand grocery store \
         recommendations. You have access to detailed review data. Use it to provide insightful \
         answers.\n\n\
         CONTEXT:\n\
         - Shopping Type: {mode}\n\
         - Recommended Store: {store}\n\
         - Why it was recommended: {reason}\n\n\
         FULL STORE COMPARISON (PRICE & REVIEWS):\n\
         {comparison}\n\n\
         INSTRUCTIONS for responses:\n\
         1. Always be helpful and answer the user's question directly first.\n\
         2. For math questions, solve them accurately.\n\
         3. For general questions, provide brief helpful answers.\n\
         4. For shopping questions, use the specific data and reasoning provided in the 'FULL \
         STORE COMPARISON' section. Be specific.\n\
         5. ALWAYS tie your response back to the shopping recommendation context.\n\
         6. Keep responses conversational and under 150 words.\n\
         7. When users ask about a specific store, compare that store to the recommended one \
         using the actual price and the detailed quality data.\n\
         8. Be enthusiastic about helping with their shopping decision.\n\n\
         Remember: Your main job is helping them understand why {store} was recommended. Use the \
         detailed review data to give them confidence in the choice or to help them explore \
         tradeoffs with other stores.\n\n\
         User Question: {user_message}",
        mode = context.mode.label(),
        store = recommended.display_name,
        reason = context.recommendation.reason,
        comparison = comparison,
        user_message = user_message,
    )
}

fn dietary_prompt(context: &DietaryContext, user_message: &str) -> String {
    let cart_lines = if context.items.is_empty() {
        "- (cart is empty)".to_string()
    } else {
        context
            .items
            .iter()
            .map(|item| match &item.category {
                Some(category) => format!("- {} ({category}) x{}", item.name, item.quantity),
                None => format!("- {} x{}", item.name, item.quantity),
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "Act as a helpful nutrition and health assistant. The user may have allergies, dietary \
         restrictions, or health goals. Based on the current cart items, suggest healthier \
         alternatives or tips related to nutrition, fruits, vegetables, or diet. Ignore pricing \
         and shopping logistics entirely; never mention retailers or where to buy anything. Just \
         answer the user's dietary/health question in a concise, friendly way.\n\n\
         CART CONTENTS:\n\
         {cart_lines}\n\n\
         Produce items: {produce} of {total}.\n\n\
         User: {user_message}",
        cart_lines = cart_lines,
        produce = context.produce_quantity,
        total = context.total_quantity,
        user_message = user_message,
    )
}
