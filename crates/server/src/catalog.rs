//! Catalog and totals routes.
//!
//! `GET /api/catalog` serves the product list the storefront renders.
//! `POST /api/totals` is the stateless comparison pass: the client posts its
//! cart and fulfillment mode and gets back the priced-out comparison, the
//! cart health score, and a recommendation preview. The freeze lifecycle is
//! owned by the client session; this endpoint recomputes on every call.

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use cartwheel_core::{
    compute_store_totals, health_score, Cart, CartLine, CatalogSource, FulfillmentMode,
    HealthScore, Product, Recommendation, RecommendationEngine, StoreTotal,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub struct CatalogState {
    pub catalog: Arc<dyn CatalogSource>,
}

pub fn router(catalog: Arc<dyn CatalogSource>) -> Router {
    Router::new()
        .route("/api/catalog", get(list_catalog))
        .route("/api/totals", post(compute_totals))
        .with_state(Arc::new(CatalogState { catalog }))
}

async fn list_catalog(State(state): State<Arc<CatalogState>>) -> Json<Vec<Product>> {
    Json(state.catalog.list())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsRequest {
    #[serde(default)]
    pub cart: Vec<CartLine>,
    pub mode: FulfillmentMode,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsResponse {
    pub totals: Vec<StoreTotal>,
    pub health: HealthScore,
    /// Absent for an empty cart.
    pub recommendation: Option<Recommendation>,
}

async fn compute_totals(Json(request): Json<TotalsRequest>) -> Json<TotalsResponse> {
    let totals = compute_store_totals(&request.cart, request.mode);
    let recommendation = RecommendationEngine::default().score_and_recommend(&totals, request.mode);
    let health = health_score(&Cart::from_lines(request.cart));

    debug!(
        event_name = "totals.computed",
        mode = request.mode.label(),
        stores = totals.len(),
        health_score = health.score,
        "priced out the cart"
    );

    Json(TotalsResponse { totals, health, recommendation })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use cartwheel_core::InMemoryCatalog;
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    use super::router;

    fn app() -> axum::Router {
        router(Arc::new(InMemoryCatalog::with_seed_data()))
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn catalog_lists_the_seed_products() {
        let response = app()
            .oneshot(Request::builder().uri("/api/catalog").body(Body::empty()).unwrap())
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        let products = body.as_array().expect("array");
        assert!(!products.is_empty());
        assert!(products.iter().any(|p| p["name"] == "Whole Milk"));
    }

    #[tokio::test]
    async fn totals_returns_comparison_health_and_recommendation() {
        let request_body = json!({
            "mode": "pickup",
            "cart": [{
                "product": {
                    "id": "spinach",
                    "name": "Organic Baby Spinach",
                    "unit": "5 oz",
                    "category": { "name": "Produce" },
                    "image_url": null,
                    "prices": {
                        "walmart": "2.98", "heb": "2.76", "aldi": "2.49",
                        "target": "3.29", "kroger": "2.99", "sams": "2.89"
                    }
                },
                "quantity": 2
            }]
        });

        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/totals")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(request_body.to_string()))
                    .unwrap(),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        let totals = body["totals"].as_array().expect("totals");
        assert_eq!(totals.len(), 6);
        // Ascending by total: the first entry is the cheapest store.
        assert_eq!(totals[0]["store"], "aldi");
        assert_eq!(body["health"]["score"], 100);
        assert!(body["recommendation"]["store"].is_object());
        assert_eq!(body["recommendation"]["confidence"], 97);
    }

    #[tokio::test]
    async fn empty_cart_totals_are_empty_with_no_recommendation() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/totals")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(json!({ "mode": "delivery" }).to_string()))
                    .unwrap(),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["totals"].as_array().map(Vec::len), Some(0));
        assert_eq!(body["health"]["score"], 0);
        assert!(body["recommendation"].is_null());
    }
}
