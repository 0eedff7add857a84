//! Static per-retailer quality ledger.
//!
//! Scores are on a 0-5 scale with a short rationale per axis. This is
//! reference data, independent of any cart; the recommendation scorer and
//! the shopping chat context both read from it.

use serde::Serialize;

use crate::domain::store::StoreId;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QualityProfile {
    pub review_score: f64,
    pub review_rationale: &'static str,
    pub freshness: f64,
    pub freshness_rationale: &'static str,
    pub availability: f64,
    pub availability_rationale: &'static str,
    pub service: f64,
    pub service_rationale: &'static str,
}

impl QualityProfile {
    /// Mean of the freshness/availability/service axes, still on 0-5.
    pub fn composite(&self) -> f64 {
        (self.freshness + self.availability + self.service) / 3.0
    }
}

pub fn quality_profile(store: StoreId) -> &'static QualityProfile {
    match store {
        StoreId::Heb => &HEB,
        StoreId::Kroger => &KROGER,
        StoreId::Target => &TARGET,
        StoreId::Sams => &SAMS,
        StoreId::Walmart => &WALMART,
        StoreId::Aldi => &ALDI,
    }
}

static HEB: QualityProfile = QualityProfile {
    review_score: 4.5,
    review_rationale: "Excellent private label products and high-quality meat department.",
    freshness: 4.8,
    freshness_rationale: "Signature strength; consistently high-quality produce and meat.",
    availability: 4.2,
    availability_rationale: "Accurate in-app stock reporting, but some out-of-stocks for online orders.",
    service: 4.3,
    service_rationale: "Friendly in-store service, but digital/delivery support can be frustrating.",
};

static KROGER: QualityProfile = QualityProfile {
    review_score: 4.1,
    review_rationale: "Satisfaction guarantee on its extensive private label brands.",
    freshness: 4.0,
    freshness_rationale: "Strong commitment to quality with its 'Freshness Guarantee'.",
    availability: 4.0,
    availability_rationale: "Consistent and reliable stock levels for a full-service grocer.",
    service: 4.2,
    service_rationale: "Robust customer service with 'super friendly' and helpful staff.",
};

static TARGET: QualityProfile = QualityProfile {
    review_score: 4.4,
    review_rationale: "Products perceived as very high quality.",
    freshness: 4.1,
    freshness_rationale: "Strong brand perception for freshness, despite isolated incidents.",
    availability: 4.5,
    availability_rationale: "Excels with powerful, user-friendly tools to check real-time stock.",
    service: 2.8,
    service_rationale: "Significant service gap; frustrating online order fulfillment and unhelpful representatives.",
};

static SAMS: QualityProfile = QualityProfile {
    review_score: 3.2,
    review_rationale: "Good value on Member's Mark brand, but inconsistent quality.",
    freshness: 2.5,
    freshness_rationale: "Frequent complaints about spoiled or moldy produce.",
    availability: 3.0,
    availability_rationale: "Limited selection due to bulk-item warehouse model.",
    service: 1.8,
    service_rationale: "Major customer frustration; lack of staff, over-reliance on self-checkout.",
};

static WALMART: QualityProfile = QualityProfile {
    review_score: 2.1,
    review_rationale: "Low quality score, particularly for groceries.",
    freshness: 1.9,
    freshness_rationale: "Significant weakness; consistent issues with moldy or damaged produce.",
    availability: 4.6,
    availability_rationale: "Key strength; vast product selection and high availability.",
    service: 2.2,
    service_rationale: "Poor online order picking and unhelpful support.",
};

static ALDI: QualityProfile = QualityProfile {
    review_score: 3.3,
    review_rationale: "Value-driven, but some notable complaints about items like packaged chicken.",
    freshness: 3.1,
    freshness_rationale: "Inconsistent; some customers find it excellent, others are disappointed.",
    availability: 2.4,
    availability_rationale: "Frequent out-of-stock items are a widely reported issue.",
    service: 2.9,
    service_rationale: "High-efficiency model leads to long checkout lines and lack of floor staff.",
};
