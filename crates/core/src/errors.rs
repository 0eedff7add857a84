use thiserror::Error;

/// Failures raised while parsing or validating domain inputs. Interface
/// layers surface these as bad requests; the computation paths themselves
/// never error (missing prices read as zero, empty carts are valid).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown store `{0}`")]
    UnknownStore(String),
    #[error("unknown fulfillment mode `{0}`")]
    UnknownFulfillmentMode(String),
}
