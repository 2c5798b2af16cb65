//! Error types for campaign operations.

use rifaqui_backend::BackendError;
use thiserror::Error;

/// Result type alias for campaign operations.
pub type Result<T> = std::result::Result<T, CampaignError>;

/// Error taxonomy for the campaign flows.
///
/// Validation errors are soft, client-side checks (the backend
/// re-validates everything); remote errors wrap failures of the backend
/// collaborator.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CampaignError {
    // ═══════════════════════════════════════════════════════════
    // Validation Errors
    // ═══════════════════════════════════════════════════════════
    /// Customer name was blank.
    #[error("Customer name must not be blank")]
    MissingCustomerName,

    /// Customer phone did not normalize to an acceptable number.
    #[error("Invalid customer phone: {phone}")]
    InvalidCustomerPhone {
        /// The rejected input, as typed.
        phone: String,
    },

    /// Customer email is present but not plausibly an address.
    #[error("Invalid customer email: {email}")]
    InvalidCustomerEmail {
        /// The rejected input, as typed.
        email: String,
    },

    /// Two promotions share the same ticket quantity.
    #[error("Duplicate promotion quantity: {quantity}")]
    DuplicatePromotionQuantity {
        /// The quantity that appears more than once.
        quantity: u32,
    },

    /// No valid quota numbers remained after coercion.
    #[error("No valid quota numbers in selection")]
    EmptySelection,

    // ═══════════════════════════════════════════════════════════
    // Remote Errors
    // ═══════════════════════════════════════════════════════════
    /// The campaign row does not exist.
    #[error("Campaign not found: {0}")]
    CampaignNotFound(String),

    /// The backend rejected the API key.
    #[error("Unauthorized")]
    Unauthorized,

    /// The backend throttled the client.
    #[error("Rate limited")]
    RateLimited,

    /// Any other backend failure.
    #[error("Backend call failed: {message}")]
    Remote {
        /// Human-readable failure description.
        message: String,
        /// Whether retrying later could succeed.
        transient: bool,
    },

    // ═══════════════════════════════════════════════════════════
    // System Errors
    // ═══════════════════════════════════════════════════════════
    /// Internal invariant broke (should not surface to users).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CampaignError {
    /// Returns `true` if this error came from soft client-side
    /// validation rather than the backend.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rifaqui_campaigns::CampaignError;
    /// assert!(CampaignError::MissingCustomerName.is_validation());
    /// assert!(!CampaignError::RateLimited.is_validation());
    /// ```
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingCustomerName
                | Self::InvalidCustomerPhone { .. }
                | Self::InvalidCustomerEmail { .. }
                | Self::DuplicatePromotionQuantity { .. }
                | Self::EmptySelection
        )
    }

    /// Returns `true` if retrying the operation later could succeed.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rifaqui_campaigns::CampaignError;
    /// assert!(CampaignError::RateLimited.is_transient());
    /// assert!(!CampaignError::Unauthorized.is_transient());
    /// ```
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::RateLimited | Self::Remote { transient: true, .. })
    }
}

impl From<BackendError> for CampaignError {
    fn from(err: BackendError) -> Self {
        let transient = err.is_transient();
        match err {
            BackendError::NotFound(what) => Self::CampaignNotFound(what),
            BackendError::Unauthorized => Self::Unauthorized,
            BackendError::RateLimited => Self::RateLimited,
            other => Self::Remote {
                message: other.to_string(),
                transient,
            },
        }
    }
}
