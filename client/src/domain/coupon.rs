//! Coupon entities decoded from the service's JSON payloads.
//!
//! Keep types immutable: the client never edits a coupon or merges
//! snapshots — each successful roster fetch replaces the previous one
//! wholesale, so staleness is bounded only by explicit refresh.

use serde::Deserialize;
use thiserror::Error;

/// One coupon as reported by the admin roster endpoint.
///
/// Wire shape is `{ _id, code, isActive, claimedBy[] }`. The claimant list
/// is read-only to the client; only its length is ever displayed.
///
/// # Examples
/// ```
/// use client::domain::Coupon;
///
/// let coupon = Coupon::new("c1", "SUMMER25", true, Vec::new());
/// assert_eq!(coupon.status_label(), "Active");
/// assert_eq!(coupon.claim_count(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Coupon {
    #[serde(rename = "_id")]
    id: String,
    code: String,
    #[serde(rename = "isActive", default = "default_active")]
    is_active: bool,
    #[serde(rename = "claimedBy", default)]
    claimed_by: Vec<String>,
}

// Coupons are created active server-side; tolerate the field's absence.
const fn default_active() -> bool {
    true
}

impl Coupon {
    /// Construct a coupon, primarily for fixtures and tests.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        code: impl Into<String>,
        is_active: bool,
        claimed_by: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            is_active,
            claimed_by,
        }
    }

    /// Opaque server-issued identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Case-sensitive coupon code.
    #[must_use]
    pub fn code(&self) -> &str {
        self.code.as_str()
    }

    /// Whether the coupon is currently claimable.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Number of claimants recorded by the server.
    #[must_use]
    pub fn claim_count(&self) -> usize {
        self.claimed_by.len()
    }

    /// Display label consistent with [`Self::is_active`].
    #[must_use]
    pub const fn status_label(&self) -> &'static str {
        if self.is_active { "Active" } else { "Inactive" }
    }
}

/// Validation errors returned when constructing [`CouponCode`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CouponCodeValidationError {
    /// Code is empty once trimmed of whitespace.
    #[error("coupon code must not be blank")]
    Blank,
}

/// Admin-entered code for a coupon to be created.
///
/// ## Invariants
/// - Non-empty once trimmed. The raw value is otherwise preserved
///   verbatim; any further rules (uniqueness, character set) belong to the
///   server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouponCode(String);

impl CouponCode {
    /// Construct a code after rejecting blank input.
    ///
    /// # Examples
    /// ```
    /// use client::domain::CouponCode;
    ///
    /// let code = CouponCode::new("SUMMER25").expect("valid code");
    /// assert_eq!(code.as_str(), "SUMMER25");
    /// assert!(CouponCode::new("   ").is_err());
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Self, CouponCodeValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(CouponCodeValidationError::Blank);
        }
        Ok(Self(raw))
    }

    /// Borrow the code as entered.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for CouponCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Code issued by the server on a successful claim.
///
/// Transient: held only in the claim workflow's success state.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClaimResult {
    code: String,
}

impl ClaimResult {
    /// Construct a result, primarily for fixtures and tests.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }

    /// The issued coupon code.
    #[must_use]
    pub fn code(&self) -> &str {
        self.code.as_str()
    }
}
