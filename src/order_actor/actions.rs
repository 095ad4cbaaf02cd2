use chrono::{DateTime, Utc};

/// Seller actions on an order.
///
/// Each action is a single check-and-set on one order; the result is the
/// updated order.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderAction {
    /// `pending -> accepted`. Cash payments count as verified from here on.
    Accept,
    /// `pending -> cancelled` (the seller's "Reject").
    Cancel,
    /// `accepted -> out_for_delivery`.
    Dispatch,
    /// `out_for_delivery -> delivered`, stamping the delivery time.
    ///
    /// # Errors
    /// Fails with a payment gate error while a non-cash payment is unverified.
    Deliver { at: DateTime<Utc> },
    /// Marks a pending or failed non-cash payment as verified.
    VerifyPayment,
    /// Marks a pending non-cash payment as failed. Only allowed while the
    /// order itself is still pending.
    RejectPayment,
}

impl OrderAction {
    pub fn name(&self) -> &'static str {
        match self {
            OrderAction::Accept => "accept",
            OrderAction::Cancel => "cancel",
            OrderAction::Dispatch => "dispatch",
            OrderAction::Deliver { .. } => "deliver",
            OrderAction::VerifyPayment => "verify payment for",
            OrderAction::RejectPayment => "reject payment for",
        }
    }
}
