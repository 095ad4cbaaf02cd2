use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::schedule::TimeSlot;

/// Upper bound on water cans in a single order.
pub const MAX_QUANTITY_PER_ORDER: u32 = 10;

/// Largest unit price whose amount for a full order still fits in a `u64`.
pub const MAX_UNIT_PRICE: u64 = u64::MAX / MAX_QUANTITY_PER_ORDER as u64;

pub fn quantity_in_range(quantity: u32) -> bool {
    (1..=MAX_QUANTITY_PER_ORDER).contains(&quantity)
}

/// Lifecycle state of a delivery order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Accepted,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Accepted or on the way: what the seller dashboard shows as "active".
    pub fn is_active(self) -> bool {
        matches!(self, OrderStatus::Accepted | OrderStatus::OutForDelivery)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Accepted => "accepted",
            OrderStatus::OutForDelivery => "out_for_delivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Upi,
    Card,
    Wallet,
}

impl PaymentMethod {
    /// Everything except cash needs an explicit seller verification.
    pub fn requires_verification(self) -> bool {
        !matches!(self, PaymentMethod::Cash)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Upi => "upi",
            PaymentMethod::Card => "card",
            PaymentMethod::Wallet => "wallet",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Verified,
    Failed,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Verified => "verified",
            PaymentStatus::Failed => "failed",
        })
    }
}

/// Where the cans go: a block and a room/apartment inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryLocation {
    pub block: String,
    pub room: String,
}

impl DeliveryLocation {
    pub fn new(block: impl Into<String>, room: impl Into<String>) -> Self {
        Self {
            block: block.into(),
            room: room.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.block.trim().is_empty() && !self.room.trim().is_empty()
    }
}

/// The ordering party as recorded on the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRef {
    pub customer_id: String,
    pub name: String,
    pub location: DeliveryLocation,
}

/// Catalog pricing for a water can, in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pricing {
    pub unit_price: u64,
}

impl Pricing {
    pub fn new(unit_price: u64) -> Self {
        Self { unit_price }
    }

    /// Saturates instead of wrapping for prices above [`MAX_UNIT_PRICE`].
    pub fn amount_for(&self, quantity: u32) -> u64 {
        self.unit_price.saturating_mul(u64::from(quantity))
    }
}

/// A customer request for N water cans, tracked through the delivery lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub customer: CustomerRef,
    pub quantity: u32,
    pub order_date: DateTime<Utc>,
    pub delivery_date: Option<DateTime<Utc>>,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    /// Unit price captured when the order was placed.
    pub unit_price: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_slot: Option<TimeSlot>,
}

impl Order {
    pub fn compute_amount(&self) -> u64 {
        Pricing::new(self.unit_price).amount_for(self.quantity)
    }

    /// `delivery_date` is set exactly when the order is delivered.
    pub fn delivery_date_consistent(&self) -> bool {
        self.delivery_date.is_some() == (self.status == OrderStatus::Delivered)
    }
}

/// A customer's order request, as submitted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub customer_id: String,
    pub quantity: u32,
    pub payment_method: PaymentMethod,
    /// Defaults to the customer's registered location.
    #[serde(default)]
    pub delivery_location: Option<DeliveryLocation>,
}

/// Payload for creating a new order. The actor assigns the ID.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub customer: CustomerRef,
    pub quantity: u32,
    pub payment_method: PaymentMethod,
    pub unit_price: u64,
    pub order_date: DateTime<Utc>,
    pub schedule_id: Option<String>,
    pub delivery_slot: Option<TimeSlot>,
}
