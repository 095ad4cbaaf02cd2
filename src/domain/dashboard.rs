use chrono::NaiveDate;
use serde::Serialize;

use super::order::{Order, OrderStatus};

/// Seller-facing figures for a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub date: NaiveDate,
    pub pending: usize,
    pub active: usize,
    pub delivered_on_date: usize,
    pub revenue_on_date: u64,
}

/// Pending and active counts are current; the delivered figures only count
/// orders whose delivery date (UTC) falls on `date`.
pub fn summarize(orders: &[Order], date: NaiveDate) -> DashboardSummary {
    let delivered_on_date: Vec<&Order> = orders
        .iter()
        .filter(|o| o.status == OrderStatus::Delivered)
        .filter(|o| o.delivery_date.map(|d| d.date_naive()) == Some(date))
        .collect();

    DashboardSummary {
        date,
        pending: orders.iter().filter(|o| o.status == OrderStatus::Pending).count(),
        active: orders.iter().filter(|o| o.status.is_active()).count(),
        delivered_on_date: delivered_on_date.len(),
        revenue_on_date: delivered_on_date
            .iter()
            .fold(0u64, |total, o| total.saturating_add(o.compute_amount())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CustomerRef, DeliveryLocation, PaymentMethod, PaymentStatus};
    use chrono::{TimeZone, Utc};

    fn order(id: &str, quantity: u32, status: OrderStatus, delivered: Option<(u32, u32)>) -> Order {
        Order {
            id: id.to_string(),
            customer: CustomerRef {
                customer_id: "CUS-001".to_string(),
                name: "Sarah Williams".to_string(),
                location: DeliveryLocation::new("Block A", "102"),
            },
            quantity,
            order_date: Utc.with_ymd_and_hms(2024, 5, 14, 9, 0, 0).unwrap(),
            delivery_date: delivered
                .map(|(day, hour)| Utc.with_ymd_and_hms(2024, 5, day, hour, 30, 0).unwrap()),
            status,
            payment_method: PaymentMethod::Cash,
            payment_status: PaymentStatus::Verified,
            unit_price: 40,
            schedule_id: None,
            delivery_slot: None,
        }
    }

    #[test]
    fn test_summary_counts_and_revenue() {
        let orders = vec![
            order("ORD-001", 2, OrderStatus::Pending, None),
            order("ORD-002", 1, OrderStatus::Accepted, None),
            order("ORD-003", 3, OrderStatus::OutForDelivery, None),
            order("ORD-004", 2, OrderStatus::Delivered, Some((15, 16))),
            order("ORD-005", 4, OrderStatus::Delivered, Some((14, 16))),
            order("ORD-006", 5, OrderStatus::Cancelled, None),
        ];

        let summary = summarize(&orders, NaiveDate::from_ymd_opt(2024, 5, 15).unwrap());
        assert_eq!(summary.pending, 1);
        assert_eq!(summary.active, 2);
        assert_eq!(summary.delivered_on_date, 1);
        assert_eq!(summary.revenue_on_date, 80);
    }

    #[test]
    fn test_revenue_saturates_instead_of_overflowing() {
        let mut orders = vec![
            order("ORD-001", 10, OrderStatus::Delivered, Some((15, 10))),
            order("ORD-002", 10, OrderStatus::Delivered, Some((15, 11))),
        ];
        for o in &mut orders {
            o.unit_price = u64::MAX / 10;
        }

        let summary = summarize(&orders, NaiveDate::from_ymd_opt(2024, 5, 15).unwrap());
        assert_eq!(summary.delivered_on_date, 2);
        assert_eq!(summary.revenue_on_date, u64::MAX);
    }

    #[test]
    fn test_summary_of_empty_day() {
        let summary = summarize(&[], NaiveDate::from_ymd_opt(2024, 5, 15).unwrap());
        assert_eq!(summary.revenue_on_date, 0);
        assert_eq!(summary.delivered_on_date, 0);
    }
}
