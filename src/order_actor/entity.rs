use std::convert::Infallible;

use crate::actor_framework::Entity;
use crate::domain::{
    quantity_in_range, Order, OrderCreate, OrderStatus, PaymentMethod, PaymentStatus,
    MAX_QUANTITY_PER_ORDER, MAX_UNIT_PRICE,
};
use super::actions::OrderAction;
use super::error::OrderError;

/// Status an action moves an order to, or `None` if the action is not
/// allowed from `from`. Payment actions leave the status alone.
///
/// A payment can only fail while the order can still be cancelled.
fn next_status(from: OrderStatus, action: &OrderAction) -> Option<OrderStatus> {
    use OrderStatus::*;
    match (from, action) {
        (Pending, OrderAction::Accept) => Some(Accepted),
        (Pending, OrderAction::Cancel) => Some(Cancelled),
        (Accepted, OrderAction::Dispatch) => Some(OutForDelivery),
        (OutForDelivery, OrderAction::Deliver { .. }) => Some(Delivered),
        (Pending, OrderAction::RejectPayment) => Some(Pending),
        (s, OrderAction::VerifyPayment) if !s.is_terminal() => Some(s),
        _ => None,
    }
}

impl Order {
    fn check_payment_open(&self, action: &OrderAction) -> Result<(), OrderError> {
        let open = match action {
            // A failed payment can be retried and then verified.
            OrderAction::VerifyPayment => {
                matches!(self.payment_status, PaymentStatus::Pending | PaymentStatus::Failed)
            }
            _ => self.payment_status == PaymentStatus::Pending,
        };
        if !self.payment_method.requires_verification() || !open {
            return Err(OrderError::InvalidPaymentTransition {
                order_id: self.id.clone(),
                action: action.name(),
                method: self.payment_method,
                status: self.payment_status,
            });
        }
        Ok(())
    }

    fn check_payment_cleared(&self) -> Result<(), OrderError> {
        if self.payment_method.requires_verification() && self.payment_status != PaymentStatus::Verified {
            return Err(OrderError::PaymentGate {
                order_id: self.id.clone(),
                method: self.payment_method,
                status: self.payment_status,
            });
        }
        Ok(())
    }
}

impl Entity for Order {
    type Id = String;
    type CreateParams = OrderCreate;
    // Orders change only through lifecycle actions.
    type Patch = Infallible;
    type Action = OrderAction;
    type ActionResult = Order;
    type Error = OrderError;

    const KIND: &'static str = "order";

    fn id(&self) -> &String {
        &self.id
    }

    /// Creates a pending order with an unverified payment.
    ///
    /// # Errors
    /// Rejects quantities outside `1..=MAX_QUANTITY_PER_ORDER`, incomplete
    /// delivery locations and a unit price outside `1..=MAX_UNIT_PRICE`.
    fn from_create_params(id: String, params: OrderCreate) -> Result<Self, OrderError> {
        if !quantity_in_range(params.quantity) {
            return Err(OrderError::ValidationError(format!(
                "Quantity must be between 1 and {}, got {}",
                MAX_QUANTITY_PER_ORDER, params.quantity
            )));
        }
        if !params.customer.location.is_complete() {
            return Err(OrderError::ValidationError(
                "Delivery location needs a block and a room".to_string(),
            ));
        }
        if params.unit_price == 0 {
            return Err(OrderError::ValidationError("Unit price must be positive".to_string()));
        }
        if params.unit_price > MAX_UNIT_PRICE {
            return Err(OrderError::ValidationError(format!(
                "Unit price must be at most {MAX_UNIT_PRICE}"
            )));
        }

        Ok(Self {
            id,
            customer: params.customer,
            quantity: params.quantity,
            order_date: params.order_date,
            delivery_date: None,
            status: OrderStatus::Pending,
            payment_method: params.payment_method,
            payment_status: PaymentStatus::Pending,
            unit_price: params.unit_price,
            schedule_id: params.schedule_id,
            delivery_slot: params.delivery_slot,
        })
    }

    fn on_update(&mut self, patch: Infallible) -> Result<(), OrderError> {
        match patch {}
    }

    /// Applies a lifecycle or payment action.
    ///
    /// # Errors
    /// - `InvalidTransition` when the action is not allowed from the current status
    /// - `InvalidPaymentTransition` for payment actions on cash or verified payments,
    ///   and for rejecting an already failed payment
    /// - `PaymentGate` when delivering an unverified non-cash order
    fn handle_action(&mut self, action: OrderAction) -> Result<Order, OrderError> {
        let next = next_status(self.status, &action).ok_or_else(|| OrderError::InvalidTransition {
            order_id: self.id.clone(),
            action: action.name(),
            from: self.status,
        })?;

        match action {
            OrderAction::Accept => {
                if self.payment_method == PaymentMethod::Cash {
                    self.payment_status = PaymentStatus::Verified;
                }
            }
            OrderAction::Cancel | OrderAction::Dispatch => {}
            OrderAction::Deliver { at } => {
                self.check_payment_cleared()?;
                self.delivery_date = Some(at);
            }
            OrderAction::VerifyPayment => {
                self.check_payment_open(&action)?;
                self.payment_status = PaymentStatus::Verified;
            }
            OrderAction::RejectPayment => {
                self.check_payment_open(&action)?;
                self.payment_status = PaymentStatus::Failed;
            }
        }
        self.status = next;
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CustomerRef, DeliveryLocation};
    use chrono::Utc;

    fn create(quantity: u32, method: PaymentMethod) -> Result<Order, OrderError> {
        Order::from_create_params(
            "ORD-001".to_string(),
            OrderCreate {
                customer: CustomerRef {
                    customer_id: "CUS-001".to_string(),
                    name: "John Doe".to_string(),
                    location: DeliveryLocation::new("Block A", "101"),
                },
                quantity,
                payment_method: method,
                unit_price: 40,
                order_date: Utc::now(),
                schedule_id: None,
                delivery_slot: None,
            },
        )
    }

    fn order_in(status: OrderStatus, method: PaymentMethod) -> Order {
        let mut order = create(2, method).unwrap();
        let path = match status {
            OrderStatus::Pending => vec![],
            OrderStatus::Accepted => vec![OrderAction::Accept],
            OrderStatus::OutForDelivery => vec![OrderAction::Accept, OrderAction::Dispatch],
            OrderStatus::Delivered if method.requires_verification() => vec![
                OrderAction::VerifyPayment,
                OrderAction::Accept,
                OrderAction::Dispatch,
                OrderAction::Deliver { at: Utc::now() },
            ],
            OrderStatus::Delivered => vec![
                OrderAction::Accept,
                OrderAction::Dispatch,
                OrderAction::Deliver { at: Utc::now() },
            ],
            OrderStatus::Cancelled => vec![OrderAction::Cancel],
        };
        for action in path {
            order.handle_action(action).unwrap();
        }
        order
    }

    fn all_actions() -> Vec<OrderAction> {
        vec![
            OrderAction::Accept,
            OrderAction::Cancel,
            OrderAction::Dispatch,
            OrderAction::Deliver { at: Utc::now() },
            OrderAction::VerifyPayment,
            OrderAction::RejectPayment,
        ]
    }

    const ALL_STATUSES: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Accepted,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    #[test]
    fn test_new_order_is_pending_and_unverified() {
        let order = create(2, PaymentMethod::Cash).unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.payment_status, PaymentStatus::Pending);
        assert_eq!(order.delivery_date, None);
    }

    #[test]
    fn test_quantity_bounds() {
        assert!(matches!(create(0, PaymentMethod::Cash), Err(OrderError::ValidationError(_))));
        assert!(matches!(create(11, PaymentMethod::Cash), Err(OrderError::ValidationError(_))));
        assert!(create(1, PaymentMethod::Cash).is_ok());
        assert!(create(10, PaymentMethod::Cash).is_ok());
    }

    #[test]
    fn test_unit_price_bounds() {
        let priced = |unit_price: u64| {
            let params = OrderCreate {
                customer: CustomerRef {
                    customer_id: "CUS-001".to_string(),
                    name: "John Doe".to_string(),
                    location: DeliveryLocation::new("Block A", "101"),
                },
                quantity: MAX_QUANTITY_PER_ORDER,
                payment_method: PaymentMethod::Cash,
                unit_price,
                order_date: Utc::now(),
                schedule_id: None,
                delivery_slot: None,
            };
            Order::from_create_params("ORD-001".to_string(), params)
        };

        assert!(matches!(priced(0), Err(OrderError::ValidationError(_))));
        assert!(matches!(priced(MAX_UNIT_PRICE + 1), Err(OrderError::ValidationError(_))));
        let order = priced(MAX_UNIT_PRICE).unwrap();
        assert_eq!(order.compute_amount(), MAX_UNIT_PRICE * u64::from(MAX_QUANTITY_PER_ORDER));
    }

    #[test]
    fn test_cash_order_full_lifecycle() {
        let mut order = create(2, PaymentMethod::Cash).unwrap();

        let accepted = order.handle_action(OrderAction::Accept).unwrap();
        assert_eq!(accepted.status, OrderStatus::Accepted);
        assert_eq!(accepted.payment_status, PaymentStatus::Verified);

        order.handle_action(OrderAction::Dispatch).unwrap();
        let at = Utc::now();
        let delivered = order.handle_action(OrderAction::Deliver { at }).unwrap();
        assert_eq!(delivered.status, OrderStatus::Delivered);
        assert_eq!(delivered.delivery_date, Some(at));
    }

    #[test]
    fn test_accept_outside_pending_is_invalid() {
        for status in ALL_STATUSES.into_iter().filter(|s| *s != OrderStatus::Pending) {
            let mut order = order_in(status, PaymentMethod::Cash);
            let before = order.clone();
            let err = order.handle_action(OrderAction::Accept).unwrap_err();
            assert!(matches!(err, OrderError::InvalidTransition { from, .. } if from == status));
            assert_eq!(order, before);
        }
    }

    #[test]
    fn test_deliver_before_dispatch_is_invalid() {
        for status in [OrderStatus::Pending, OrderStatus::Accepted] {
            let mut order = order_in(status, PaymentMethod::Cash);
            let err = order.handle_action(OrderAction::Deliver { at: Utc::now() }).unwrap_err();
            assert!(matches!(err, OrderError::InvalidTransition { action: "deliver", .. }));
        }
    }

    #[test]
    fn test_cancelled_is_terminal() {
        for action in all_actions() {
            let mut order = order_in(OrderStatus::Cancelled, PaymentMethod::Upi);
            let err = order.handle_action(action).unwrap_err();
            assert!(matches!(err, OrderError::InvalidTransition { from: OrderStatus::Cancelled, .. }));
        }
    }

    #[test]
    fn test_cancel_out_for_delivery_is_invalid() {
        let mut order = order_in(OrderStatus::OutForDelivery, PaymentMethod::Cash);
        let err = order.handle_action(OrderAction::Cancel).unwrap_err();
        assert_eq!(
            err,
            OrderError::InvalidTransition {
                order_id: "ORD-001".to_string(),
                action: "cancel",
                from: OrderStatus::OutForDelivery,
            }
        );
    }

    #[test]
    fn test_unverified_upi_cannot_be_delivered() {
        let mut order = create(1, PaymentMethod::Upi).unwrap();
        order.handle_action(OrderAction::Accept).unwrap();
        assert_eq!(order.payment_status, PaymentStatus::Pending);
        order.handle_action(OrderAction::Dispatch).unwrap();

        let before = order.clone();
        let err = order.handle_action(OrderAction::Deliver { at: Utc::now() }).unwrap_err();
        assert!(matches!(err, OrderError::PaymentGate { method: PaymentMethod::Upi, .. }));
        assert_eq!(order, before);

        order.handle_action(OrderAction::VerifyPayment).unwrap();
        let delivered = order.handle_action(OrderAction::Deliver { at: Utc::now() }).unwrap();
        assert_eq!(delivered.status, OrderStatus::Delivered);
    }

    #[test]
    fn test_failed_payment_blocks_delivery_until_verified() {
        let mut order = create(1, PaymentMethod::Card).unwrap();
        order.handle_action(OrderAction::RejectPayment).unwrap();
        assert_eq!(order.payment_status, PaymentStatus::Failed);
        assert!(matches!(
            order.handle_action(OrderAction::RejectPayment),
            Err(OrderError::InvalidPaymentTransition { status: PaymentStatus::Failed, .. })
        ));

        order.handle_action(OrderAction::Accept).unwrap();
        order.handle_action(OrderAction::Dispatch).unwrap();
        let before = order.clone();
        let err = order.handle_action(OrderAction::Deliver { at: Utc::now() }).unwrap_err();
        assert!(matches!(err, OrderError::PaymentGate { status: PaymentStatus::Failed, .. }));
        assert_eq!(order, before);

        order.handle_action(OrderAction::VerifyPayment).unwrap();
        let delivered = order.handle_action(OrderAction::Deliver { at: Utc::now() }).unwrap();
        assert_eq!(delivered.status, OrderStatus::Delivered);
    }

    #[test]
    fn test_reject_payment_only_while_pending() {
        for method in [PaymentMethod::Upi, PaymentMethod::Card, PaymentMethod::Wallet] {
            for status in [OrderStatus::Accepted, OrderStatus::OutForDelivery] {
                let mut order = order_in(status, method);
                let before = order.clone();
                let err = order.handle_action(OrderAction::RejectPayment).unwrap_err();
                assert_eq!(
                    err,
                    OrderError::InvalidTransition {
                        order_id: "ORD-001".to_string(),
                        action: "reject payment for",
                        from: status,
                    }
                );
                assert_eq!(order, before);

                // Still verifiable, so the order can reach delivery.
                order.handle_action(OrderAction::VerifyPayment).unwrap();
                assert_eq!(order.payment_status, PaymentStatus::Verified);
            }
        }
    }

    #[test]
    fn test_every_active_order_has_an_exit() {
        for method in [PaymentMethod::Cash, PaymentMethod::Upi, PaymentMethod::Card] {
            for status in [OrderStatus::Pending, OrderStatus::Accepted, OrderStatus::OutForDelivery] {
                for first in all_actions() {
                    let mut order = order_in(status, method);
                    let _ = order.handle_action(first);
                    if order.status.is_terminal() {
                        continue;
                    }
                    let exit = all_actions().into_iter().any(|action| {
                        let mut attempt = order.clone();
                        attempt.handle_action(action).is_ok() && attempt != order
                    });
                    assert!(exit, "{status:?}/{method:?} stuck at {:?}", order.payment_status);
                }
            }
        }
    }

    #[test]
    fn test_verify_payment_rules() {
        let mut cash = order_in(OrderStatus::Pending, PaymentMethod::Cash);
        assert!(matches!(
            cash.handle_action(OrderAction::VerifyPayment),
            Err(OrderError::InvalidPaymentTransition { method: PaymentMethod::Cash, .. })
        ));

        let mut wallet = order_in(OrderStatus::Pending, PaymentMethod::Wallet);
        let verified = wallet.handle_action(OrderAction::VerifyPayment).unwrap();
        assert_eq!(verified.payment_status, PaymentStatus::Verified);
        assert_eq!(verified.status, OrderStatus::Pending);
        assert!(matches!(
            wallet.handle_action(OrderAction::VerifyPayment),
            Err(OrderError::InvalidPaymentTransition { status: PaymentStatus::Verified, .. })
        ));
    }

    #[test]
    fn test_delivery_date_set_iff_delivered() {
        for method in [PaymentMethod::Cash, PaymentMethod::Upi] {
            for status in ALL_STATUSES {
                let mut order = order_in(status, method);
                assert!(order.delivery_date_consistent());
                for action in all_actions() {
                    let _ = order.handle_action(action);
                    assert!(order.delivery_date_consistent());
                }
            }
        }
    }
}
