use chrono::{NaiveDate, Utc};
use tracing::{debug, error, info, instrument};

use crate::actor_framework::ResourceClient;
use crate::clients::CustomerClient;
use crate::domain::{
    quantity_in_range, summarize, DashboardSummary, DeliverySchedule, NewOrder, Order, OrderCreate,
    OrderStatus, Pricing, TimeSlot, MAX_QUANTITY_PER_ORDER,
};
use crate::order_actor::{OrderAction, OrderError};

/// Client for interacting with the Order actor.
///
/// Validates the customer and stamps the configured unit price before the
/// order reaches the actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    customer_client: CustomerClient,
    pricing: Pricing,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>, customer_client: CustomerClient, pricing: Pricing) -> Self {
        Self {
            inner,
            customer_client,
            pricing,
        }
    }

    pub fn pricing(&self) -> Pricing {
        self.pricing
    }

    #[instrument(skip(self, order), fields(customer_id = %order.customer_id, quantity = order.quantity))]
    pub async fn create_order(&self, order: NewOrder) -> Result<Order, OrderError> {
        info!("Processing create_order request (Client Side)");
        self.place(order, None, None).await
    }

    /// Places the order a schedule stands for.
    #[instrument(skip(self, schedule), fields(schedule_id = %schedule.id))]
    pub async fn place_scheduled_order(&self, schedule: &DeliverySchedule) -> Result<Order, OrderError> {
        let order = NewOrder {
            customer_id: schedule.customer_id.clone(),
            quantity: schedule.quantity,
            payment_method: schedule.payment_method,
            delivery_location: None,
        };
        self.place(order, Some(schedule.id.clone()), Some(schedule.slot)).await
    }

    async fn place(
        &self,
        order: NewOrder,
        schedule_id: Option<String>,
        delivery_slot: Option<TimeSlot>,
    ) -> Result<Order, OrderError> {
        // Step 1: Validate quantity
        if !quantity_in_range(order.quantity) {
            return Err(OrderError::ValidationError(format!(
                "Quantity must be between 1 and {}, got {}",
                MAX_QUANTITY_PER_ORDER, order.quantity
            )));
        }

        // Step 2: Validate customer
        let customer = match self.customer_client.get_customer(order.customer_id.clone()).await {
            Ok(Some(customer)) => {
                info!(customer_name = %customer.name, "Customer validation successful");
                customer
            }
            Ok(None) => {
                error!("Customer not found");
                return Err(OrderError::InvalidCustomer(order.customer_id));
            }
            Err(e) => {
                error!(error = %e, "Customer validation failed");
                return Err(OrderError::ActorCommunicationError(e.to_string()));
            }
        };

        // Step 3: Create order in ResourceActor
        let payload = OrderCreate {
            customer: customer.as_order_ref(order.delivery_location),
            quantity: order.quantity,
            payment_method: order.payment_method,
            unit_price: self.pricing.unit_price,
            order_date: Utc::now(),
            schedule_id,
            delivery_slot,
        };
        let created = self.inner.create(payload).await?;
        info!(order_id = %created.id, amount = created.compute_amount(), "Order placed");
        Ok(created)
    }

    pub async fn accept_order(&self, id: String) -> Result<Order, OrderError> {
        self.transition(id, OrderAction::Accept).await
    }

    pub async fn cancel_order(&self, id: String) -> Result<Order, OrderError> {
        self.transition(id, OrderAction::Cancel).await
    }

    pub async fn dispatch_order(&self, id: String) -> Result<Order, OrderError> {
        self.transition(id, OrderAction::Dispatch).await
    }

    pub async fn deliver_order(&self, id: String) -> Result<Order, OrderError> {
        self.transition(id, OrderAction::Deliver { at: Utc::now() }).await
    }

    pub async fn verify_payment(&self, id: String) -> Result<Order, OrderError> {
        self.transition(id, OrderAction::VerifyPayment).await
    }

    pub async fn reject_payment(&self, id: String) -> Result<Order, OrderError> {
        self.transition(id, OrderAction::RejectPayment).await
    }

    #[instrument(skip(self, action), fields(action = action.name()))]
    async fn transition(&self, id: String, action: OrderAction) -> Result<Order, OrderError> {
        debug!("Sending request");
        let order = self.inner.perform_action(id, action).await?;
        info!(
            status = %order.status,
            payment_status = %order.payment_status,
            "Order updated"
        );
        Ok(order)
    }

    /// Orders in `status`, oldest first.
    pub async fn list_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, OrderError> {
        self.filtered(|o| o.status == status).await
    }

    pub async fn pending_orders(&self) -> Result<Vec<Order>, OrderError> {
        self.list_by_status(OrderStatus::Pending).await
    }

    /// Accepted and out-for-delivery orders.
    pub async fn active_orders(&self) -> Result<Vec<Order>, OrderError> {
        self.filtered(|o| o.status.is_active()).await
    }

    pub async fn delivered_orders(&self) -> Result<Vec<Order>, OrderError> {
        self.list_by_status(OrderStatus::Delivered).await
    }

    pub async fn list_for_customer(&self, customer_id: &str) -> Result<Vec<Order>, OrderError> {
        self.filtered(|o| o.customer.customer_id == customer_id).await
    }

    #[instrument(skip(self))]
    pub async fn summary(&self, date: NaiveDate) -> Result<DashboardSummary, OrderError> {
        let orders = self.inner.list().await?;
        Ok(summarize(&orders, date))
    }

    async fn filtered<F>(&self, keep: F) -> Result<Vec<Order>, OrderError>
    where
        F: Fn(&Order) -> bool,
    {
        let orders = self.inner.list().await?;
        Ok(orders.into_iter().filter(|o| keep(o)).collect())
    }
}

impl_client_methods!(OrderClient, Order, OrderError, order);
