use chrono::Utc;
use tracing::{debug, info, instrument};

use crate::actor_framework::ResourceClient;
use crate::customer_actor::CustomerError;
use crate::domain::{Customer, CustomerCreate, CustomerPatch, NewCustomer};

/// Client for interacting with the Customer actor.
#[derive(Clone)]
pub struct CustomerClient {
    inner: ResourceClient<Customer>,
}

impl_basic_client!(CustomerClient, Customer, CustomerError, customer);

impl CustomerClient {
    #[instrument(skip(self, registration), fields(customer_name = %registration.name))]
    pub async fn register_customer(&self, registration: NewCustomer) -> Result<Customer, CustomerError> {
        debug!("Sending request");
        let payload = CustomerCreate {
            name: registration.name,
            email: registration.email,
            phone: registration.phone,
            location: registration.location,
            registered_at: Utc::now(),
        };
        let customer = self.inner.create(payload).await?;
        info!(customer_id = %customer.id, "Customer registered");
        Ok(customer)
    }

    #[instrument(skip(self, patch))]
    pub async fn update_customer(&self, id: String, patch: CustomerPatch) -> Result<Customer, CustomerError> {
        debug!("Sending request");
        self.inner.update(id, patch).await
    }
}
