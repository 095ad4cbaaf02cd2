use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::order::{CustomerRef, DeliveryLocation};

/// A registered customer who can place orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: DeliveryLocation,
    pub registered_at: DateTime<Utc>,
}

impl Customer {
    /// Reference stored on an order. An explicit location overrides the
    /// registered one.
    pub fn as_order_ref(&self, location: Option<DeliveryLocation>) -> CustomerRef {
        CustomerRef {
            customer_id: self.id.clone(),
            name: self.name.clone(),
            location: location.unwrap_or_else(|| self.location.clone()),
        }
    }
}

/// A registration request, as submitted.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub location: DeliveryLocation,
}

/// Payload for registering a new customer.
#[derive(Debug, Clone)]
pub struct CustomerCreate {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: DeliveryLocation,
    pub registered_at: DateTime<Utc>,
}

/// Payload for updating an existing customer. The email is fixed at registration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerPatch {
    pub name: Option<String>,
    /// `None` leaves the phone alone; `Some(None)` (JSON `null`) clears it.
    #[serde(default, deserialize_with = "deserialize_present")]
    pub phone: Option<Option<String>>,
    pub location: Option<DeliveryLocation>,
}

// Runs only for fields present in the input, so `null` becomes `Some(None)`.
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_distinguishes_absent_and_null_phone() {
        let patch: CustomerPatch = serde_json::from_str(r#"{"name": "John"}"#).unwrap();
        assert_eq!(patch.phone, None);

        let patch: CustomerPatch = serde_json::from_str(r#"{"phone": null}"#).unwrap();
        assert_eq!(patch.phone, Some(None));

        let patch: CustomerPatch = serde_json::from_str(r#"{"phone": "98450 00000"}"#).unwrap();
        assert_eq!(patch.phone, Some(Some("98450 00000".to_string())));
    }
}
