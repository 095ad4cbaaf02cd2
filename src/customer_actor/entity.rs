use std::convert::Infallible;

use crate::actor_framework::Entity;
use crate::domain::{Customer, CustomerCreate, CustomerPatch, DeliveryLocation};
use super::error::CustomerError;

fn validate_name(name: &str) -> Result<(), CustomerError> {
    if name.trim().is_empty() {
        return Err(CustomerError::ValidationError("Name required".to_string()));
    }
    Ok(())
}

fn validate_location(location: &DeliveryLocation) -> Result<(), CustomerError> {
    if !location.is_complete() {
        return Err(CustomerError::ValidationError(
            "Location needs a block and a room".to_string(),
        ));
    }
    Ok(())
}

impl Entity for Customer {
    type Id = String;
    type CreateParams = CustomerCreate;
    type Patch = CustomerPatch;
    type Action = Infallible;
    type ActionResult = ();
    type Error = CustomerError;

    const KIND: &'static str = "customer";

    fn id(&self) -> &String {
        &self.id
    }

    /// Registers a customer.
    ///
    /// # Errors
    /// Rejects an empty name, an email without `@`, and an incomplete location.
    fn from_create_params(id: String, params: CustomerCreate) -> Result<Self, CustomerError> {
        validate_name(&params.name)?;
        if !params.email.contains('@') {
            return Err(CustomerError::ValidationError(format!(
                "Invalid email: {}",
                params.email
            )));
        }
        validate_location(&params.location)?;

        Ok(Self {
            id,
            name: params.name,
            email: params.email,
            phone: params.phone,
            location: params.location,
            registered_at: params.registered_at,
        })
    }

    /// Updates the profile fields present in the patch.
    fn on_update(&mut self, patch: CustomerPatch) -> Result<(), CustomerError> {
        if let Some(name) = patch.name {
            validate_name(&name)?;
            self.name = name;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(location) = patch.location {
            validate_location(&location)?;
            self.location = location;
        }
        Ok(())
    }

    fn handle_action(&mut self, action: Infallible) -> Result<(), CustomerError> {
        match action {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn params(name: &str, email: &str, block: &str) -> CustomerCreate {
        CustomerCreate {
            name: name.to_string(),
            email: email.to_string(),
            phone: None,
            location: DeliveryLocation::new(block, "101"),
            registered_at: Utc::now(),
        }
    }

    #[test]
    fn test_registration_validation() {
        assert!(Customer::from_create_params("CUS-001".into(), params("John", "john@example.com", "Block A")).is_ok());
        assert!(matches!(
            Customer::from_create_params("CUS-001".into(), params(" ", "john@example.com", "Block A")),
            Err(CustomerError::ValidationError(_))
        ));
        assert!(matches!(
            Customer::from_create_params("CUS-001".into(), params("John", "john.example.com", "Block A")),
            Err(CustomerError::ValidationError(_))
        ));
        assert!(matches!(
            Customer::from_create_params("CUS-001".into(), params("John", "john@example.com", "")),
            Err(CustomerError::ValidationError(_))
        ));
    }

    #[test]
    fn test_patch_updates_profile() {
        let mut customer =
            Customer::from_create_params("CUS-001".into(), params("John", "john@example.com", "Block A")).unwrap();
        customer
            .on_update(CustomerPatch {
                name: None,
                phone: Some(Some("98450 00000".to_string())),
                location: Some(DeliveryLocation::new("Block C", "310")),
            })
            .unwrap();
        assert_eq!(customer.name, "John");
        assert_eq!(customer.phone.as_deref(), Some("98450 00000"));
        assert_eq!(customer.location.block, "Block C");
    }

    #[test]
    fn test_patch_can_clear_phone() {
        let mut customer =
            Customer::from_create_params("CUS-001".into(), params("John", "john@example.com", "Block A")).unwrap();
        customer
            .on_update(CustomerPatch { phone: Some(Some("98450 00000".to_string())), ..Default::default() })
            .unwrap();

        // An absent phone keeps the number.
        customer.on_update(CustomerPatch { name: Some("John Doe".to_string()), ..Default::default() }).unwrap();
        assert_eq!(customer.phone.as_deref(), Some("98450 00000"));

        customer.on_update(CustomerPatch { phone: Some(None), ..Default::default() }).unwrap();
        assert_eq!(customer.phone, None);
        assert_eq!(customer.name, "John Doe");
    }
}
