//! [`ActorEntity`] implementation for [`Customer`].

use super::CustomerError;
use crate::model::{Customer, CustomerCreate, CustomerId, CustomerUpdate};
use async_trait::async_trait;
use chrono::Utc;
use resource_actor::ActorEntity;

#[async_trait]
impl ActorEntity for Customer {
    type Id = CustomerId;
    type Create = CustomerCreate;
    type Update = CustomerUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = CustomerError;

    fn generate_id(_sequence: u64) -> CustomerId {
        CustomerId::new()
    }

    fn from_create_params(id: CustomerId, params: CustomerCreate) -> Result<Self, Self::Error> {
        Ok(Self::new(id, params.name.trim(), params.email.trim()))
    }

    async fn on_create(&mut self, _ctx: &()) -> Result<(), Self::Error> {
        validate(&self.name, &self.email)
    }

    async fn on_update(&mut self, update: CustomerUpdate, _ctx: &()) -> Result<(), Self::Error> {
        let name = update.name.map(|n| n.trim().to_string());
        let email = update.email.map(|e| e.trim().to_string());
        validate(
            name.as_deref().unwrap_or(&self.name),
            email.as_deref().unwrap_or(&self.email),
        )?;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(email) = email {
            self.email = email;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Err(CustomerError::UnsupportedAction)
    }
}

fn validate(name: &str, email: &str) -> Result<(), CustomerError> {
    if name.is_empty() {
        return Err(CustomerError::EmptyName);
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(CustomerError::InvalidEmail(email.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(name: &str, email: &str) -> CustomerCreate {
        CustomerCreate {
            name: name.into(),
            email: email.into(),
        }
    }

    #[tokio::test]
    async fn trims_and_accepts_valid_customer() {
        let mut customer =
            Customer::from_create_params(CustomerId::new(), create(" Alice ", "a@example.com"))
                .unwrap();
        customer.on_create(&()).await.unwrap();
        assert_eq!(customer.name, "Alice");
    }

    #[tokio::test]
    async fn rejects_blank_name_and_bad_email() {
        let mut blank =
            Customer::from_create_params(CustomerId::new(), create("  ", "a@example.com")).unwrap();
        assert_eq!(blank.on_create(&()).await, Err(CustomerError::EmptyName));

        let mut bad =
            Customer::from_create_params(CustomerId::new(), create("Bob", "bob.example.com"))
                .unwrap();
        assert!(matches!(
            bad.on_create(&()).await,
            Err(CustomerError::InvalidEmail(_))
        ));
    }

    #[tokio::test]
    async fn failed_update_leaves_customer_untouched() {
        let mut customer = Customer::new(CustomerId::new(), "Alice", "a@example.com");
        let update = CustomerUpdate {
            name: Some("Alicia".into()),
            email: Some("nope".into()),
        };
        assert!(customer.on_update(update, &()).await.is_err());
        assert_eq!(customer.name, "Alice");
    }
}
