//! # Customer Client
//!
//! Wraps a `ResourceClient<Customer>` and implements [`CustomersRepository`].

use crate::customer_actor::CustomerError;
use crate::model::{Customer, CustomerCreate, CustomerId};
use crate::repository::CustomersRepository;
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the Customer actor.
#[derive(Clone)]
pub struct CustomerClient {
    inner: ResourceClient<Customer>,
}

impl CustomerClient {
    pub fn new(inner: ResourceClient<Customer>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Customer> for CustomerClient {
    type Error = CustomerError;

    fn inner(&self) -> &ResourceClient<Customer> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity::<CustomerError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => CustomerError::NotFound(id),
            Err(other) => CustomerError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[async_trait]
impl CustomersRepository for CustomerClient {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, CustomerError> {
        self.get(*id).await
    }

    #[instrument(skip(self, params))]
    async fn create(&self, params: CustomerCreate) -> Result<Customer, CustomerError> {
        debug!(?params, "Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_actor::mock::MockClient;

    #[tokio::test]
    async fn missing_customer_is_none_not_error() {
        let id = CustomerId::new();
        let mut mock = MockClient::<Customer>::new();
        mock.expect_get(id).return_ok(None);

        let client = CustomerClient::new(mock.client());
        assert_eq!(client.find_by_id(&id).await.unwrap(), None);
        mock.verify();
    }

    #[tokio::test]
    async fn validation_errors_come_back_typed() {
        let mut mock = MockClient::<Customer>::new();
        mock.expect_create()
            .return_err(FrameworkError::entity(CustomerError::EmptyName));

        let client = CustomerClient::new(mock.client());
        let err = client
            .create(CustomerCreate {
                name: String::new(),
                email: "a@example.com".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err, CustomerError::EmptyName);
        mock.verify();
    }

    #[tokio::test]
    async fn closed_actor_is_a_communication_error() {
        let mut mock = MockClient::<Customer>::new();
        let id = CustomerId::new();
        mock.expect_get(id).return_err(FrameworkError::ActorClosed);

        let client = CustomerClient::new(mock.client());
        assert!(matches!(
            client.find_by_id(&id).await,
            Err(CustomerError::ActorCommunicationError(_))
        ));
    }
}
