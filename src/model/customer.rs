use crate::model::CustomerId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered customer.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](resource_actor::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](resource_actor::ResourceActor).
/// Orders embed a copy of the customer as it was when the order was placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a new customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerCreate {
    pub name: String,
    pub email: String,
}

/// Payload for updating an existing customer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl Customer {
    pub fn new(id: CustomerId, name: impl Into<String>, email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            email: email.into(),
            created_at: now,
            updated_at: now,
        }
    }
}
