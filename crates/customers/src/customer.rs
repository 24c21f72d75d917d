use serde::{Deserialize, Serialize};

use graphcrm_core::{CustomerId, DomainError, DomainResult};

/// Raw input for creating a customer.
///
/// `phone` is an explicit optional field of the typed input; there is no
/// dynamic fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl NewCustomer {
    pub fn new(name: impl Into<String>, email: impl Into<String>, phone: Option<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone,
        }
    }
}

/// Entity: Customer.
///
/// Email uniqueness is a store-level invariant; this type only enforces
/// field-level rules (non-blank name and email).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    id: CustomerId,
    name: String,
    email: String,
    phone: Option<String>,
}

impl Customer {
    /// Validate raw input and build the entity.
    pub fn create(id: CustomerId, input: NewCustomer) -> DomainResult<Self> {
        if input.name.trim().is_empty() {
            return Err(DomainError::validation("Name must not be blank."));
        }
        if input.email.trim().is_empty() {
            return Err(DomainError::validation("Email must not be blank."));
        }

        Ok(Self {
            id,
            name: input.name,
            email: input.email,
            phone: input.phone,
        })
    }

    pub fn id(&self) -> CustomerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }
}
