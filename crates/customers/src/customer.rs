use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use storefront_core::{Entity, EntityId, Fields, InvalidId, ValidationError, ValidationResult};

/// Customer identifier, assigned by the customer service on creation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(pub EntityId);

impl CustomerId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl From<i64> for CustomerId {
    fn from(value: i64) -> Self {
        Self(EntityId::new(value))
    }
}

impl core::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl core::str::FromStr for CustomerId {
    type Err = InvalidId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// Stored customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct Customer {
    id: CustomerId,
    name: String,
    email: String,
    phone: Option<String>,
    created_at: DateTime<Utc>,
}

impl Customer {
    pub fn new(id: CustomerId, request: CustomerCreate, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: request.name,
            email: request.email,
            phone: request.phone,
            created_at,
        }
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

impl Entity for Customer {
    type Id = CustomerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl TryFrom<Value> for Customer {
    type Error = ValidationError;

    fn try_from(value: Value) -> ValidationResult<Self> {
        let fields = Fields::of(&value)?;
        match (
            fields.integer("id"),
            fields.string("name"),
            fields.string("email"),
            fields.optional_string("phone"),
            fields.timestamp("created_at"),
        ) {
            (Ok(id), Ok(name), Ok(email), Ok(phone), Ok(created_at)) => Ok(Self {
                id: CustomerId::from(id),
                name,
                email,
                phone,
                created_at,
            }),
            (id, name, email, phone, created_at) => Err(ValidationError::collect([
                id.err(),
                name.err(),
                email.err(),
                phone.err(),
                created_at.err(),
            ])),
        }
    }
}

/// Create request: everything but the server-assigned `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct CustomerCreate {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl CustomerCreate {
    pub fn into_customer(self, id: CustomerId, created_at: DateTime<Utc>) -> Customer {
        Customer::new(id, self, created_at)
    }
}

impl TryFrom<Value> for CustomerCreate {
    type Error = ValidationError;

    fn try_from(value: Value) -> ValidationResult<Self> {
        let fields = Fields::of(&value)?;
        match (
            fields.string("name"),
            fields.string("email"),
            fields.optional_string("phone"),
        ) {
            (Ok(name), Ok(email), Ok(phone)) => Ok(Self { name, email, phone }),
            (name, email, phone) => Err(ValidationError::collect([
                name.err(),
                email.err(),
                phone.err(),
            ])),
        }
    }
}

/// Response body; mirrors the stored entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct CustomerResponse {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            name: customer.name,
            email: customer.email,
            phone: customer.phone,
            created_at: customer.created_at,
        }
    }
}

impl TryFrom<Value> for CustomerResponse {
    type Error = ValidationError;

    fn try_from(value: Value) -> ValidationResult<Self> {
        Customer::try_from(value).map(Self::from)
    }
}
