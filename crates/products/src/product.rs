use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use storefront_core::{Entity, EntityId, Fields, InvalidId, ValidationError, ValidationResult};

/// Product identifier, assigned by the product service on creation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub EntityId);

impl ProductId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl From<i64> for ProductId {
    fn from(value: i64) -> Self {
        Self(EntityId::new(value))
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl core::str::FromStr for ProductId {
    type Err = InvalidId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// Stored product.
///
/// `price` is serialized as a decimal string (`"19.99"`) so its exact value and
/// scale survive any number of create/read round trips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct Product {
    id: ProductId,
    name: String,
    description: String,
    price: Decimal,
    category: String,
    stock_quantity: i64,
    created_at: DateTime<Utc>,
}

impl Product {
    pub fn new(id: ProductId, request: ProductCreate, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: request.name,
            description: request.description,
            price: request.price,
            category: request.category,
            stock_quantity: request.stock_quantity,
            created_at,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn stock_quantity(&self) -> i64 {
        self.stock_quantity
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl TryFrom<Value> for Product {
    type Error = ValidationError;

    fn try_from(value: Value) -> ValidationResult<Self> {
        let fields = Fields::of(&value)?;
        match (
            fields.integer("id"),
            fields.string("name"),
            fields.string("description"),
            fields.decimal("price"),
            fields.string("category"),
            fields.integer("stock_quantity"),
            fields.timestamp("created_at"),
        ) {
            (
                Ok(id),
                Ok(name),
                Ok(description),
                Ok(price),
                Ok(category),
                Ok(stock_quantity),
                Ok(created_at),
            ) => Ok(Self {
                id: ProductId::from(id),
                name,
                description,
                price,
                category,
                stock_quantity,
                created_at,
            }),
            (id, name, description, price, category, stock_quantity, created_at) => {
                Err(ValidationError::collect([
                    id.err(),
                    name.err(),
                    description.err(),
                    price.err(),
                    category.err(),
                    stock_quantity.err(),
                    created_at.err(),
                ]))
            }
        }
    }
}

/// Create request: everything but the server-assigned `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct ProductCreate {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub stock_quantity: i64,
}

impl ProductCreate {
    pub fn into_product(self, id: ProductId, created_at: DateTime<Utc>) -> Product {
        Product::new(id, self, created_at)
    }
}

impl TryFrom<Value> for ProductCreate {
    type Error = ValidationError;

    fn try_from(value: Value) -> ValidationResult<Self> {
        let fields = Fields::of(&value)?;
        match (
            fields.string("name"),
            fields.string("description"),
            fields.decimal("price"),
            fields.string("category"),
            fields.integer("stock_quantity"),
        ) {
            (Ok(name), Ok(description), Ok(price), Ok(category), Ok(stock_quantity)) => Ok(Self {
                name,
                description,
                price,
                category,
                stock_quantity,
            }),
            (name, description, price, category, stock_quantity) => {
                Err(ValidationError::collect([
                    name.err(),
                    description.err(),
                    price.err(),
                    category.err(),
                    stock_quantity.err(),
                ]))
            }
        }
    }
}

/// Response body; mirrors the stored entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct ProductResponse {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub stock_quantity: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            category: product.category,
            stock_quantity: product.stock_quantity,
            created_at: product.created_at,
        }
    }
}

impl TryFrom<Value> for ProductResponse {
    type Error = ValidationError;

    fn try_from(value: Value) -> ValidationResult<Self> {
        Product::try_from(value).map(Self::from)
    }
}
