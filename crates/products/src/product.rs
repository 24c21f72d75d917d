use serde::{Deserialize, Serialize};

use graphcrm_core::{DomainError, DomainResult, ProductId};

/// Raw input for creating a product.
///
/// `price` and `stock` arrive signed so the non-negativity rules are
/// checked here rather than at the transport boundary. `stock` defaults
/// to 0 when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    /// Price in smallest currency unit (e.g., cents).
    pub price: i64,
    pub stock: Option<i64>,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, price: i64, stock: Option<i64>) -> Self {
        Self {
            name: name.into(),
            price,
            stock,
        }
    }
}

/// Entity: Product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    /// Price in smallest currency unit (e.g., cents).
    price: u64,
    stock: u32,
}

impl Product {
    /// Validate raw input and build the entity.
    pub fn create(id: ProductId, input: NewProduct) -> DomainResult<Self> {
        if input.name.trim().is_empty() {
            return Err(DomainError::validation("Name must not be blank."));
        }
        if input.price < 0 {
            return Err(DomainError::validation("Price must be non-negative."));
        }
        let stock = input.stock.unwrap_or(0);
        if stock < 0 {
            return Err(DomainError::validation("Stock must be non-negative."));
        }
        let stock = u32::try_from(stock)
            .map_err(|_| DomainError::validation("Stock exceeds the supported range."))?;

        Ok(Self {
            id,
            name: input.name,
            price: input.price as u64,
            stock,
        })
    }

    /// Rebuild from already-persisted values (no validation).
    pub fn from_parts(id: ProductId, name: String, price: u64, stock: u32) -> Self {
        Self {
            id,
            name,
            price,
            stock,
        }
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Price in smallest currency unit.
    pub fn price(&self) -> u64 {
        self.price
    }

    pub fn stock(&self) -> u32 {
        self.stock
    }
}
