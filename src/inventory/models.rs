use serde::{Deserialize, Serialize};

pub type ProductId = i64;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub stock: i64,
}

/// Body of `POST /inventory` and `PUT /inventory/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductInput {
    pub name: String,
    pub price: f64,
    pub stock: i64,
}

impl Product {
    pub fn input(&self) -> ProductInput {
        ProductInput {
            name: self.name.clone(),
            price: self.price,
            stock: self.stock,
        }
    }
}
