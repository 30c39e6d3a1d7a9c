//! Catalogue records owned by the external CRUD collaborator.
//!
//! The core only ever reads these.

use serde::{Deserialize, Serialize};

use stockflow_core::Entity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub sku: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub unit_cost: f64,
    pub reorder_point: i64,
}

impl Entity for Product {
    type Id = i64;

    fn id(&self) -> &i64 {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warehouse {
    pub id: i64,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub location: String,
}

impl Entity for Warehouse {
    type Id = i64;

    fn id(&self) -> &i64 {
        &self.id
    }
}
