//! Request item entity - One line item of need within a book request.
//!
//! `fulfilled_count` accumulates donated units and is mutated only by the
//! donation reconciliation path. Legacy requests (created before itemized
//! needs existed) have no rows here; readers derive synthetic items from
//! the parent request's `categories` list instead.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Request item database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "request_items")]
pub struct Model {
    /// Unique identifier for the item row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the request this line item belongs to
    pub request_id: String,
    /// Item category name, e.g. `"Textbook"` or `"Exercise Book"`
    pub category: String,
    /// Total units needed (positive)
    pub quantity: i32,
    /// Cumulative units donated so far; intended to stay at or below
    /// `quantity` but not clamped on write
    pub fulfilled_count: i32,
    /// Creation order within the request
    pub position: i32,
}

/// Defines relationships between `RequestItem` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each item line belongs to one request
    #[sea_orm(
        belongs_to = "super::request::Entity",
        from = "Column::RequestId",
        to = "super::request::Column::Id"
    )]
    Request,
}

impl Related<super::request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Request.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
