//! Contribution entity - The append-only donor history of a request.
//!
//! Each row is an immutable record of one donation action. Row insertion
//! order is chronological order, so the autoincrement `id` doubles as the
//! history ordering. `supply_type` is the persisted tag of the contribution
//! variant (`"full"`, `"partial"`, or `"itemized"`); `items` holds the
//! per-category breakdown for itemized contributions and `[]` otherwise.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Donor contribution database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contributions")]
pub struct Model {
    /// Unique identifier; insertion order equals chronological order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the request this contribution was made against
    pub request_id: String,
    /// Name the donor entered
    pub donor_name: String,
    /// Contribution tag: `"full"`, `"partial"`, or `"itemized"`
    pub supply_type: String,
    /// JSON array of `{category, quantity}` pairs; empty for bulk donations
    pub items: Json,
    /// When the donation was recorded
    pub timestamp: DateTimeUtc,
}

/// Defines relationships between Contribution and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each contribution belongs to one request
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
