//! Book request entity - The aggregate root of the donation-matching flow.
//!
//! Each request carries the student's descriptive fields, a denormalized
//! `categories` list kept for search/filtering, a derived `status`, and a
//! `version` counter used as the optimistic-lock guard by the donation
//! reconciliation path. The itemized needs live in the `request_items`
//! table; the contribution history lives in `contributions`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Book request database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "book_requests")]
pub struct Model {
    /// Client-generated identifier, globally unique
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Name of the student requesting supplies
    pub student_name: String,
    /// School grade, e.g. `"Grade 5"` or `"O/L (Grade 11)"`
    pub grade: String,
    /// School or location description
    pub school: String,
    /// Sri Lankan district, e.g. `"Colombo"`
    pub district: String,
    /// Free-text description of what is needed
    pub details: String,
    /// Urgency level: `"Low"`, `"Medium"`, `"High"`, or
    /// `"Critical - Flood Victim"`
    pub urgency: String,
    /// WhatsApp contact number in local format (leading trunk `0`)
    pub contact_number: String,
    /// JSON array of requested category names; set at creation for
    /// search/filtering and never shrunk afterwards. Legacy records have
    /// only this list and no `request_items` rows.
    pub categories: Json,
    /// Aggregate status derived from the item rows: `"Pending"`,
    /// `"Partially Fulfilled"`, `"Matched"` (legacy only), or `"Fulfilled"`
    pub status: String,
    /// Optimistic-lock counter, bumped by every reconciliation write
    pub version: i64,
    /// When the request was submitted
    pub timestamp: DateTimeUtc,
}

/// Defines relationships between `BookRequest` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One request has many itemized need lines
    #[sea_orm(has_many = "super::request_item::Entity")]
    RequestItems,
    /// One request accumulates many donor contributions
    #[sea_orm(has_many = "super::contribution::Entity")]
    Contributions,
}

impl Related<super::request_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RequestItems.def()
    }
}

impl Related<super::contribution::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contributions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
