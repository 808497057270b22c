//! Library book entity - Community-uploaded reading material.
//!
//! Books are shared as external links with a per-book download counter
//! that is incremented atomically at the database level.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Library book database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "library_books")]
pub struct Model {
    /// Client-generated identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Book title
    pub title: String,
    /// Book author
    pub author: String,
    /// Item category name, e.g. `"Textbook"` or `"Storybook"`
    pub category: String,
    /// Free-text description
    pub description: String,
    /// Content language: `"Sinhala"`, `"Tamil"`, or `"English"`
    pub language: String,
    /// External URL of the book content
    pub link_url: String,
    /// Optional cover image URL
    pub cover_url: Option<String>,
    /// Display name of the uploader
    pub uploaded_by: String,
    /// Number of recorded downloads
    pub downloads: i64,
    /// When the book was uploaded
    pub timestamp: DateTimeUtc,
}

/// `LibraryBook` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
