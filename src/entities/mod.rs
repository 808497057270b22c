//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod contribution;
pub mod library_book;
pub mod request;
pub mod request_item;

// Re-export specific types to avoid conflicts
pub use contribution::{
    Column as ContributionColumn, Entity as Contribution, Model as ContributionModel,
};
pub use library_book::{
    Column as LibraryBookColumn, Entity as LibraryBook, Model as LibraryBookModel,
};
pub use request::{Column as RequestColumn, Entity as Request, Model as RequestModel};
pub use request_item::{
    Column as RequestItemColumn, Entity as RequestItem, Model as RequestItemModel,
};
