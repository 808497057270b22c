//! Database configuration module for `BookFlow`.
//!
//! This module handles `SQLite` database connection and table creation
//! using `SeaORM`. Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the database schema always
//! matches the Rust struct definitions without manual SQL.

use crate::entities::{Contribution, LibraryBook, Request, RequestItem};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from the `DATABASE_URL` environment variable or
/// returns the default local `SQLite` path.
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/bookflow.sqlite".to_string())
}

/// Establishes a connection to the database using [`get_database_url`].
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url()).await.map_err(Into::into)
}

/// Creates all necessary database tables from the entity definitions:
/// requests, request items, contributions, and library books.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let request_table = schema
        .create_table_from_entity(Request)
        .if_not_exists()
        .to_owned();
    let request_item_table = schema
        .create_table_from_entity(RequestItem)
        .if_not_exists()
        .to_owned();
    let contribution_table = schema
        .create_table_from_entity(Contribution)
        .if_not_exists()
        .to_owned();
    let library_book_table = schema
        .create_table_from_entity(LibraryBook)
        .if_not_exists()
        .to_owned();

    db.execute(builder.build(&request_table)).await?;
    db.execute(builder.build(&request_item_table)).await?;
    db.execute(builder.build(&contribution_table)).await?;
    db.execute(builder.build(&library_book_table)).await?;

    Ok(())
}
