//! Shared test utilities for `BookFlow`.
//!
//! This module provides common helper functions for setting up test
//! databases and creating test requests with sensible defaults.

use crate::{
    core::model::{BookCategory, RequestStatus, UrgencyLevel, categories_json},
    core::request::{NewBookRequest, NewItem, create_request},
    entities::request,
    errors::Result,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Builds a request input with sensible defaults.
///
/// # Defaults
/// * `student_name`: `"Test Student"`
/// * `grade`: `"Grade 5"`
/// * `items`: 2x Textbook, 1x Exercise Book
pub fn test_request_input(id: &str) -> NewBookRequest {
    NewBookRequest {
        id: id.to_string(),
        student_name: "Test Student".to_string(),
        grade: "Grade 5".to_string(),
        school: "Test Vidyalaya".to_string(),
        district: "Colombo".to_string(),
        details: "Grade 5 Math and Sinhala text books.".to_string(),
        urgency: UrgencyLevel::High,
        contact_number: "0771234567".to_string(),
        items: vec![
            NewItem {
                category: BookCategory::Textbook,
                quantity: 2,
            },
            NewItem {
                category: BookCategory::Exercise,
                quantity: 1,
            },
        ],
    }
}

/// Creates a test request with the default input.
pub async fn create_test_request(db: &DatabaseConnection, id: &str) -> Result<request::Model> {
    create_request(db, test_request_input(id)).await
}

/// Inserts a legacy-shaped request: a category list but no item rows,
/// the shape older records have in the store.
pub async fn create_legacy_request(
    db: &DatabaseConnection,
    id: &str,
    categories: &[BookCategory],
) -> Result<request::Model> {
    let model = request::ActiveModel {
        id: Set(id.to_string()),
        student_name: Set("Legacy Student".to_string()),
        grade: Set("Grade 8".to_string()),
        school: Set("Ratnapura Central".to_string()),
        district: Set("Ratnapura".to_string()),
        details: Set("School bag and geometry box needed.".to_string()),
        urgency: Set(UrgencyLevel::Critical.as_str().to_string()),
        contact_number: Set("0765554444".to_string()),
        categories: Set(categories_json(categories)),
        status: Set(RequestStatus::Pending.as_str().to_string()),
        version: Set(0),
        timestamp: Set(Utc::now()),
    };

    model.insert(db).await.map_err(Into::into)
}

/// Sets up a complete test environment with a default request.
/// Returns (db, request) for common test scenarios.
pub async fn setup_with_request() -> Result<(DatabaseConnection, request::Model)> {
    let db = setup_test_db().await?;
    let request = create_test_request(&db, "req-test").await?;
    Ok((db, request))
}
