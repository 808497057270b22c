//! Request business logic - Submission, lookup, and listing of book requests.
//!
//! Creation is an idempotent whole-request upsert keyed by the
//! client-generated id, mirroring a document-store "write whole record"
//! operation: descriptive fields and item rows are replaced wholesale.
//! Listing falls back to a fixed sample set when the store is empty or
//! unreachable so a fresh deployment still has something to show.

use crate::{
    core::model::{BookCategory, RequestStatus, UrgencyLevel, categories_json},
    entities::{Request, RequestItem, contribution, request, request_item},
    errors::{Error, Result},
};
use chrono::{Duration, Utc};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*, sea_query::OnConflict};
use tracing::warn;

/// One line item of a new request.
#[derive(Clone, Debug)]
pub struct NewItem {
    /// Requested category
    pub category: BookCategory,
    /// Units needed (positive)
    pub quantity: i32,
}

/// Input for [`create_request`].
#[derive(Clone, Debug)]
pub struct NewBookRequest {
    /// Client-generated id; see [`new_request_id`]
    pub id: String,
    pub student_name: String,
    pub grade: String,
    pub school: String,
    pub district: String,
    pub details: String,
    pub urgency: UrgencyLevel,
    pub contact_number: String,
    /// Itemized needs; at least one entry
    pub items: Vec<NewItem>,
}

/// Generates a fresh globally-unique request id.
pub fn new_request_id() -> String {
    format!("req-{}", uuid::Uuid::new_v4())
}

/// Creates a new book request, or replaces an existing one with the same
/// id wholesale (idempotent upsert).
///
/// The denormalized `categories` list is derived from the items at this
/// point and never changes afterwards. The request starts `Pending` with
/// all items unfulfilled and an empty donor history.
pub async fn create_request(
    db: &DatabaseConnection,
    new: NewBookRequest,
) -> Result<request::Model> {
    if new.id.trim().is_empty() {
        return Err(Error::Config {
            message: "Request id cannot be empty".to_string(),
        });
    }
    if new.student_name.trim().is_empty() {
        return Err(Error::Config {
            message: "Student name cannot be empty".to_string(),
        });
    }
    if new.contact_number.trim().is_empty() {
        return Err(Error::Config {
            message: "Contact number cannot be empty".to_string(),
        });
    }
    if new.items.is_empty() {
        return Err(Error::Config {
            message: "A request must include at least one item".to_string(),
        });
    }
    for item in &new.items {
        if item.quantity <= 0 {
            return Err(Error::InvalidQuantity {
                quantity: item.quantity,
            });
        }
    }

    let categories: Vec<BookCategory> = new.items.iter().map(|i| i.category).collect();

    let txn = db.begin().await?;

    let model = request::ActiveModel {
        id: Set(new.id.trim().to_string()),
        student_name: Set(new.student_name.trim().to_string()),
        grade: Set(new.grade),
        school: Set(new.school),
        district: Set(new.district),
        details: Set(new.details),
        urgency: Set(new.urgency.as_str().to_string()),
        contact_number: Set(new.contact_number.trim().to_string()),
        categories: Set(categories_json(&categories)),
        status: Set(RequestStatus::Pending.as_str().to_string()),
        version: Set(0),
        timestamp: Set(Utc::now()),
    };

    Request::insert(model)
        .on_conflict(
            OnConflict::column(request::Column::Id)
                .update_columns([
                    request::Column::StudentName,
                    request::Column::Grade,
                    request::Column::School,
                    request::Column::District,
                    request::Column::Details,
                    request::Column::Urgency,
                    request::Column::ContactNumber,
                    request::Column::Categories,
                    request::Column::Status,
                    request::Column::Version,
                    request::Column::Timestamp,
                ])
                .to_owned(),
        )
        .exec(&txn)
        .await?;

    // Whole-request replace: previous item rows and donor history go with
    // the old record
    RequestItem::delete_many()
        .filter(request_item::Column::RequestId.eq(new.id.trim()))
        .exec(&txn)
        .await?;
    contribution::Entity::delete_many()
        .filter(contribution::Column::RequestId.eq(new.id.trim()))
        .exec(&txn)
        .await?;

    for (position, item) in new.items.iter().enumerate() {
        let row = request_item::ActiveModel {
            request_id: Set(new.id.trim().to_string()),
            category: Set(item.category.as_str().to_string()),
            quantity: Set(item.quantity),
            fulfilled_count: Set(0),
            position: Set(position as i32),
            ..Default::default()
        };
        row.insert(&txn).await?;
    }

    txn.commit().await?;

    Request::find_by_id(new.id.trim().to_string())
        .one(db)
        .await?
        .ok_or_else(|| Error::RequestNotFound {
            id: new.id.trim().to_string(),
        })
}

/// Finds a request by its unique id, returning `None` if not found.
pub async fn get_request_by_id(
    db: &DatabaseConnection,
    request_id: &str,
) -> Result<Option<request::Model>> {
    Request::find_by_id(request_id.to_owned())
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all requests, newest first.
pub async fn get_all_requests(db: &DatabaseConnection) -> Result<Vec<request::Model>> {
    Request::find()
        .order_by_desc(request::Column::Timestamp)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all requests, substituting the fixed sample set when the
/// store is empty or unreachable.
///
/// The unreachable case is logged and swallowed here on purpose: the
/// listing is a read-only view and callers prefer stale sample content
/// over an error page. Write paths never swallow storage failures.
pub async fn get_all_requests_or_samples(db: &DatabaseConnection) -> Vec<request::Model> {
    match get_all_requests(db).await {
        Ok(requests) if requests.is_empty() => sample_requests(),
        Ok(requests) => requests,
        Err(error) => {
            warn!(%error, "Falling back to sample requests, store unreachable");
            sample_requests()
        }
    }
}

/// The fixed fallback sample set: three legacy-shaped requests (category
/// list only, no item rows), matching the original seed data.
pub fn sample_requests() -> Vec<request::Model> {
    let now = Utc::now();
    vec![
        request::Model {
            id: "req-001".to_string(),
            student_name: "Nimal Perera".to_string(),
            grade: "Grade 5".to_string(),
            school: "Vidyalaya, Kolonnawa".to_string(),
            district: "Colombo".to_string(),
            details: "Lost all books in Kelani river overflow. Need Grade 5 Math and Sinhala text books."
                .to_string(),
            urgency: UrgencyLevel::Critical.as_str().to_string(),
            contact_number: "0771234567".to_string(),
            categories: categories_json(&[BookCategory::Textbook, BookCategory::Storybook]),
            status: RequestStatus::Pending.as_str().to_string(),
            version: 0,
            timestamp: now - Duration::days(1),
        },
        request::Model {
            id: "req-002".to_string(),
            student_name: "Fatima R.".to_string(),
            grade: "O/L (Grade 11)".to_string(),
            school: "Muslim Ladies College, Galle".to_string(),
            district: "Galle".to_string(),
            details: "Past papers and exercise books for O/L preparation.".to_string(),
            urgency: UrgencyLevel::High.as_str().to_string(),
            contact_number: "0719876543".to_string(),
            categories: categories_json(&[BookCategory::Textbook, BookCategory::Exercise]),
            status: RequestStatus::Matched.as_str().to_string(),
            version: 0,
            timestamp: now - Duration::days(2),
        },
        request::Model {
            id: "req-003".to_string(),
            student_name: "Saman Kumara".to_string(),
            grade: "Grade 8".to_string(),
            school: "Ratnapura Central".to_string(),
            district: "Ratnapura".to_string(),
            details: "School bag and geometry box needed.".to_string(),
            urgency: UrgencyLevel::Critical.as_str().to_string(),
            contact_number: "0765554444".to_string(),
            categories: categories_json(&[BookCategory::Stationery, BookCategory::Other]),
            status: RequestStatus::Pending.as_str().to_string(),
            version: 0,
            timestamp: now - Duration::hours(12),
        },
    ]
}
