//! Donation orchestration - Reconciles donor contributions into requests.
//!
//! This module sequences the read of current persisted state, the pure
//! merge ([`crate::core::fulfillment`]), and the guarded write that
//! persists the new item state, the derived status, and the appended
//! history record. The write is protected against the lost-update race
//! between concurrent donations by an optimistic version check: a
//! reconciliation computed against a stale snapshot affects zero rows
//! and is retried against a fresh read.

use crate::{
    core::fulfillment::merge_contribution,
    core::model::{Contribution, categories_of, normalized_needs},
    entities::{Request, RequestItem, contribution, request, request_item},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{debug, info};

/// How many times a donation is recomputed against a fresh snapshot
/// before giving up with [`Error::ConcurrentUpdate`].
const MAX_RECONCILE_ATTEMPTS: u32 = 3;

/// Records a donor contribution against a request.
///
/// Validates the donor input, then runs read -> normalize -> merge ->
/// guarded write, retrying the whole sequence when a concurrent donation
/// won the version check. On success the request's items and status
/// reflect the merge and exactly one history row has been appended.
///
/// # Errors
/// * [`Error::RequestNotFound`] when the request id does not exist
/// * [`Error::ConcurrentUpdate`] when every attempt lost the version check
/// * [`Error::Config`] / [`Error::InvalidQuantity`] for rejected input
pub async fn record_donation(
    db: &DatabaseConnection,
    request_id: &str,
    donor_name: &str,
    contribution: &Contribution,
) -> Result<request::Model> {
    if donor_name.trim().is_empty() {
        return Err(Error::Config {
            message: "Donor name cannot be empty".to_string(),
        });
    }
    if let Contribution::Itemized(items) = contribution {
        if items.is_empty() {
            return Err(Error::Config {
                message: "Itemized contribution must include at least one item".to_string(),
            });
        }
        for item in items {
            if item.quantity <= 0 {
                return Err(Error::InvalidQuantity {
                    quantity: item.quantity,
                });
            }
        }
    }

    for attempt in 1..=MAX_RECONCILE_ATTEMPTS {
        let snapshot = Request::find_by_id(request_id.to_owned())
            .one(db)
            .await?
            .ok_or_else(|| Error::RequestNotFound {
                id: request_id.to_string(),
            })?;
        let item_rows = items_for_request(db, request_id).await?;

        if let Some(updated) =
            try_record_donation(db, &snapshot, &item_rows, donor_name, contribution).await?
        {
            info!(
                request_id,
                donor_name,
                status = %updated.status,
                "Donation recorded"
            );
            return Ok(updated);
        }

        debug!(request_id, attempt, "Reconciliation lost to a concurrent update, retrying");
    }

    Err(Error::ConcurrentUpdate {
        id: request_id.to_string(),
        attempts: MAX_RECONCILE_ATTEMPTS,
    })
}

/// One reconciliation attempt against a caller-supplied snapshot.
///
/// Returns `Ok(None)` when the request's `version` no longer matches the
/// snapshot, i.e. another donation was reconciled in between the read and
/// this write. Nothing is persisted in that case; the caller re-reads and
/// retries. On success the status update, the per-item fulfilled counts
/// (inserting materialized rows when the snapshot was a legacy record
/// without items), and the history append all commit in one database
/// transaction.
pub async fn try_record_donation(
    db: &DatabaseConnection,
    snapshot: &request::Model,
    item_rows: &[request_item::Model],
    donor_name: &str,
    contribution: &Contribution,
) -> Result<Option<request::Model>> {
    use sea_orm::sea_query::Expr;

    let categories = categories_of(snapshot)?;
    let needs = normalized_needs(&categories, item_rows)?;
    let outcome = merge_contribution(&needs, contribution);

    let txn = db.begin().await?;

    // The version filter is the compare-and-swap: zero affected rows
    // means the snapshot is stale.
    let guard = Request::update_many()
        .col_expr(request::Column::Status, Expr::value(outcome.status.as_str()))
        .col_expr(
            request::Column::Version,
            Expr::col(request::Column::Version).add(1),
        )
        .filter(request::Column::Id.eq(&snapshot.id))
        .filter(request::Column::Version.eq(snapshot.version))
        .exec(&txn)
        .await?;

    if guard.rows_affected == 0 {
        txn.rollback().await?;
        return Ok(None);
    }

    if item_rows.is_empty() {
        // First donation against a legacy record: persist the synthesized
        // items so later reads see the itemized shape.
        for (position, need) in outcome.items.iter().enumerate() {
            let row = request_item::ActiveModel {
                request_id: Set(snapshot.id.clone()),
                category: Set(need.category.as_str().to_string()),
                quantity: Set(need.quantity),
                fulfilled_count: Set(need.fulfilled_count),
                position: Set(position as i32),
                ..Default::default()
            };
            row.insert(&txn).await?;
        }
    } else {
        for (row, need) in item_rows.iter().zip(&outcome.items) {
            if row.fulfilled_count != need.fulfilled_count {
                let mut active: request_item::ActiveModel = row.clone().into();
                active.fulfilled_count = Set(need.fulfilled_count);
                active.update(&txn).await?;
            }
        }
    }

    let record = contribution::ActiveModel {
        request_id: Set(snapshot.id.clone()),
        donor_name: Set(donor_name.trim().to_string()),
        supply_type: Set(contribution.supply_type_tag().to_string()),
        items: Set(serde_json::to_value(contribution.donated_items())?),
        timestamp: Set(chrono::Utc::now()),
        ..Default::default()
    };
    record.insert(&txn).await?;

    txn.commit().await?;

    Request::find_by_id(snapshot.id.clone())
        .one(db)
        .await?
        .ok_or_else(|| Error::RequestNotFound {
            id: snapshot.id.clone(),
        })
        .map(Some)
}

/// Retrieves a request's item rows in creation order.
pub async fn items_for_request(
    db: &DatabaseConnection,
    request_id: &str,
) -> Result<Vec<request_item::Model>> {
    RequestItem::find()
        .filter(request_item::Column::RequestId.eq(request_id))
        .order_by_asc(request_item::Column::Position)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a request's contribution history in insertion order, which
/// is chronological order.
pub async fn contributions_for_request(
    db: &DatabaseConnection,
    request_id: &str,
) -> Result<Vec<contribution::Model>> {
    contribution::Entity::find()
        .filter(contribution::Column::RequestId.eq(request_id))
        .order_by_asc(contribution::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}
