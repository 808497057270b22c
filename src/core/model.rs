//! Domain vocabulary for the donation-matching flow.
//!
//! Defines the typed forms of the string-backed columns (categories,
//! urgency, status, supply type), the working shapes the merge algorithm
//! operates on, and the legacy normalization rule. `normalized_needs` is
//! the only place the legacy (categories-only) versus itemized data
//! shapes are reconciled; every reader of remaining quantity goes
//! through it.

use crate::{
    entities::{request, request_item},
    errors::{Error, Result},
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Requested item category.
///
/// Persisted as the display string (e.g. `"Exercise Book"`), matching the
/// values legacy records already contain.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookCategory {
    Textbook,
    Storybook,
    #[serde(rename = "Exercise Book")]
    Exercise,
    Stationery,
    Dictionary,
    Other,
}

impl BookCategory {
    /// The persisted string form of this category.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Textbook => "Textbook",
            Self::Storybook => "Storybook",
            Self::Exercise => "Exercise Book",
            Self::Stationery => "Stationery",
            Self::Dictionary => "Dictionary",
            Self::Other => "Other",
        }
    }

    /// Parses a persisted category string, returning `None` for unknown
    /// values.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Textbook" => Some(Self::Textbook),
            "Storybook" => Some(Self::Storybook),
            "Exercise Book" => Some(Self::Exercise),
            "Stationery" => Some(Self::Stationery),
            "Dictionary" => Some(Self::Dictionary),
            "Other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl fmt::Display for BookCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Urgency declared by the requester.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UrgencyLevel {
    Low,
    Medium,
    High,
    /// Flood-victim flag; persisted as `"Critical - Flood Victim"`
    #[serde(rename = "Critical - Flood Victim")]
    Critical,
}

impl UrgencyLevel {
    /// The persisted string form of this urgency level.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical - Flood Victim",
        }
    }

    /// Parses a persisted urgency string, returning `None` for unknown
    /// values.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Low" => Some(Self::Low),
            "Medium" => Some(Self::Medium),
            "High" => Some(Self::High),
            "Critical - Flood Victim" => Some(Self::Critical),
            _ => None,
        }
    }
}

/// Aggregate fulfillment status of a request.
///
/// Always derived from the item state; `Matched` is a legacy transitional
/// status that older records may still carry. It is parsed on read but
/// never produced by the derivation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    Pending,
    #[serde(rename = "Partially Fulfilled")]
    PartiallyFulfilled,
    Matched,
    Fulfilled,
}

impl RequestStatus {
    /// The persisted string form of this status.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::PartiallyFulfilled => "Partially Fulfilled",
            Self::Matched => "Matched",
            Self::Fulfilled => "Fulfilled",
        }
    }

    /// Parses a persisted status string, returning `None` for unknown
    /// values.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Pending" => Some(Self::Pending),
            "Partially Fulfilled" => Some(Self::PartiallyFulfilled),
            "Matched" => Some(Self::Matched),
            "Fulfilled" => Some(Self::Fulfilled),
            _ => None,
        }
    }

    /// Whether donors should still see this request as open.
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Pending | Self::PartiallyFulfilled)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coverage a donor declared: everything requested, or only part of it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupplyType {
    Full,
    Partial,
}

/// One line item of need, as the merge algorithm sees it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ItemNeed {
    /// Requested category
    pub category: BookCategory,
    /// Total units needed
    pub quantity: i32,
    /// Units donated so far
    pub fulfilled_count: i32,
}

impl ItemNeed {
    /// Units still outstanding; saturates at zero when over-donated.
    pub const fn remaining(self) -> i32 {
        let left = self.quantity - self.fulfilled_count;
        if left > 0 { left } else { 0 }
    }
}

/// A donor's declared contribution for one category. Ephemeral - exists
/// inside a single contribution submission and inside persisted history
/// rows, never standalone.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonatedItem {
    pub category: BookCategory,
    pub quantity: i32,
}

/// A donor contribution in its two incoming shapes: itemized with
/// per-category quantities, or bulk (legacy) with only a full/partial
/// flag and no breakdown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Contribution {
    /// Per-category breakdown of what the donor supplies
    Itemized(Vec<DonatedItem>),
    /// Donor covers everything; no breakdown
    BulkFull,
    /// Donor covers an unspecified part; history-only, cannot be
    /// reconciled against items
    BulkPartial,
}

impl Contribution {
    /// The persisted `supply_type` tag for this variant.
    pub const fn supply_type_tag(&self) -> &'static str {
        match self {
            Self::Itemized(_) => "itemized",
            Self::BulkFull => "full",
            Self::BulkPartial => "partial",
        }
    }

    /// The itemized breakdown, empty for bulk contributions.
    pub fn donated_items(&self) -> &[DonatedItem] {
        match self {
            Self::Itemized(items) => items,
            Self::BulkFull | Self::BulkPartial => &[],
        }
    }

    /// Rebuilds a contribution from its persisted parts.
    ///
    /// A non-empty item list wins over the tag (an itemized record is
    /// itemized whatever its tag says); otherwise `"full"` maps to
    /// [`Contribution::BulkFull`] and anything else to
    /// [`Contribution::BulkPartial`].
    pub fn from_parts(supply_type: &str, items: Vec<DonatedItem>) -> Self {
        if !items.is_empty() {
            Self::Itemized(items)
        } else if supply_type == "full" {
            Self::BulkFull
        } else {
            Self::BulkPartial
        }
    }
}

/// Decodes a request's denormalized `categories` JSON column.
pub fn categories_of(request: &request::Model) -> Result<Vec<BookCategory>> {
    let names: Vec<String> = serde_json::from_value(request.categories.clone())?;
    names
        .iter()
        .map(|name| {
            BookCategory::parse(name).ok_or_else(|| Error::UnknownCategory {
                value: name.clone(),
            })
        })
        .collect()
}

/// Encodes a category list for the `categories` JSON column.
pub fn categories_json(categories: &[BookCategory]) -> serde_json::Value {
    serde_json::Value::Array(
        categories
            .iter()
            .map(|c| serde_json::Value::String(c.as_str().to_string()))
            .collect(),
    )
}

/// Decodes the contribution stored in a history row.
pub fn contribution_of(row: &crate::entities::contribution::Model) -> Result<Contribution> {
    let items: Vec<DonatedItem> = serde_json::from_value(row.items.clone())?;
    Ok(Contribution::from_parts(&row.supply_type, items))
}

/// Resolves the legacy/itemized union into the canonical item state.
///
/// When the request has item rows they are the source of truth and are
/// converted as-is, so normalizing an already-itemized request is a
/// no-op. A legacy request (no item rows) gets one synthetic need of
/// quantity 1 per requested category, in category-list order.
pub fn normalized_needs(
    categories: &[BookCategory],
    items: &[request_item::Model],
) -> Result<Vec<ItemNeed>> {
    if items.is_empty() {
        return Ok(categories
            .iter()
            .map(|&category| ItemNeed {
                category,
                quantity: 1,
                fulfilled_count: 0,
            })
            .collect());
    }

    items
        .iter()
        .map(|row| {
            let category =
                BookCategory::parse(&row.category).ok_or_else(|| Error::UnknownCategory {
                    value: row.category.clone(),
                })?;
            Ok(ItemNeed {
                category,
                quantity: row.quantity,
                fulfilled_count: row.fulfilled_count,
            })
        })
        .collect()
}
