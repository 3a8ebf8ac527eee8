//! Domain DTOs for the TabNews API.
//!
//! # Design
//! Field names match the wire (snake_case), so serde needs no renames. The
//! mock-server crate defines its own copies of these shapes; the integration
//! tests catch drift between the two.
//!
//! `Content` requires `id`, `owner_id` and `slug`, none of which appear in
//! `ApiError`, so the two can share a call without confusing the decoder.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A post or a comment. Comments carry a `parent_id` and no title.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Content {
    pub id: Uuid,
    pub owner_id: Uuid,
    #[serde(default)]
    pub parent_id: Option<Uuid>,
    pub slug: String,
    #[serde(default)]
    pub title: Option<String>,
    /// Markdown. Omitted by list endpoints.
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub deleted_at: Option<String>,
    #[serde(default)]
    pub owner_username: String,
    #[serde(default)]
    pub tabcoins: i64,
    #[serde(default)]
    pub children_deep_count: u32,
}

/// Listing order accepted by the `strategy` query parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    New,
    Old,
    #[default]
    Relevant,
}

impl Strategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::New => "new",
            Strategy::Old => "old",
            Strategy::Relevant => "relevant",
        }
    }
}

/// Direction of a TabCoins vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Credit,
    Debit,
}

impl TransactionType {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Credit => "credit",
            TransactionType::Debit => "debit",
        }
    }
}

/// Vote totals returned after a TabCoins transaction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TabcoinsBalance {
    pub tabcoins: i64,
    pub tabcoins_credit: i64,
    pub tabcoins_debit: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_from_list_item() {
        let json = r#"{
            "id": "00000000-0000-0000-0000-000000000001",
            "owner_id": "00000000-0000-0000-0000-0000000000aa",
            "parent_id": null,
            "slug": "hello-world",
            "title": "Hello, world",
            "status": "published",
            "source_url": null,
            "created_at": "2024-01-01T00:00:00.000Z",
            "updated_at": "2024-01-01T00:00:00.000Z",
            "published_at": "2024-01-01T00:00:00.000Z",
            "deleted_at": null,
            "owner_username": "alice",
            "tabcoins": 7,
            "children_deep_count": 3
        }"#;
        let content: Content = serde_json::from_str(json).unwrap();
        assert_eq!(content.slug, "hello-world");
        assert_eq!(content.owner_username, "alice");
        assert!(content.body.is_none());
        assert_eq!(content.tabcoins, 7);
    }

    #[test]
    fn content_requires_identity_fields() {
        let result: Result<Content, _> = serde_json::from_str(r#"{"slug":"x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn strategy_wire_names() {
        assert_eq!(serde_json::to_value(Strategy::Relevant).unwrap(), "relevant");
        assert_eq!(Strategy::default(), Strategy::Relevant);
        assert_eq!(Strategy::New.as_str(), "new");
    }

    #[test]
    fn transaction_type_wire_names() {
        assert_eq!(serde_json::to_value(TransactionType::Debit).unwrap(), "debit");
        assert_eq!(TransactionType::Credit.as_str(), "credit");
    }
}
