//! Documents written to the target store.

use serde::{Deserialize, Serialize};

/// Common surface of every document the loader writes.
pub trait SeedDocument: Serialize + Send + Sync {
    /// Document id in the target collection.
    fn document_id(&self) -> &str;

    /// Human-readable label used in progress lines and error reports.
    fn label(&self) -> String;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetCategoryDocument {
    pub id: String,
    pub parent_id: Option<String>,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub position: i64,
    pub is_enabled: bool,
    pub price_enabled: bool,
    pub expiration_days: i64,
}

impl SeedDocument for TargetCategoryDocument {
    fn document_id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        format!("Category {} ({})", self.name, self.id)
    }
}

/// Contact block embedded in a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingContact {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub other: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetListingDocument {
    pub id: String,
    pub user_id: String,
    pub category_id: Option<String>,
    pub title: String,
    pub description: String,
    pub slug: String,
    pub listing_type: String,
    pub status: ListingStatus,
    pub price: i64,
    pub currency_code: String,
    pub price_negotiable: bool,
    pub location: String,
    pub contact: ListingContact,
    pub features: Vec<String>,
    pub images: Vec<String>,
    pub videos: Vec<String>,
    pub is_premium: bool,
    pub views_count: i64,
    pub expires_at: String,
    pub published_at: Option<String>,
    pub ip_address: Option<String>,
    pub auction_enabled: bool,
    pub seo_title: String,
    pub seo_keywords: Vec<String>,
}

impl SeedDocument for TargetListingDocument {
    fn document_id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        format!("Listing {} ({})", self.title, self.id)
    }
}

/// Publication state of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    Active,
    Draft,
    Rejected,
    Sold,
    Expired,
}

impl ListingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ListingStatus::Active => "active",
            ListingStatus::Draft => "draft",
            ListingStatus::Rejected => "rejected",
            ListingStatus::Sold => "sold",
            ListingStatus::Expired => "expired",
        }
    }
}
