//! Mapping of legacy relational rows to target documents.
//!
//! All functions here are pure and total: missing or malformed fields fall
//! back to the defaults defined in [`convert`] and [`crate::config::TransformOptions`].

pub mod convert;
mod category;
mod document;
mod legacy;
mod listing;
mod text;

pub use category::transform_category;
pub use document::{
    ListingContact, ListingStatus, SeedDocument, TargetCategoryDocument, TargetListingDocument,
};
pub use legacy::{
    LegacyCategoryDescriptionRow, LegacyCategoryRow, LegacyItemDescriptionRow, LegacyItemRow,
};
pub use listing::{map_status, transform_listing};
pub use text::{extract_keywords, extract_location, KNOWN_PLACES};
