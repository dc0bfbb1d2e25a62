//! Listing mapping.

use super::convert::{
    is_false_flag, key_text, normalize_price, parse_flag, present, present_owned, slugify,
    text_or, truncate_chars, NEVER_EXPIRES,
};
use super::document::{ListingContact, ListingStatus, TargetListingDocument};
use super::legacy::{LegacyItemDescriptionRow, LegacyItemRow};
use super::text::{extract_keywords, extract_location};
use crate::config::TransformOptions;

/// Map a legacy item, joined with its description, to a listing document.
pub fn transform_listing(
    item: &LegacyItemRow,
    descriptions: &[LegacyItemDescriptionRow],
    opts: &TransformOptions,
) -> TargetListingDocument {
    let id = key_text(item.pk_i_id.as_deref()).unwrap_or_default();
    let description = descriptions
        .iter()
        .find(|d| key_text(d.fk_i_item_id.as_deref()).is_some_and(|fk| fk == id));

    let title = description
        .and_then(|d| present_owned(d.s_title.as_deref()))
        .unwrap_or_else(|| format!("Listing {}", id));
    let body = description
        .and_then(|d| d.s_description.clone())
        .unwrap_or_default();
    let seo_title = if description.is_some() {
        truncate_chars(&title, opts.seo_title_max_len)
    } else {
        String::new()
    };

    TargetListingDocument {
        user_id: key_text(item.fk_i_user_id.as_deref())
            .unwrap_or_else(|| opts.default_user_id.clone()),
        category_id: key_text(item.fk_i_category_id.as_deref()),
        slug: slugify(&title, opts.slug_max_len),
        listing_type: text_or(item.listing_type.as_deref(), "sale"),
        status: map_status(item),
        price: normalize_price(item.f_price.as_deref(), item.i_price.as_deref()),
        currency_code: text_or(item.fk_c_currency_code.as_deref(), &opts.default_currency),
        price_negotiable: false,
        location: extract_location(&body).unwrap_or_else(|| opts.default_location.clone()),
        contact: ListingContact {
            name: text_or(item.s_contact_name.as_deref(), "Unknown"),
            email: item.s_contact_email.clone(),
            phone: item.s_contact_phone.clone(),
            other: item.s_contact_other.clone(),
        },
        features: Vec::new(),
        images: Vec::new(),
        videos: Vec::new(),
        is_premium: parse_flag(item.b_premium.as_deref()),
        views_count: 0,
        expires_at: text_or(item.dt_expiration.as_deref(), NEVER_EXPIRES),
        published_at: item.dt_pub_date.clone(),
        ip_address: item.s_ip.clone(),
        auction_enabled: false,
        seo_title,
        seo_keywords: extract_keywords(&body, opts.keyword_limit),
        title,
        description: body,
        id,
    }
}

/// Listing status by priority: spam, then disabled/inactive, then an
/// explicit sold/expired status, else active.
pub fn map_status(item: &LegacyItemRow) -> ListingStatus {
    if parse_flag(item.b_spam.as_deref()) {
        return ListingStatus::Rejected;
    }
    if is_false_flag(item.b_enabled.as_deref()) || is_false_flag(item.b_active.as_deref()) {
        return ListingStatus::Draft;
    }
    match present(item.status.as_deref()) {
        Some("sold") => ListingStatus::Sold,
        Some("expired") => ListingStatus::Expired,
        _ => ListingStatus::Active,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> LegacyItemRow {
        LegacyItemRow {
            pk_i_id: Some(id.to_string()),
            fk_i_user_id: Some("42".to_string()),
            fk_i_category_id: Some("1".to_string()),
            f_price: Some("2500000.00".to_string()),
            b_enabled: Some("t".to_string()),
            b_active: Some("t".to_string()),
            b_spam: Some("f".to_string()),
            ..Default::default()
        }
    }

    fn description(fk: &str, title: &str, body: &str) -> LegacyItemDescriptionRow {
        LegacyItemDescriptionRow {
            fk_i_item_id: Some(fk.to_string()),
            fk_c_locale_code: Some("en_US".to_string()),
            s_title: Some(title.to_string()),
            s_description: Some(body.to_string()),
        }
    }

    #[test]
    fn test_full_listing() {
        let descriptions = vec![description(
            "10",
            "20 Perch Land for Sale in Kandy",
            "Bare land in Kandy. Water and electricity available.",
        )];
        let doc = transform_listing(&item("10"), &descriptions, &TransformOptions::default());
        assert_eq!(doc.id, "10");
        assert_eq!(doc.user_id, "42");
        assert_eq!(doc.category_id.as_deref(), Some("1"));
        assert_eq!(doc.title, "20 Perch Land for Sale in Kandy");
        assert_eq!(doc.slug, "20-perch-land-for-sale-in-kandy");
        assert_eq!(doc.price, 250_000_000);
        assert_eq!(doc.status, ListingStatus::Active);
        assert_eq!(doc.location, "Kandy");
        assert_eq!(doc.currency_code, "LKR");
        assert_eq!(doc.listing_type, "sale");
        assert_eq!(doc.expires_at, NEVER_EXPIRES);
        assert!(doc.features.is_empty());
        assert_eq!(
            doc.seo_keywords,
            vec!["bare", "land", "kandy", "water", "electricity", "available"]
        );
    }

    #[test]
    fn test_fallbacks_without_description() {
        let mut row = item("11");
        row.fk_i_user_id = None;
        let doc = transform_listing(&row, &[], &TransformOptions::default());
        assert_eq!(doc.title, "Listing 11");
        assert_eq!(doc.slug, "listing-11");
        assert_eq!(doc.description, "");
        assert_eq!(doc.seo_title, "");
        assert_eq!(doc.user_id, "1");
        assert_eq!(doc.location, "Sri Lanka");
        assert_eq!(doc.contact.name, "Unknown");
        assert!(doc.seo_keywords.is_empty());
    }

    #[test]
    fn test_integer_price_is_divided() {
        let mut row = item("12");
        row.f_price = None;
        row.i_price = Some("150000".to_string());
        let doc = transform_listing(&row, &[], &TransformOptions::default());
        assert_eq!(doc.price, 1500);
    }

    #[test]
    fn test_seo_title_is_truncated() {
        let long = "x".repeat(80);
        let descriptions = vec![description("13", &long, "")];
        let doc = transform_listing(&item("13"), &descriptions, &TransformOptions::default());
        assert_eq!(doc.seo_title.len(), 60);
        assert_eq!(doc.title.len(), 80);
    }

    #[test]
    fn test_status_priority() {
        let mut row = item("1");
        row.b_spam = Some("t".to_string());
        row.b_enabled = Some("f".to_string());
        assert_eq!(map_status(&row), ListingStatus::Rejected);

        row.b_spam = Some("f".to_string());
        row.status = Some("sold".to_string());
        assert_eq!(map_status(&row), ListingStatus::Draft);

        row.b_enabled = Some("t".to_string());
        row.b_active = Some("f".to_string());
        assert_eq!(map_status(&row), ListingStatus::Draft);

        row.b_active = Some("t".to_string());
        assert_eq!(map_status(&row), ListingStatus::Sold);

        row.status = Some("expired".to_string());
        assert_eq!(map_status(&row), ListingStatus::Expired);

        row.status = Some("pending".to_string());
        assert_eq!(map_status(&row), ListingStatus::Active);
    }

    #[test]
    fn test_null_flags_are_not_draft() {
        let mut row = item("1");
        row.b_enabled = None;
        row.b_active = None;
        row.b_spam = None;
        assert_eq!(map_status(&row), ListingStatus::Active);
    }

    #[test]
    fn test_options_override_defaults() {
        let opts = TransformOptions {
            default_user_id: "admin".to_string(),
            default_currency: "USD".to_string(),
            default_location: "Unknown".to_string(),
            ..TransformOptions::default()
        };
        let mut row = item("14");
        row.fk_i_user_id = None;
        let doc = transform_listing(&row, &[], &opts);
        assert_eq!(doc.user_id, "admin");
        assert_eq!(doc.currency_code, "USD");
        assert_eq!(doc.location, "Unknown");
    }
}
