//! Category mapping.

use super::convert::{key_text, parent_key, parse_flag, parse_int_or_zero, present_owned};
use super::document::TargetCategoryDocument;
use super::legacy::{LegacyCategoryDescriptionRow, LegacyCategoryRow};

/// Map a legacy category, joined with its description, to a target document.
///
/// The description is the first one whose category key equals the
/// category's primary key. Without one, name and slug are synthesised
/// from the id.
pub fn transform_category(
    category: &LegacyCategoryRow,
    descriptions: &[LegacyCategoryDescriptionRow],
) -> TargetCategoryDocument {
    let id = key_text(category.pk_i_id.as_deref()).unwrap_or_default();
    let description = descriptions.iter().find(|d| {
        key_text(d.fk_i_category_id.as_deref()).is_some_and(|fk| fk == id)
    });

    let name = description
        .and_then(|d| present_owned(d.s_name.as_deref()))
        .unwrap_or_else(|| format!("Category {}", id));
    let slug = description
        .and_then(|d| present_owned(d.s_slug.as_deref()))
        .unwrap_or_else(|| format!("category-{}", id));

    TargetCategoryDocument {
        parent_id: parent_key(category.fk_i_parent_id.as_deref()),
        name,
        slug,
        description: description.and_then(|d| d.s_description.clone()),
        icon: category.s_icon.clone(),
        color: category.s_color.clone(),
        position: parse_int_or_zero(category.i_position.as_deref()),
        is_enabled: parse_flag(category.b_enabled.as_deref()),
        price_enabled: parse_flag(category.b_price_enabled.as_deref()),
        expiration_days: parse_int_or_zero(category.i_expiration_days.as_deref()),
        id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: &str, parent: Option<&str>) -> LegacyCategoryRow {
        LegacyCategoryRow {
            pk_i_id: Some(id.to_string()),
            fk_i_parent_id: parent.map(str::to_string),
            i_expiration_days: Some("30".to_string()),
            i_position: Some("2".to_string()),
            b_enabled: Some("t".to_string()),
            b_price_enabled: Some("f".to_string()),
            s_icon: None,
            s_color: Some("#00ff00".to_string()),
        }
    }

    fn description(fk: &str, name: &str, slug: &str) -> LegacyCategoryDescriptionRow {
        LegacyCategoryDescriptionRow {
            fk_i_category_id: Some(fk.to_string()),
            fk_c_locale_code: Some("en_US".to_string()),
            s_name: Some(name.to_string()),
            s_description: Some(format!("{} listings", name)),
            s_slug: Some(slug.to_string()),
        }
    }

    #[test]
    fn test_with_matching_description() {
        let descriptions = vec![
            description("2", "Houses", "houses"),
            description("1", "Land", "land"),
        ];
        let doc = transform_category(&category("1", None), &descriptions);
        assert_eq!(doc.id, "1");
        assert_eq!(doc.parent_id, None);
        assert_eq!(doc.name, "Land");
        assert_eq!(doc.slug, "land");
        assert_eq!(doc.description.as_deref(), Some("Land listings"));
        assert_eq!(doc.position, 2);
        assert!(doc.is_enabled);
        assert!(!doc.price_enabled);
        assert_eq!(doc.expiration_days, 30);
        assert_eq!(doc.color.as_deref(), Some("#00ff00"));
    }

    #[test]
    fn test_fallback_without_description() {
        let doc = transform_category(&category("7", Some("1")), &[]);
        assert_eq!(doc.name, "Category 7");
        assert_eq!(doc.slug, "category-7");
        assert_eq!(doc.description, None);
        assert_eq!(doc.parent_id.as_deref(), Some("1"));
    }

    #[test]
    fn test_zero_parent_is_root() {
        let doc = transform_category(&category("3", Some("0")), &[]);
        assert_eq!(doc.parent_id, None);
    }

    #[test]
    fn test_malformed_numbers_default_to_zero() {
        let mut row = category("4", None);
        row.i_position = Some("first".to_string());
        row.i_expiration_days = None;
        let doc = transform_category(&row, &[]);
        assert_eq!(doc.position, 0);
        assert_eq!(doc.expiration_days, 0);
    }

    #[test]
    fn test_is_deterministic() {
        let descriptions = vec![description("5", "Rentals", "rentals")];
        let row = category("5", Some("2"));
        let a = serde_json::to_vec(&transform_category(&row, &descriptions)).unwrap();
        let b = serde_json::to_vec(&transform_category(&row, &descriptions)).unwrap();
        assert_eq!(a, b);
    }
}
