//! Typed views over decoded legacy rows.
//!
//! Every field is an optional string: the dump is untyped text and any
//! column may be NULL or missing from a given dump.

use crate::dump::DecodedRow;

/// Row of the legacy category table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacyCategoryRow {
    pub pk_i_id: Option<String>,
    pub fk_i_parent_id: Option<String>,
    pub i_expiration_days: Option<String>,
    pub i_position: Option<String>,
    pub b_enabled: Option<String>,
    pub b_price_enabled: Option<String>,
    pub s_icon: Option<String>,
    pub s_color: Option<String>,
}

impl LegacyCategoryRow {
    pub fn from_row(row: &DecodedRow<'_>) -> Self {
        Self {
            pk_i_id: row.get_owned("pk_i_id"),
            fk_i_parent_id: row.get_owned("fk_i_parent_id"),
            i_expiration_days: row.get_owned("i_expiration_days"),
            i_position: row.get_owned("i_position"),
            b_enabled: row.get_owned("b_enabled"),
            b_price_enabled: row.get_owned("b_price_enabled"),
            s_icon: row.get_owned("s_icon"),
            s_color: row.get_owned("s_color"),
        }
    }
}

/// Row of the legacy category description table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacyCategoryDescriptionRow {
    pub fk_i_category_id: Option<String>,
    pub fk_c_locale_code: Option<String>,
    pub s_name: Option<String>,
    pub s_description: Option<String>,
    pub s_slug: Option<String>,
}

impl LegacyCategoryDescriptionRow {
    pub fn from_row(row: &DecodedRow<'_>) -> Self {
        Self {
            fk_i_category_id: row.get_owned("fk_i_category_id"),
            fk_c_locale_code: row.get_owned("fk_c_locale_code"),
            s_name: row.get_owned("s_name"),
            s_description: row.get_owned("s_description"),
            s_slug: row.get_owned("s_slug"),
        }
    }
}

/// Row of the legacy item table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacyItemRow {
    pub pk_i_id: Option<String>,
    pub fk_i_user_id: Option<String>,
    pub fk_i_category_id: Option<String>,
    pub dt_pub_date: Option<String>,
    pub dt_expiration: Option<String>,
    pub f_price: Option<String>,
    pub i_price: Option<String>,
    pub fk_c_currency_code: Option<String>,
    pub s_contact_name: Option<String>,
    pub s_contact_email: Option<String>,
    pub s_contact_phone: Option<String>,
    pub s_contact_other: Option<String>,
    pub s_ip: Option<String>,
    pub b_premium: Option<String>,
    pub b_enabled: Option<String>,
    pub b_active: Option<String>,
    pub b_spam: Option<String>,
    pub status: Option<String>,
    pub listing_type: Option<String>,
}

impl LegacyItemRow {
    pub fn from_row(row: &DecodedRow<'_>) -> Self {
        Self {
            pk_i_id: row.get_owned("pk_i_id"),
            fk_i_user_id: row.get_owned("fk_i_user_id"),
            fk_i_category_id: row.get_owned("fk_i_category_id"),
            dt_pub_date: row.get_owned("dt_pub_date"),
            dt_expiration: row.get_owned("dt_expiration"),
            f_price: row.get_owned("f_price"),
            i_price: row.get_owned("i_price"),
            fk_c_currency_code: row.get_owned("fk_c_currency_code"),
            s_contact_name: row.get_owned("s_contact_name"),
            s_contact_email: row.get_owned("s_contact_email"),
            s_contact_phone: row.get_owned("s_contact_phone"),
            s_contact_other: row.get_owned("s_contact_other"),
            s_ip: row.get_owned("s_ip"),
            b_premium: row.get_owned("b_premium"),
            b_enabled: row.get_owned("b_enabled"),
            b_active: row.get_owned("b_active"),
            b_spam: row.get_owned("b_spam"),
            status: row.get_owned("status"),
            listing_type: row.get_owned("listing_type"),
        }
    }
}

/// Row of the legacy item description table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacyItemDescriptionRow {
    pub fk_i_item_id: Option<String>,
    pub fk_c_locale_code: Option<String>,
    pub s_title: Option<String>,
    pub s_description: Option<String>,
}

impl LegacyItemDescriptionRow {
    pub fn from_row(row: &DecodedRow<'_>) -> Self {
        Self {
            fk_i_item_id: row.get_owned("fk_i_item_id"),
            fk_c_locale_code: row.get_owned("fk_c_locale_code"),
            s_title: row.get_owned("s_title"),
            s_description: row.get_owned("s_description"),
        }
    }
}
