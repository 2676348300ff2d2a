use sea_orm::DeriveActiveEnum;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Review lifecycle shared by SBA submissions and OSCE stations.
///
/// Stored as lowercase text; parsing is case-insensitive so status filters
/// and admin-supplied values round-trip regardless of casing.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "review_status")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ReviewStatus {
    /// Private to the writer; not yet submitted for review.
    #[sea_orm(string_value = "draft")]
    Draft,

    /// Submitted and waiting for an admin decision.
    #[sea_orm(string_value = "pending")]
    Pending,

    /// Accepted into the question bank.
    #[sea_orm(string_value = "approved")]
    Approved,

    /// Sent back to the writer with a rejection reason.
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(ReviewStatus::from_str("pending"), Ok(ReviewStatus::Pending));
        assert_eq!(ReviewStatus::from_str("Rejected"), Ok(ReviewStatus::Rejected));
        assert_eq!(ReviewStatus::from_str("DRAFT"), Ok(ReviewStatus::Draft));
        assert!(ReviewStatus::from_str("archived").is_err());
    }

    #[test]
    fn displays_lowercase() {
        assert_eq!(ReviewStatus::Approved.to_string(), "approved");
    }
}
