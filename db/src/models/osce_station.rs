//! Entity and scoring document types for OSCE stations.
//!
//! The marking scheme and follow-up questions are stored as JSON documents on
//! the station row; the scoring engine in the `services` crate owns the rules
//! over them (non-negative scores, totals reconciliation).

use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::review_status::ReviewStatus;

/// A single scorable line inside a marking scheme section.
///
/// A missing `score` in the incoming JSON deserializes to 0; negative and
/// non-finite values are rejected by validation, not here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkItem {
    pub desc: String,
    #[serde(default)]
    pub score: f64,
}

/// A named section of the marking scheme. Section names are free-form and
/// uniqueness is not enforced.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkingSchemeSection {
    pub section: String,
    #[serde(default)]
    pub items: Vec<MarkItem>,
}

/// An auxiliary question scored independently of the marking scheme.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FollowUp {
    pub question: String,
    #[serde(default)]
    pub answers: Vec<String>,
    #[serde(default)]
    pub score: f64,
}

/// JSON column wrapper for the ordered marking scheme sections.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct MarkingScheme(pub Vec<MarkingSchemeSection>);

/// JSON column wrapper for the follow-up questions.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct FollowUpList(pub Vec<FollowUp>);

/// JSON column wrapper for the station's image paths.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct ImageList(pub Vec<String>);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "osce_stations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Owning writer.
    pub writer_id: i64,

    pub title: String,
    pub category: String,
    pub subject: String,
    pub topic: String,
    pub case_description: String,

    #[sea_orm(column_type = "Json")]
    pub images: ImageList,

    #[sea_orm(column_type = "Json")]
    pub marking_scheme: MarkingScheme,

    #[sea_orm(column_type = "Json")]
    pub follow_ups: FollowUpList,

    /// Always the computed sum of item and follow-up scores.
    pub total_marks: f64,

    pub status: ReviewStatus,

    /// Present only while the station is rejected.
    pub rejection_reason: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::WriterId",
        to = "super::user::Column::Id"
    )]
    Writer,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Writer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Descriptive and scoring content supplied at creation time.
#[derive(Clone, Debug)]
pub struct NewOsceStation {
    pub writer_id: i64,
    pub title: String,
    pub category: String,
    pub subject: String,
    pub topic: String,
    pub case_description: String,
    pub images: Vec<String>,
    pub marking_scheme: Vec<MarkingSchemeSection>,
    pub follow_ups: Vec<FollowUp>,
    pub total_marks: f64,
    pub status: ReviewStatus,
}

impl Model {
    pub async fn create(db: &DbConn, station: NewOsceStation) -> Result<Model, DbErr> {
        let now = Utc::now();

        let active_model = ActiveModel {
            writer_id: Set(station.writer_id),
            title: Set(station.title),
            category: Set(station.category),
            subject: Set(station.subject),
            topic: Set(station.topic),
            case_description: Set(station.case_description),
            images: Set(ImageList(station.images)),
            marking_scheme: Set(MarkingScheme(station.marking_scheme)),
            follow_ups: Set(FollowUpList(station.follow_ups)),
            total_marks: Set(station.total_marks),
            status: Set(station.status),
            rejection_reason: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        active_model.insert(db).await
    }

    pub async fn delete_by_id(db: &DbConn, id: i64) -> Result<bool, DbErr> {
        let result = Entity::delete_by_id(id).exec(db).await?;
        Ok(result.rows_affected > 0)
    }
}
