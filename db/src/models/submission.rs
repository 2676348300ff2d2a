use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::review_status::ReviewStatus;

/// JSON column wrapper for the answer options of an SBA question.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct AnswerOptions(pub Vec<String>);

/// A single-best-answer question submitted by a writer.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Owning writer.
    pub writer_id: i64,

    pub question: String,

    #[sea_orm(column_type = "Json")]
    pub options: AnswerOptions,

    /// Index into `options` of the correct answer.
    pub correct_option: i32,

    pub explanation: String,
    pub category: String,
    pub subject: String,
    pub topic: String,

    pub status: ReviewStatus,

    /// Present only while the submission is rejected.
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

/// Content supplied at creation time.
#[derive(Clone, Debug)]
pub struct NewSubmission {
    pub writer_id: i64,
    pub question: String,
    pub options: Vec<String>,
    pub correct_option: i32,
    pub explanation: String,
    pub category: String,
    pub subject: String,
    pub topic: String,
    pub status: ReviewStatus,
}

impl Model {
    pub async fn create(db: &DbConn, submission: NewSubmission) -> Result<Model, DbErr> {
        let now = Utc::now();

        let active_model = ActiveModel {
            writer_id: Set(submission.writer_id),
            question: Set(submission.question),
            options: Set(AnswerOptions(submission.options)),
            correct_option: Set(submission.correct_option),
            explanation: Set(submission.explanation),
            category: Set(submission.category),
            subject: Set(submission.subject),
            topic: Set(submission.topic),
            status: Set(submission.status),
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
