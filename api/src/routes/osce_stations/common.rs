use db::models::osce_station::{FollowUp, MarkingSchemeSection, Model as OsceStation};
use serde::Serialize;

/// Station shape returned by every `/osce-stations` endpoint.
#[derive(Debug, Serialize, Default)]
pub struct StationResponse {
    pub id: i64,
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
    pub status: String,
    pub rejection_reason: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<OsceStation> for StationResponse {
    fn from(station: OsceStation) -> Self {
        Self {
            id: station.id,
            writer_id: station.writer_id,
            title: station.title,
            category: station.category,
            subject: station.subject,
            topic: station.topic,
            case_description: station.case_description,
            images: station.images.0,
            marking_scheme: station.marking_scheme.0,
            follow_ups: station.follow_ups.0,
            total_marks: station.total_marks,
            status: station.status.to_string(),
            rejection_reason: station.rejection_reason,
            created_at: station.created_at.to_rfc3339(),
            updated_at: station.updated_at.to_rfc3339(),
        }
    }
}
