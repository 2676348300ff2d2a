use db::models::penalty::Model as Penalty;
use serde::Serialize;

/// Penalty shape returned by every `/penalties` endpoint.
#[derive(Debug, Serialize, Default)]
pub struct PenaltyResponse {
    pub id: i64,
    pub writer_id: i64,
    pub reason: String,
    pub amount: f64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Penalty> for PenaltyResponse {
    fn from(penalty: Penalty) -> Self {
        Self {
            id: penalty.id,
            writer_id: penalty.writer_id,
            reason: penalty.reason,
            amount: penalty.amount,
            created_at: penalty.created_at.to_rfc3339(),
            updated_at: penalty.updated_at.to_rfc3339(),
        }
    }
}
