//! DTOs for submissions_sea adapter.

/// Row payload for a submission; `picks` are the serialized pick strings.
#[derive(Debug, Clone)]
pub struct SubmissionCreate {
    pub round_id: i64,
    pub participant_id: i64,
    pub display_name: String,
    pub handle: Option<String>,
    pub picks: Vec<String>,
}
