use crate::diff::DiffResult;
use crate::session::CompareError;

/// Messages sent to the comparison thread
pub enum WorkerMessage {
    Compare(CompareRequest),
    /// Stop the comparison thread
    Stop,
}

pub struct CompareRequest {
    pub generation: u64,
    pub source: String,
    pub target: String,
}

/// Response from the comparison thread, tagged with the request generation
pub struct CompareResponse {
    pub generation: u64,
    pub outcome: Result<DiffResult, CompareError>,
}
