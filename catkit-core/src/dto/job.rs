//! Job submission DTOs

use crate::poll::JobHandle;
use serde::Deserialize;

/// Acknowledgement of an asynchronous submission.
///
/// Different endpoints name the handle field differently (`job_id` for bulk
/// metadata jobs, `id` elsewhere); both deserialize into the same handle.
#[derive(Debug, Clone, Deserialize)]
pub struct JobSubmitted {
    #[serde(alias = "id")]
    pub job_id: JobHandle,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accepts_job_id_field() {
        let ack: JobSubmitted = serde_json::from_value(json!({"job_id": 1234})).unwrap();
        assert_eq!(ack.job_id.as_str(), "1234");
    }

    #[test]
    fn test_accepts_id_alias() {
        let ack: JobSubmitted = serde_json::from_value(json!({"id": "task-9"})).unwrap();
        assert_eq!(ack.job_id.as_str(), "task-9");
    }

    #[test]
    fn test_rejects_missing_handle() {
        assert!(serde_json::from_value::<JobSubmitted>(json!({"ok": true})).is_err());
    }
}
