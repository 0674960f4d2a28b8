//! Stub document domain types

use serde::{Deserialize, Serialize};

/// One document creation entry in a bulk request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDocument {
    pub title: String,
    pub document_hub_id: u64,
    pub template_id: u64,
    pub parent_folder_id: u64,
    pub nav_link_folder_ids: Vec<u64>,
}

/// Parameters for a batch of placeholder documents.
///
/// Stub documents are created empty and filled in later; the batch expands
/// into `count` entries sharing the same hub, template, and folder wiring.
#[derive(Debug, Clone)]
pub struct StubBatch {
    pub document_hub_id: u64,
    pub template_id: u64,
    pub parent_folder_id: u64,
    pub nav_link_folder_ids: Vec<u64>,
    pub count: u32,
}

impl StubBatch {
    /// Expands the batch into the request payload, numbering each title.
    pub fn to_documents(&self) -> Vec<CreateDocument> {
        (1..=self.count)
            .map(|i| CreateDocument {
                title: format!("Stub Document ({} of {})", i, self.count),
                document_hub_id: self.document_hub_id,
                template_id: self.template_id,
                parent_folder_id: self.parent_folder_id,
                nav_link_folder_ids: self.nav_link_folder_ids.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(count: u32) -> StubBatch {
        StubBatch {
            document_hub_id: 7,
            template_id: 72,
            parent_folder_id: 57,
            nav_link_folder_ids: vec![58, 59],
            count,
        }
    }

    #[test]
    fn test_batch_expansion() {
        let docs = batch(3).to_documents();
        assert_eq!(docs.len(), 3);
        assert_eq!(docs[0].title, "Stub Document (1 of 3)");
        assert_eq!(docs[2].title, "Stub Document (3 of 3)");
        assert_eq!(docs[1].nav_link_folder_ids, vec![58, 59]);
    }

    #[test]
    fn test_batch_payload_shape() {
        let payload = serde_json::to_value(batch(1).to_documents()).unwrap();
        assert_eq!(
            payload[0]["title"],
            serde_json::json!("Stub Document (1 of 1)")
        );
        assert_eq!(payload[0]["document_hub_id"], serde_json::json!(7));
    }
}
