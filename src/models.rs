use crate::routes::Id;
use serde::{Deserialize, Serialize};

/// Envelope every backend action answers with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct ConnectRequest<'a> {
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct AddCategoryRequest {
    pub name: String,
    pub properties: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AddDocumentRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct AddElementRequest {
    pub category: Id,
}

#[derive(Debug, Serialize)]
pub struct AddDescriptionRequest {
    pub document: Id,
    pub element: Id,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct AddOrderRequest {
    pub document: Id,
    pub large: Id,
    pub small: Id,
}

#[derive(Debug, Serialize)]
pub struct AddOrderRuleRequest {
    pub large: Id,
    pub small: Id,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeRequest {}

/// On-disk cookie jar.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SessionRecord {
    pub password: Option<String>,
    pub connected_at: Option<String>,
}
