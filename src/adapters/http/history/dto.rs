//! History endpoint response bodies.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CheckHistoryResponse {
    pub success: bool,
    pub message: &'static str,
    pub date: String,
}

impl CheckHistoryResponse {
    pub fn checked(date: String) -> Self {
        Self {
            success: true,
            message: "History checked/inserted successfully",
            date,
        }
    }
}
