//! Live endpoint response bodies.

use serde::Serialize;

use crate::domain::lottery::Snapshot;

#[derive(Debug, Clone, Serialize)]
pub struct UpdateResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub data: Snapshot,
}

impl UpdateResponse {
    pub fn accepted(data: Snapshot) -> Self {
        Self {
            status: "success",
            message: "Lottery data updated successfully",
            data,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CurrentResponse {
    pub status: &'static str,
    pub data: Snapshot,
}

impl CurrentResponse {
    pub fn new(data: Snapshot) -> Self {
        Self {
            status: "success",
            data,
        }
    }
}
