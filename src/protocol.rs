//! Public HTTP response DTOs (serde ready) that are not domain documents.
//! Questions themselves go over the wire as `domain::Question`.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthOut {
    pub ok: bool,
    pub store: &'static str,
    pub ready: bool,
}

#[derive(Debug, Serialize)]
pub struct ErrorOut {
    pub error: &'static str,
    pub message: String,
}
