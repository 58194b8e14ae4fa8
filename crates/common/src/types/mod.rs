use serde::{Deserialize, Serialize};

/// Body of `GET /health`.
#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}
