use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Health {
    pub status: String,
    pub service: String,
    pub version: String,
}

impl Health {
    pub fn ok() -> Self {
        Self { status: "ok".into(), service: "inventory".into(), version: env!("CARGO_PKG_VERSION").into() }
    }
}
