use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vodca::{AsRefln, Fromln};

/// Public, shareable identifier of a credit. Never changes once assigned.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct CreditCode(Uuid);

impl CreditCode {
    pub fn new(code: impl Into<Uuid>) -> Self {
        Self(code.into())
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}
