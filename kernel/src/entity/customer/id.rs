use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct CustomerId(i64);

impl CustomerId {
    pub fn new(id: impl Into<i64>) -> Self {
        Self(id.into())
    }
}
