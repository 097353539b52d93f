use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Brazilian CPF number as its eleven digits, without punctuation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct CustomerNationalId(String);

impl CustomerNationalId {
    pub fn new(national_id: impl Into<String>) -> Self {
        Self(national_id.into())
    }
}
