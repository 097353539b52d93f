use destructure::Destructure;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln, References};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct ZipCode(String);

impl ZipCode {
    pub fn new(zip_code: impl Into<String>) -> Self {
        Self(zip_code.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct Street(String);

impl Street {
    pub fn new(street: impl Into<String>) -> Self {
        Self(street.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, References, Destructure)]
pub struct Address {
    zip_code: ZipCode,
    street: Street,
}

impl Address {
    pub fn new(zip_code: ZipCode, street: Street) -> Self {
        Self { zip_code, street }
    }
}
