use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Fromln, AsRefln, Serialize, Deserialize)]
pub struct CreditValue(Decimal);

impl CreditValue {
    pub fn new(value: impl Into<Decimal>) -> Self {
        Self(value.into())
    }
}
