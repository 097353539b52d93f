use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Fromln, AsRefln, Serialize, Deserialize)]
pub struct CustomerIncome(Decimal);

impl CustomerIncome {
    pub fn new(income: impl Into<Decimal>) -> Self {
        Self(income.into())
    }
}
