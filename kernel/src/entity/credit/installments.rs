use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Fromln, AsRefln, Serialize, Deserialize)]
pub struct CreditInstallments(i32);

impl CreditInstallments {
    pub const MIN: i32 = 1;
    pub const MAX: i32 = 48;

    pub fn new(installments: impl Into<i32>) -> Self {
        Self(installments.into())
    }
}
