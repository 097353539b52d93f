mod credit;
mod customer;

pub use self::{credit::*, customer::*};
