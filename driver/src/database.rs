mod memory;
mod postgres;

pub use self::{memory::*, postgres::*};
