mod credit;
mod customer;

pub use self::{credit::*, customer::*};

use axum::Router;

use crate::handler::{AppModule, Services};

/// Full HTTP surface bound to the given module.
pub fn router<D: Services>(module: AppModule<D>) -> Router {
    Router::<AppModule<D>>::new()
        .route_customer()
        .route_credit()
        .with_state(module)
}
