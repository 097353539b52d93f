use application::service::{
    CreateCustomerService, DeleteCustomerService, GetCustomerService, UpdateCustomerService,
};
use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::{AppModule, Services};
use crate::request::{
    CreateCustomerRequest, CustomerIdQuery, CustomerTransformer, DeleteCustomerTransformer,
    GetCustomerTransformer, UpdateCustomerRequest,
};
use crate::response::{CreatedCustomerPresenter, CustomerPresenter, DeletedCustomerPresenter};

pub trait CustomerRouter {
    fn route_customer(self) -> Self;
}

impl<D: Services> CustomerRouter for Router<AppModule<D>> {
    fn route_customer(self) -> Self {
        self.route(
            "/api/customers",
            post(
                |State(handler): State<AppModule<D>>,
                 Json(req): Json<CreateCustomerRequest>| async move {
                    Controller::new(CustomerTransformer, CreatedCustomerPresenter)
                        .intake(req)
                        .handle(|dto| handler.database().create_customer(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .patch(
                |State(handler): State<AppModule<D>>,
                 Query(query): Query<CustomerIdQuery>,
                 Json(req): Json<UpdateCustomerRequest>| async move {
                    Controller::new(CustomerTransformer, CustomerPresenter)
                        .intake((query.customer_id, req))
                        .handle(|dto| handler.database().update_customer(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/api/customers/:id",
            get(
                |State(handler): State<AppModule<D>>, Path(id): Path<i64>| async move {
                    Controller::new(GetCustomerTransformer, CustomerPresenter)
                        .intake(id)
                        .handle(|dto| handler.database().get_customer(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .delete(
                |State(handler): State<AppModule<D>>, Path(id): Path<i64>| async move {
                    Controller::new(DeleteCustomerTransformer, DeletedCustomerPresenter)
                        .intake(id)
                        .handle(|dto| handler.database().delete_customer(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
