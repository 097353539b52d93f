use application::service::{CreateCreditService, GetCreditService, GetCreditsService};
use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use uuid::Uuid;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::{AppModule, Services};
use crate::request::{CreateCreditRequest, CreditTransformer, CustomerIdQuery};
use crate::response::CreditPresenter;

pub trait CreditRouter {
    fn route_credit(self) -> Self;
}

impl<D: Services> CreditRouter for Router<AppModule<D>> {
    fn route_credit(self) -> Self {
        self.route(
            "/api/credits",
            post(
                |State(handler): State<AppModule<D>>,
                 Json(req): Json<CreateCreditRequest>| async move {
                    Controller::new(CreditTransformer, CreditPresenter)
                        .intake(req)
                        .handle(|dto| handler.database().create_credit(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .get(
                |State(handler): State<AppModule<D>>,
                 Query(query): Query<CustomerIdQuery>| async move {
                    Controller::new(CreditTransformer, CreditPresenter)
                        .intake(query.customer_id)
                        .handle(|dto| handler.database().get_credits(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/api/credits/:credit_code",
            get(
                |State(handler): State<AppModule<D>>,
                 Path(credit_code): Path<Uuid>,
                 Query(query): Query<CustomerIdQuery>| async move {
                    Controller::new(CreditTransformer, CreditPresenter)
                        .intake((query.customer_id, credit_code))
                        .handle(|dto| handler.database().get_credit(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
