//! Handlers for the order board.
//!
//! One GET endpoint serves the board, history, grouped, and statistics
//! views depending on query selectors; one POST endpoint accepts both
//! status changes and new orders, disambiguated by body shape as the
//! board client has always done.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use comanda_db::models::order_item::{ChangeOrderStatus, CreateOrder};
use comanda_db::repositories::PgOrderRepository;

use crate::error::{AppError, AppResult};
use crate::response::MessageResponse;
use crate::services::orders::MODE_BOARD;
use crate::services::{OrderService, UpdateScope};
use crate::state::AppState;

/// Query parameters for the listing endpoint.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// `board` (default) or `history`.
    pub mode: Option<String>,
    /// Any value selects the statistics view.
    pub stats: Option<String>,
    /// `ticket` returns the active items grouped into tickets.
    pub group: Option<String>,
}

/// Inbound POST body: a transition carries `status`, a creation carries
/// `product` + `quantity` without one. Variant order matters: serde tries
/// the transition shape first, and a creation body never matches it
/// because `status` is required there.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OrderCommand {
    StatusChange(ChangeOrderStatus),
    Create(CreateOrder),
}

fn order_service(state: &AppState) -> OrderService<PgOrderRepository> {
    OrderService::new(PgOrderRepository::new(state.pool.clone()))
}

/// GET /orders?mode=&stats=&group=
///
/// `?stats=1` wins over the other selectors, then `?group=ticket`, then
/// the plain mode listing.
pub async fn list_orders(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Response> {
    let service = order_service(&state);

    if params.stats.is_some() {
        let stats = service.statistics().await?;
        return Ok(Json(stats).into_response());
    }

    if params.group.as_deref() == Some("ticket") {
        let tickets = service.board_by_ticket().await?;
        return Ok(Json(tickets).into_response());
    }

    let mode = params.mode.as_deref().unwrap_or(MODE_BOARD);
    let items = service.list_orders(mode).await?;
    Ok(Json(items).into_response())
}

/// POST /orders
///
/// Status change → `{message: "OK", data}`; creation → 201
/// `{message: "Created", data}`.
pub async fn submit_order(
    State(state): State<AppState>,
    payload: Result<Json<OrderCommand>, JsonRejection>,
) -> AppResult<Response> {
    // A body that cannot be parsed still gets the JSON {error} shape,
    // not axum's plain-text rejection.
    let Json(command) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let service = order_service(&state);

    match command {
        OrderCommand::StatusChange(request) => {
            let scope = UpdateScope::from_request(&request);
            let receipt = service
                .change_status(&request.ticket_id, &request.status, scope)
                .await?;
            Ok(Json(MessageResponse {
                message: "OK",
                data: receipt,
            })
            .into_response())
        }
        OrderCommand::Create(request) => {
            let receipt = service.create_order(request).await?;
            Ok((
                StatusCode::CREATED,
                Json(MessageResponse {
                    message: "Created",
                    data: receipt,
                }),
            )
                .into_response())
        }
    }
}
