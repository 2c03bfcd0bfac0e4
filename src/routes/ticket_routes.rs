use axum::{
    extract::rejection::JsonRejection,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::announcer::messages;
use crate::models::ticket::{
    CreateTicketRequest, Ticket, TicketStats, TicketStatus, UpdateTicketStatusRequest,
};
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

pub fn create_ticket_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_tickets).post(create_ticket))
        .route("/active", get(get_active_tickets))
        .route("/stats", get(get_ticket_stats))
        .route("/search", get(search_tickets))
        .route("/:id", get(get_ticket))
        .route("/:id/status", patch(update_ticket_status))
        .route("/:id/announce", post(announce_ticket))
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    q: Option<String>,
}

// Los ids viajan como texto opaco: un id que no parsea a UUID se trata
// como desconocido (404), no como request malformado.
fn parse_ticket_id(id: &str) -> AppResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| AppError::NotFound("Ticket not found".to_string()))
}

/// Obtener todos los tickets, el más reciente primero
async fn get_tickets(State(state): State<AppState>) -> AppResult<Json<Vec<Ticket>>> {
    Ok(Json(state.store.list_all().await))
}

/// Obtener los tickets aún en servicio (cola FIFO)
async fn get_active_tickets(State(state): State<AppState>) -> AppResult<Json<Vec<Ticket>>> {
    Ok(Json(state.store.list_active().await))
}

/// Conteo de tickets por estado
async fn get_ticket_stats(State(state): State<AppState>) -> AppResult<Json<TicketStats>> {
    Ok(Json(state.store.stats().await))
}

/// Buscar tickets por folio, placas o nombre del cliente
async fn search_tickets(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<Ticket>>> {
    // Un q vacío cuenta como ausente
    let query = params
        .q
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::BadRequest("Query parameter 'q' is required".to_string()))?;

    Ok(Json(state.store.search(&query).await))
}

/// Obtener un ticket por id
async fn get_ticket(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Ticket>> {
    let id = parse_ticket_id(&id)?;
    let ticket = state
        .store
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound("Ticket not found".to_string()))?;

    Ok(Json(ticket))
}

/// Registrar un vehículo nuevo
async fn create_ticket(
    State(state): State<AppState>,
    payload: Result<Json<CreateTicketRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Ticket>)> {
    // Cuerpo malformado o campos faltantes responden 400, no 422
    let Json(request) = payload
        .map_err(|rejection| AppError::BadRequest(format!("Invalid data: {}", rejection.body_text())))?;

    request.validate().map_err(AppError::Validation)?;

    let ticket = state.store.create(request).await?;
    Ok((StatusCode::CREATED, Json(ticket)))
}

/// Cambiar el estado de un ticket
async fn update_ticket_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTicketStatusRequest>, JsonRejection>,
) -> AppResult<Json<Ticket>> {
    let Json(request) = payload
        .map_err(|rejection| AppError::BadRequest(format!("Invalid status: {}", rejection.body_text())))?;

    let status = TicketStatus::parse(&request.status).ok_or_else(|| {
        AppError::BadRequest(format!("Invalid status value: '{}'", request.status))
    })?;

    let id = parse_ticket_id(&id)?;
    let ticket = state.store.update_status(id, status).await?;
    Ok(Json(ticket))
}

/// Anunciar un ticket por voz de inmediato, sin esperar al sondeo
async fn announce_ticket(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let id = parse_ticket_id(&id)?;
    let ticket = state
        .store
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound("Ticket not found".to_string()))?;

    if let Some(announcer) = state.announcer.clone() {
        let message = messages::ready_announcement(&ticket, state.language());
        log::info!(
            "📢 Anuncio manual del ticket {} (placas {})",
            ticket.ticket_number,
            ticket.license_plate
        );
        tokio::spawn(async move {
            announcer.announce(&message);
        });
    } else {
        log::info!(
            "🔇 Anuncio manual del ticket {} sin salida de voz",
            ticket.ticket_number
        );
    }

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Announcement scheduled"
    })))
}
