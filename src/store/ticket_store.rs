//! Store de tickets en memoria
//!
//! Dueño único de los registros: toda lectura y escritura pasa por
//! aquí. El RwLock serializa el check de placa duplicada con el insert,
//! y el contador de folios vive bajo el mismo lock para que los números
//! nunca choquen.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::ticket::{CreateTicketRequest, Ticket, TicketStats, TicketStatus};
use crate::store::transition;
use crate::utils::errors::{AppError, AppResult};

/// Repositorio en memoria de tickets del taller
///
/// Clonar el store solo clona el handle; todos los clones comparten la
/// misma colección.
#[derive(Clone)]
pub struct TicketStore {
    inner: Arc<RwLock<StoreInner>>,
}

struct StoreInner {
    tickets: HashMap<Uuid, Ticket>,
    ticket_counter: u64,
}

impl TicketStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(StoreInner {
                tickets: HashMap::new(),
                ticket_counter: 1,
            })),
        }
    }

    /// Registrar un vehículo nuevo
    ///
    /// Rechaza la placa si otro ticket ya la tiene (sin distinguir
    /// mayúsculas). El folio y los timestamps los pone el store.
    pub async fn create(&self, request: CreateTicketRequest) -> AppResult<Ticket> {
        let mut inner = self.inner.write().await;

        let plate_lower = request.license_plate.to_lowercase();
        if inner
            .tickets
            .values()
            .any(|ticket| ticket.license_plate.to_lowercase() == plate_lower)
        {
            return Err(AppError::DuplicatePlate(request.license_plate));
        }

        let ticket_number = inner.next_ticket_number();
        let now = Utc::now();
        let ticket = Ticket {
            id: Uuid::new_v4(),
            ticket_number,
            license_plate: request.license_plate,
            vehicle_make: request.vehicle_make,
            vehicle_model: request.vehicle_model,
            vehicle_year: request.vehicle_year,
            vehicle_color: request.vehicle_color,
            mileage: request.mileage,
            customer_name: request.customer_name,
            customer_phone: request.customer_phone,
            customer_email: request.customer_email,
            emergency_contact: request.emergency_contact,
            service_description: request.service_description,
            status: request.status.unwrap_or(TicketStatus::Registered),
            created_at: now,
            updated_at: now,
        };

        log::info!(
            "🎫 Ticket {} creado para placas {} ({})",
            ticket.ticket_number,
            ticket.license_plate,
            ticket.customer_name
        );

        inner.tickets.insert(ticket.id, ticket.clone());
        Ok(ticket)
    }

    pub async fn get(&self, id: Uuid) -> Option<Ticket> {
        self.inner.read().await.tickets.get(&id).cloned()
    }

    pub async fn get_by_number(&self, ticket_number: &str) -> Option<Ticket> {
        self.inner
            .read()
            .await
            .tickets
            .values()
            .find(|ticket| ticket.ticket_number == ticket_number)
            .cloned()
    }

    /// Buscar por placas, sin distinguir mayúsculas
    pub async fn get_by_license_plate(&self, license_plate: &str) -> Option<Ticket> {
        let plate_lower = license_plate.to_lowercase();
        self.inner
            .read()
            .await
            .tickets
            .values()
            .find(|ticket| ticket.license_plate.to_lowercase() == plate_lower)
            .cloned()
    }

    /// Todos los tickets, el más reciente primero
    pub async fn list_all(&self) -> Vec<Ticket> {
        let inner = self.inner.read().await;
        let mut tickets: Vec<Ticket> = inner.tickets.values().cloned().collect();
        tickets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        tickets
    }

    /// Tickets aún en servicio, el más antiguo primero (cola FIFO)
    pub async fn list_active(&self) -> Vec<Ticket> {
        let inner = self.inner.read().await;
        let mut tickets: Vec<Ticket> = inner
            .tickets
            .values()
            .filter(|ticket| ticket.status != TicketStatus::Ready)
            .cloned()
            .collect();
        tickets.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        tickets
    }

    /// Búsqueda por subcadena sobre folio, placas o nombre del cliente
    pub async fn search(&self, query: &str) -> Vec<Ticket> {
        let query_lower = query.to_lowercase();
        self.inner
            .read()
            .await
            .tickets
            .values()
            .filter(|ticket| {
                ticket.ticket_number.to_lowercase().contains(&query_lower)
                    || ticket.license_plate.to_lowercase().contains(&query_lower)
                    || ticket.customer_name.to_lowercase().contains(&query_lower)
            })
            .cloned()
            .collect()
    }

    /// Cambiar el estado de un ticket
    ///
    /// Solo toca status y updatedAt; el resto del registro queda igual.
    pub async fn update_status(&self, id: Uuid, status: TicketStatus) -> AppResult<Ticket> {
        let mut inner = self.inner.write().await;
        let ticket = inner
            .tickets
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound("Ticket not found".to_string()))?;

        if !transition::is_allowed(ticket.status, status) {
            return Err(AppError::BadRequest(format!(
                "Cannot change status from '{}' to '{}'",
                ticket.status, status
            )));
        }

        ticket.status = status;
        ticket.updated_at = Utc::now();

        log::info!("🔧 Ticket {} → {}", ticket.ticket_number, ticket.status);
        Ok(ticket.clone())
    }

    /// Conteo por estado, con las 5 claves aunque valgan cero
    pub async fn stats(&self) -> TicketStats {
        let inner = self.inner.read().await;
        let mut stats = TicketStats {
            registered: 0,
            diagnosis: 0,
            repair: 0,
            quality: 0,
            ready: 0,
        };
        for ticket in inner.tickets.values() {
            match ticket.status {
                TicketStatus::Registered => stats.registered += 1,
                TicketStatus::Diagnosis => stats.diagnosis += 1,
                TicketStatus::Repair => stats.repair += 1,
                TicketStatus::Quality => stats.quality += 1,
                TicketStatus::Ready => stats.ready += 1,
            }
        }
        stats
    }
}

impl Default for TicketStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreInner {
    /// Folio secuencial: T001, T002, ... T999, T1000, ...
    fn next_ticket_number(&mut self) -> String {
        let number = format!("T{:03}", self.ticket_counter);
        self.ticket_counter += 1;
        number
    }
}
