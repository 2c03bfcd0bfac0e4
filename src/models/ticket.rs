//! Modelo de Ticket
//!
//! Este módulo contiene el struct Ticket del taller y sus variantes para
//! las operaciones de la API. Los campos serializan en camelCase porque
//! el front-end los consume tal cual.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::utils::validation::validate_not_empty;

/// Estado del ticket - las 5 etapas del flujo del taller
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    Registered,
    Diagnosis,
    Repair,
    Quality,
    Ready,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 5] = [
        TicketStatus::Registered,
        TicketStatus::Diagnosis,
        TicketStatus::Repair,
        TicketStatus::Quality,
        TicketStatus::Ready,
    ];

    /// Parsear el valor textual que manda el cliente
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "registered" => Some(TicketStatus::Registered),
            "diagnosis" => Some(TicketStatus::Diagnosis),
            "repair" => Some(TicketStatus::Repair),
            "quality" => Some(TicketStatus::Quality),
            "ready" => Some(TicketStatus::Ready),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Registered => "registered",
            TicketStatus::Diagnosis => "diagnosis",
            TicketStatus::Repair => "repair",
            TicketStatus::Quality => "quality",
            TicketStatus::Ready => "ready",
        }
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ticket principal - un vehículo en servicio con los datos de su cliente
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: Uuid,
    pub ticket_number: String,
    pub license_plate: String,
    pub vehicle_make: Option<String>,
    pub vehicle_model: Option<String>,
    pub vehicle_year: Option<String>,
    pub vehicle_color: Option<String>,
    pub mileage: Option<String>,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub emergency_contact: Option<String>,
    pub service_description: Option<String>,
    pub status: TicketStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request para registrar un vehículo nuevo
///
/// id, ticketNumber y timestamps los asigna el store; el cliente
/// nunca los manda.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicketRequest {
    #[validate(custom = "validate_not_empty")]
    pub license_plate: String,

    pub vehicle_make: Option<String>,
    pub vehicle_model: Option<String>,
    pub vehicle_year: Option<String>,
    pub vehicle_color: Option<String>,
    pub mileage: Option<String>,

    #[validate(custom = "validate_not_empty")]
    pub customer_name: String,

    #[validate(custom = "validate_not_empty")]
    pub customer_phone: String,

    pub customer_email: Option<String>,
    pub emergency_contact: Option<String>,
    pub service_description: Option<String>,

    /// Estado inicial opcional; si falta arranca en registered
    pub status: Option<TicketStatus>,
}

/// Request para cambiar el estado de un ticket
///
/// El estado llega como texto y se parsea a mano para responder 400
/// ante valores desconocidos.
#[derive(Debug, Deserialize)]
pub struct UpdateTicketStatusRequest {
    pub status: String,
}

/// Conteo de tickets por estado - siempre con las 5 claves
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TicketStats {
    pub registered: usize,
    pub diagnosis: usize,
    pub repair: usize,
    pub quality: usize,
    pub ready: usize,
}

impl TicketStats {
    pub fn total(&self) -> usize {
        self.registered + self.diagnosis + self.repair + self.quality + self.ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_roundtrip() {
        for status in TicketStatus::ALL {
            assert_eq!(TicketStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(TicketStatus::parse("delivered"), None);
        assert_eq!(TicketStatus::parse("Ready"), None);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let value = serde_json::to_value(TicketStatus::Quality).unwrap();
        assert_eq!(value, serde_json::json!("quality"));
    }

    #[test]
    fn test_ticket_serializes_camel_case() {
        let ticket = Ticket {
            id: Uuid::new_v4(),
            ticket_number: "T001".to_string(),
            license_plate: "ABC-123".to_string(),
            vehicle_make: None,
            vehicle_model: None,
            vehicle_year: None,
            vehicle_color: None,
            mileage: None,
            customer_name: "Jane Doe".to_string(),
            customer_phone: "555-0100".to_string(),
            customer_email: None,
            emergency_contact: None,
            service_description: None,
            status: TicketStatus::Registered,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let value = serde_json::to_value(&ticket).unwrap();
        assert_eq!(value["ticketNumber"], "T001");
        assert_eq!(value["licensePlate"], "ABC-123");
        assert_eq!(value["customerName"], "Jane Doe");
        assert_eq!(value["status"], "registered");
        assert!(value["vehicleMake"].is_null());
    }

    #[test]
    fn test_create_request_rejects_blank_required_fields() {
        let request: CreateTicketRequest = serde_json::from_value(serde_json::json!({
            "licensePlate": "   ",
            "customerName": "Jane Doe",
            "customerPhone": "555-0100"
        }))
        .unwrap();

        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("license_plate"));
    }
}
