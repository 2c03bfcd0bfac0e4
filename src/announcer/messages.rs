//! Plantillas de anuncio por idioma
//!
//! Los textos son los que se leen en voz alta en el mostrador; el
//! idioma se fija por configuración del servidor.

use serde::{Deserialize, Serialize};

use crate::models::ticket::Ticket;

/// Idiomas soportados para los anuncios
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Es,
    Pt,
    Fr,
}

impl Language {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "en" => Some(Language::En),
            "es" => Some(Language::Es),
            "pt" => Some(Language::Pt),
            "fr" => Some(Language::Fr),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
            Language::Pt => "pt",
            Language::Fr => "fr",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Armar el anuncio de "vehículo listo" para un ticket
///
/// El texto en español menciona además al cliente y al vehículo cuando
/// esos datos existen; los demás idiomas solo placas y folio.
pub fn ready_announcement(ticket: &Ticket, language: Language) -> String {
    match language {
        Language::En => format!(
            "Good afternoon... Your vehicle with license plate {}, service ticket {}, \
             is now ready for pickup. Please come to the service desk at your convenience. \
             Thank you for choosing our service.",
            ticket.license_plate, ticket.ticket_number
        ),
        Language::Es => {
            let saludo = format!("Muy buenas {}", ticket.customer_name);
            let vehiculo = match (&ticket.vehicle_make, &ticket.vehicle_model) {
                (Some(make), Some(model)) => format!("El vehículo {} {}", make, model),
                _ => "El vehículo".to_string(),
            };
            format!(
                "{}... {} con placas {}, ticket {}, ya está listo para ser entregado. \
                 Favor de pasar al mostrador de atención a clientes. Muchas gracias.",
                saludo, vehiculo, ticket.license_plate, ticket.ticket_number
            )
        }
        Language::Pt => format!(
            "Atenção por favor... O veículo com placa {}, ticket número {}, está pronto \
             para entrega. Por favor dirija-se ao balcão de atendimento. Obrigado.",
            ticket.license_plate, ticket.ticket_number
        ),
        Language::Fr => format!(
            "Attention s'il vous plaît... Le véhicule avec la plaque d'immatriculation {}, \
             ticket numéro {}, est prêt pour la livraison. Veuillez vous diriger vers le \
             comptoir de service. Merci.",
            ticket.license_plate, ticket.ticket_number
        ),
    }
}
