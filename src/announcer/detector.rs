//! Detección de transiciones a "ready"
//!
//! Compara el snapshot actual de tickets contra el anterior y devuelve
//! los que acaban de quedar listos. El primer snapshot nunca anuncia
//! nada: sin snapshot anterior no hay transición, solo historial.

use std::collections::HashMap;

use uuid::Uuid;

use crate::models::ticket::{Ticket, TicketStatus};

/// Estado del detector: el snapshot anterior reducido a id → estado
pub struct ReadyTransitionDetector {
    previous: HashMap<Uuid, TicketStatus>,
}

impl ReadyTransitionDetector {
    pub fn new() -> Self {
        Self {
            previous: HashMap::new(),
        }
    }

    /// Procesar un snapshot nuevo
    ///
    /// Devuelve los tickets que están en ready ahora y no lo estaban en
    /// el snapshot anterior (o no existían). El snapshot guardado se
    /// reemplaza siempre, se haya anunciado algo o no; así cada
    /// transición se anuncia exactamente una vez aunque el sondeo vaya
    /// más rápido que el propio anuncio.
    pub fn observe(&mut self, snapshot: &[Ticket]) -> Vec<Ticket> {
        let mut newly_ready = Vec::new();

        if !self.previous.is_empty() {
            for ticket in snapshot {
                if ticket.status != TicketStatus::Ready {
                    continue;
                }
                let was_ready = self.previous.get(&ticket.id) == Some(&TicketStatus::Ready);
                if !was_ready {
                    newly_ready.push(ticket.clone());
                }
            }
        }

        self.previous = snapshot
            .iter()
            .map(|ticket| (ticket.id, ticket.status))
            .collect();

        newly_ready
    }
}

impl Default for ReadyTransitionDetector {
    fn default() -> Self {
        Self::new()
    }
}
