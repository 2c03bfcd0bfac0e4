//! Taller Tickets - seguimiento de servicio vehicular
//!
//! Backend HTTP para el mostrador de un taller: registra vehículos,
//! sigue su estado por las cinco etapas del servicio y anuncia por voz
//! cuando un vehículo queda listo para entrega.

pub mod announcer;
pub mod config;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;
pub mod utils;
