//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. El store se construye una vez en main y
//! se inyecta aquí; no hay singletons globales.

use std::sync::Arc;

use crate::announcer::{Announcer, Language};
use crate::config::environment::EnvironmentConfig;
use crate::store::TicketStore;

#[derive(Clone)]
pub struct AppState {
    pub store: TicketStore,
    pub config: EnvironmentConfig,
    /// None cuando la plataforma no tiene salida de voz
    pub announcer: Option<Arc<dyn Announcer>>,
}

impl AppState {
    pub fn new(
        store: TicketStore,
        config: EnvironmentConfig,
        announcer: Option<Arc<dyn Announcer>>,
    ) -> Self {
        Self {
            store,
            config,
            announcer,
        }
    }

    pub fn language(&self) -> Language {
        self.config.announce_lang
    }
}
