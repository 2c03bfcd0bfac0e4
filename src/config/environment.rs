//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno. Todas las variables
//! tienen default para poder arrancar el servidor sin .env.

use std::env;

use crate::announcer::Language;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub host: String,
    pub port: u16,
    /// Cada cuántos segundos sondea el bucle de anuncios
    pub announce_interval_secs: u64,
    /// Idioma de los anuncios de voz
    pub announce_lang: Language,
    /// Apagar la voz por completo (pantallas sin bocinas)
    pub announce_enabled: bool,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(3000),
            announce_interval_secs: env::var("ANNOUNCE_INTERVAL_SECS")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(5),
            announce_lang: env::var("ANNOUNCE_LANG")
                .ok()
                .and_then(|value| Language::parse(&value))
                .unwrap_or(Language::Es),
            announce_enabled: env::var("ANNOUNCE_ENABLED")
                .map(|value| value != "false" && value != "0")
                .unwrap_or(true),
        }
    }
}

impl EnvironmentConfig {
    /// Obtener la dirección del servidor
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
