use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::info;

use taller_tickets::announcer::{Announcer, AnnouncementPoller, SpeechAnnouncer};
use taller_tickets::config::environment::EnvironmentConfig;
use taller_tickets::routes::create_app_router;
use taller_tickets::state::AppState;
use taller_tickets::store::TicketStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚗 Taller Tickets - Seguimiento de servicio vehicular");
    info!("=====================================================");

    let config = EnvironmentConfig::default();
    let store = TicketStore::new();

    // Salida de voz; si la plataforma no tiene TTS el servidor queda mudo
    let announcer: Option<Arc<dyn Announcer>> = if config.announce_enabled {
        match SpeechAnnouncer::new() {
            Some(speech) => {
                info!("🔊 Anuncios de voz activados (idioma: {})", config.announce_lang);
                Some(Arc::new(speech))
            }
            None => {
                info!("🔇 Sin backend de voz; los anuncios solo se loguean");
                None
            }
        }
    } else {
        info!("🔇 Anuncios de voz desactivados por configuración");
        None
    };

    // Bucle de sondeo de anuncios, independiente de los requests
    let poller = AnnouncementPoller::new(
        store.clone(),
        announcer.clone(),
        config.announce_lang,
        Duration::from_secs(config.announce_interval_secs),
    );
    tokio::spawn(poller.run());

    let app_state = AppState::new(store, config.clone(), announcer);
    let app = create_app_router(app_state);

    let addr: SocketAddr = config.server_addr().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET   /health - Health check");
    info!("🎫 Endpoints de tickets:");
    info!("   GET   /api/tickets - Todos los tickets (recientes primero)");
    info!("   GET   /api/tickets/active - Tickets en servicio (cola FIFO)");
    info!("   GET   /api/tickets/stats - Conteo por estado");
    info!("   GET   /api/tickets/search?q= - Buscar por folio, placas o cliente");
    info!("   GET   /api/tickets/:id - Un ticket");
    info!("   POST  /api/tickets - Registrar vehículo");
    info!("   PATCH /api/tickets/:id/status - Cambiar estado");
    info!("   POST  /api/tickets/:id/announce - Anunciar por voz de inmediato");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
