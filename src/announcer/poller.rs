//! Bucle de sondeo de anuncios
//!
//! Cada N segundos lee la lista completa de tickets por la misma API de
//! lectura que usa la pantalla de clientes, pasa el snapshot por el
//! detector y dispara la voz para los recién listos. El estado del
//! detector es propio de este bucle; nadie más lo toca.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use crate::announcer::detector::ReadyTransitionDetector;
use crate::announcer::messages::{self, Language};
use crate::announcer::speech::Announcer;
use crate::models::ticket::Ticket;
use crate::store::TicketStore;

/// Retraso entre detectar la transición y hablar, para que la UI
/// alcance a refrescarse primero
const ANNOUNCE_DELAY: Duration = Duration::from_secs(1);

pub struct AnnouncementPoller {
    store: TicketStore,
    announcer: Option<Arc<dyn Announcer>>,
    language: Language,
    interval: Duration,
    detector: ReadyTransitionDetector,
}

impl AnnouncementPoller {
    pub fn new(
        store: TicketStore,
        announcer: Option<Arc<dyn Announcer>>,
        language: Language,
        interval: Duration,
    ) -> Self {
        Self {
            store,
            announcer,
            language,
            interval,
            detector: ReadyTransitionDetector::new(),
        }
    }

    /// Correr para siempre; pensado para tokio::spawn
    pub async fn run(mut self) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        log::info!(
            "📡 Sondeo de anuncios cada {}s (idioma: {})",
            self.interval.as_secs(),
            self.language
        );

        loop {
            ticker.tick().await;
            self.poll_once().await;
        }
    }

    /// Un ciclo de sondeo; separado de `run` para poder probarlo
    pub async fn poll_once(&mut self) {
        let snapshot = self.store.list_all().await;
        let newly_ready = self.detector.observe(&snapshot);

        for ticket in newly_ready {
            self.schedule_announcement(ticket);
        }
    }

    fn schedule_announcement(&self, ticket: Ticket) {
        let Some(announcer) = self.announcer.clone() else {
            log::info!(
                "🔇 Ticket {} quedó listo, pero no hay salida de voz",
                ticket.ticket_number
            );
            return;
        };

        let message = messages::ready_announcement(&ticket, self.language);
        log::info!(
            "📢 Anunciando ticket {} (placas {})",
            ticket.ticket_number,
            ticket.license_plate
        );

        // Cada anuncio vive en su propia task; si varios tickets quedan
        // listos en el mismo ciclo, los retrasos corren en paralelo.
        tokio::spawn(async move {
            tokio::time::sleep(ANNOUNCE_DELAY).await;
            announcer.announce(&message);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ticket::{CreateTicketRequest, TicketStatus};
    use std::sync::Mutex;

    struct RecordingAnnouncer {
        messages: Mutex<Vec<String>>,
    }

    impl RecordingAnnouncer {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                messages: Mutex::new(Vec::new()),
            })
        }

        fn recorded(&self) -> Vec<String> {
            self.messages.lock().unwrap().clone()
        }
    }

    impl Announcer for RecordingAnnouncer {
        fn announce(&self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }
    }

    fn request(plate: &str) -> CreateTicketRequest {
        serde_json::from_value(serde_json::json!({
            "licensePlate": plate,
            "customerName": "Jane Doe",
            "customerPhone": "555-0100"
        }))
        .unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_ready_transition_is_announced_once_after_delay() {
        let store = TicketStore::new();
        let recorder = RecordingAnnouncer::new();
        let mut poller = AnnouncementPoller::new(
            store.clone(),
            Some(recorder.clone() as Arc<dyn Announcer>),
            Language::En,
            Duration::from_secs(5),
        );

        let ticket = store.create(request("ABC-123")).await.unwrap();
        poller.poll_once().await;

        store
            .update_status(ticket.id, TicketStatus::Ready)
            .await
            .unwrap();
        poller.poll_once().await;

        // El anuncio sale después del retraso, no antes
        assert!(recorder.recorded().is_empty());
        tokio::time::sleep(Duration::from_secs(2)).await;

        let messages = recorder.recorded();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("ABC-123"));
        assert!(messages[0].contains(&ticket.ticket_number));

        // Otro ciclo con el mismo snapshot no repite el anuncio
        poller.poll_once().await;
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(recorder.recorded().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_snapshot_with_ready_ticket_stays_silent() {
        let store = TicketStore::new();
        let recorder = RecordingAnnouncer::new();
        let mut poller = AnnouncementPoller::new(
            store.clone(),
            Some(recorder.clone() as Arc<dyn Announcer>),
            Language::En,
            Duration::from_secs(5),
        );

        let ticket = store.create(request("ABC-123")).await.unwrap();
        store
            .update_status(ticket.id, TicketStatus::Ready)
            .await
            .unwrap();

        poller.poll_once().await;
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(recorder.recorded().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_two_tickets_ready_in_same_cycle_both_announced() {
        let store = TicketStore::new();
        let recorder = RecordingAnnouncer::new();
        let mut poller = AnnouncementPoller::new(
            store.clone(),
            Some(recorder.clone() as Arc<dyn Announcer>),
            Language::Es,
            Duration::from_secs(5),
        );

        let first = store.create(request("AAA-001")).await.unwrap();
        let second = store.create(request("BBB-002")).await.unwrap();
        poller.poll_once().await;

        store
            .update_status(first.id, TicketStatus::Ready)
            .await
            .unwrap();
        store
            .update_status(second.id, TicketStatus::Ready)
            .await
            .unwrap();
        poller.poll_once().await;

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(recorder.recorded().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_without_announcer_poller_just_logs() {
        let store = TicketStore::new();
        let mut poller = AnnouncementPoller::new(
            store.clone(),
            None,
            Language::En,
            Duration::from_secs(5),
        );

        let ticket = store.create(request("ABC-123")).await.unwrap();
        poller.poll_once().await;
        store
            .update_status(ticket.id, TicketStatus::Ready)
            .await
            .unwrap();
        // No debe entrar en pánico ni colgarse sin salida de voz
        poller.poll_once().await;
        tokio::time::sleep(Duration::from_secs(2)).await;
    }
}
