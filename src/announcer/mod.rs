//! Anuncios de voz
//!
//! Este módulo detecta tickets que acaban de quedar listos para
//! entrega y los anuncia por voz: detector de transiciones, plantillas
//! por idioma, salida de audio y el bucle de sondeo que une todo.

pub mod detector;
pub mod messages;
pub mod poller;
pub mod speech;

pub use messages::Language;
pub use poller::AnnouncementPoller;
pub use speech::{Announcer, SpeechAnnouncer};
