//! Salida de voz
//!
//! Sintetiza los anuncios con el TTS de la plataforma y antepone un
//! timbre de dos tonos, como la campanita del mostrador. Todo el audio
//! corre en un hilo dedicado: la síntesis es bloqueante y el resto del
//! servidor no tiene por qué esperarla.

use std::time::Duration;

use rodio::source::{SineWave, Source};
use rodio::{OutputStream, Sink};
use tokio::sync::mpsc;
use tts::Tts;

const HIGH_TONE_HZ: f32 = 800.0;
const LOW_TONE_HZ: f32 = 600.0;
const HIGH_TONE_MILLIS: u64 = 300;
const LOW_TONE_MILLIS: u64 = 400;
/// Pausa entre el final del timbre y el inicio de la voz
const CHIME_TO_SPEECH_GAP: Duration = Duration::from_millis(100);

/// Salida de anuncios; la implementación real habla, la de pruebas graba
pub trait Announcer: Send + Sync {
    fn announce(&self, message: &str);
}

/// Anunciador respaldado por el TTS de la plataforma
///
/// `new` devuelve `None` cuando no hay backend de voz; el resto del
/// sistema sigue funcionando mudo.
pub struct SpeechAnnouncer {
    tx: mpsc::UnboundedSender<String>,
}

impl SpeechAnnouncer {
    pub fn new() -> Option<Self> {
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        let (ready_tx, ready_rx) = std::sync::mpsc::channel::<bool>();

        let spawned = std::thread::Builder::new()
            .name("taller-voz".to_string())
            .spawn(move || {
                // El handle de TTS se crea dentro del hilo que lo usa
                let mut tts = match Tts::default() {
                    Ok(tts) => {
                        let _ = ready_tx.send(true);
                        tts
                    }
                    Err(e) => {
                        log::warn!("🔇 Sin backend de voz disponible: {}", e);
                        let _ = ready_tx.send(false);
                        return;
                    }
                };

                while let Some(message) = rx.blocking_recv() {
                    play_chime();
                    std::thread::sleep(CHIME_TO_SPEECH_GAP);
                    // interrupt = true: un anuncio nuevo corta al anterior
                    if let Err(e) = tts.speak(message, true) {
                        log::warn!("🔇 Error al sintetizar voz: {}", e);
                    }
                }
            });

        if spawned.is_err() {
            log::warn!("🔇 No se pudo crear el hilo de voz");
            return None;
        }

        match ready_rx.recv() {
            Ok(true) => Some(Self { tx }),
            _ => None,
        }
    }
}

impl Announcer for SpeechAnnouncer {
    fn announce(&self, message: &str) {
        if self.tx.send(message.to_string()).is_err() {
            log::warn!("🔇 El hilo de voz ya no está; anuncio descartado");
        }
    }
}

/// Timbre de dos tonos: agudo y luego grave
fn play_chime() {
    let (_stream, handle) = match OutputStream::try_default() {
        Ok(pair) => pair,
        Err(e) => {
            log::warn!("🔇 Sin salida de audio para el timbre: {}", e);
            return;
        }
    };

    let sink = match Sink::try_new(&handle) {
        Ok(sink) => sink,
        Err(e) => {
            log::warn!("🔇 No se pudo abrir el sink de audio: {}", e);
            return;
        }
    };

    sink.append(
        SineWave::new(HIGH_TONE_HZ)
            .take_duration(Duration::from_millis(HIGH_TONE_MILLIS))
            .amplify(0.3),
    );
    sink.append(
        SineWave::new(LOW_TONE_HZ)
            .take_duration(Duration::from_millis(LOW_TONE_MILLIS))
            .amplify(0.3),
    );
    sink.sleep_until_end();
}
