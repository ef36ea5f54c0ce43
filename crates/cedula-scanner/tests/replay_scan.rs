//! End-to-end scans over replayed recognizer transcripts

use cedula_domain::{Field, Score};
use cedula_scanner::{MockRecognizer, ReplaySource, ScanWorker, ScannerConfig, TranscriptRecognizer};

const FRONT: &str = "REPUBLICA DE COSTA RICA\n\
                     Número de Cédula: 1-0234-0567\n\
                     MARIA FERNANDA SOLIS\n\
                     FEMENINO\n\
                     Fecha de Nacimiento: 12/07/1988";

const BACK: &str = "Lugar de Nacimiento: Heredia\n\
                    Nombre del Padre: Carlos Solis\n\
                    Nombre de la Madre: Ana Vargas\n\
                    Domicilio Electoral: San Pablo\n\
                    Vencimiento: 15/03/2031";

fn config() -> ScannerConfig {
    ScannerConfig {
        sample_interval_ms: 1,
        recognizer_timeout_ms: 1_000,
        ..ScannerConfig::default()
    }
}

#[tokio::test]
async fn test_front_then_back_completes_the_record() {
    // A camera sees blur, the front twice, then the back
    let source = ReplaySource::from_transcripts(["", "REP", FRONT, FRONT, BACK, BACK]);
    let mut worker = ScanWorker::new(config());

    let state = worker
        .run_until(source, TranscriptRecognizer, std::future::pending())
        .await
        .unwrap();

    assert_eq!(state.score, Score::COMPLETE);
    assert_eq!(state.record.get(Field::IdNumber), Some("1-0234-0567"));
    assert_eq!(state.record.get(Field::Sex), Some("FEMENINO"));
    assert_eq!(state.record.get(Field::BirthPlace), Some("Heredia"));
    assert_eq!(state.record.get(Field::ElectoralAddress), Some("San Pablo"));

    let metrics = worker.metrics();
    assert_eq!(metrics.frames_captured, 5);
    assert_eq!(metrics.empty_snapshots, 1);
    assert_eq!(metrics.completed_after, Some(5));
}

#[tokio::test]
async fn test_front_only_stays_partial() {
    let source = ReplaySource::from_transcripts([FRONT, FRONT, FRONT]);
    let mut worker = ScanWorker::new(config());

    let state = worker
        .run_until(source, TranscriptRecognizer, std::future::pending())
        .await
        .unwrap();

    assert!(!state.is_complete());
    assert_eq!(state.record.detected_count(), 4);
    assert_eq!(state.score, Score::from_detected(4));
    assert_eq!(format!("{}", state.score), "44.44%");
    assert_eq!(worker.metrics().completed_after, None);
    // Repeated frames change nothing after the first
    assert_eq!(worker.metrics().fields_detected, 4);
    assert_eq!(worker.metrics().fields_replaced, 0);
}

#[tokio::test]
async fn test_misread_is_corrected_by_a_later_frame() {
    let recognizer = MockRecognizer::new("");
    recognizer.push_text("Vencimiento: 15/08/2031");
    recognizer.push_error("motion blur");
    recognizer.push_text("Vencimiento: 15/03/2031");

    let source = ReplaySource::from_transcripts(["", "", ""]);
    let mut worker = ScanWorker::new(config());

    let state = worker
        .run_until(source, recognizer, std::future::pending())
        .await
        .unwrap();

    assert_eq!(state.record.get(Field::ExpirationDate), Some("15/03/2031"));
    assert_eq!(worker.metrics().fields_replaced, 1);
    assert_eq!(worker.metrics().recognizer_failures, 1);
}

#[tokio::test]
async fn test_worker_can_run_twice() {
    let mut worker = ScanWorker::new(config());

    let first = worker
        .run_until(
            ReplaySource::from_transcripts([FRONT]),
            TranscriptRecognizer,
            std::future::pending(),
        )
        .await
        .unwrap();
    assert_eq!(first.record.detected_count(), 4);

    // A new run starts from an empty record
    let second = worker
        .run_until(
            ReplaySource::from_transcripts([BACK]),
            TranscriptRecognizer,
            std::future::pending(),
        )
        .await
        .unwrap();
    assert_eq!(second.record.detected_count(), 5);
    assert_eq!(second.record.get(Field::IdNumber), None);
}
