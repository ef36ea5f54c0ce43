//! Two-state scanning session

use crate::accumulator::{MergeReport, RecordAccumulator, ScanState};
use cedula_domain::traits::FieldExtractor;
use cedula_domain::Snapshot;
use cedula_extractor::CedulaExtractor;
use tracing::{debug, info};

/// Lifecycle state of a [`ScanSession`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// No active session; the record is empty
    Idle,

    /// Frames are being merged into the record
    Scanning,
}

impl SessionState {
    /// Get the state name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Scanning => "scanning",
        }
    }
}

/// A scanning session: extractor + accumulator behind `start`/`stop`
///
/// Frames observed while idle are ignored. Reaching a complete record does
/// not end the session; the driver decides when to stop.
///
/// # Examples
///
/// ```
/// use cedula_accumulator::ScanSession;
/// use cedula_domain::{Field, Snapshot};
///
/// let mut session = ScanSession::default_config();
/// session.start();
///
/// let state = session.frame_observed(&Snapshot::from_text("Vencimiento: 15/03/2031"));
/// assert_eq!(state.record.get(Field::ExpirationDate), Some("15/03/2031"));
///
/// let last = session.stop();
/// assert_eq!(last.record.detected_count(), 1);
/// assert!(session.current().record.is_empty());
/// ```
#[derive(Debug)]
pub struct ScanSession<E = CedulaExtractor> {
    extractor: E,
    accumulator: RecordAccumulator,
    state: SessionState,
    frames_merged: u64,
}

impl<E: FieldExtractor> ScanSession<E> {
    /// Create an idle session using the given extractor
    pub fn new(extractor: E) -> Self {
        Self {
            extractor,
            accumulator: RecordAccumulator::new(),
            state: SessionState::Idle,
            frames_merged: 0,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Check if the session is scanning
    pub fn is_scanning(&self) -> bool {
        self.state == SessionState::Scanning
    }

    /// Begin a session with an empty record
    ///
    /// Calling `start` while scanning restarts the session from scratch.
    pub fn start(&mut self) -> ScanState {
        if self.is_scanning() {
            info!(
                "Restarting scan session (discarding {} field(s))",
                self.accumulator.record().detected_count()
            );
        } else {
            info!("Scan session started");
        }

        self.accumulator.reset();
        self.frames_merged = 0;
        self.state = SessionState::Scanning;
        self.accumulator.state()
    }

    /// End the session and discard the record
    ///
    /// Returns the state as it was just before it was discarded, so the
    /// caller can keep the result. Stopping an idle session is a no-op.
    pub fn stop(&mut self) -> ScanState {
        let last = self.accumulator.state();

        if self.is_scanning() {
            info!(
                "Scan session stopped after {} frame(s) at {}",
                self.frames_merged, last.score
            );
        }

        self.accumulator.reset();
        self.frames_merged = 0;
        self.state = SessionState::Idle;
        last
    }

    /// Extract a snapshot and merge it into the record
    ///
    /// While idle this does nothing and returns the (empty) current state.
    pub fn frame_observed(&mut self, snapshot: &Snapshot) -> ScanState {
        if !self.is_scanning() {
            debug!("Ignoring frame observed while idle");
            return self.accumulator.state();
        }

        let extracted = self.extractor.extract(snapshot);
        let state = self.accumulator.merge(&extracted);
        self.frames_merged += 1;
        state
    }

    /// Copy of the current record and score
    pub fn current(&self) -> ScanState {
        self.accumulator.state()
    }

    /// What the most recent merge changed
    pub fn last_report(&self) -> &MergeReport {
        self.accumulator.last_report()
    }

    /// Frames merged since the session started
    pub fn frames_merged(&self) -> u64 {
        self.frames_merged
    }
}

impl ScanSession<CedulaExtractor> {
    /// Create an idle session with the default extractor
    pub fn default_config() -> Self {
        Self::new(CedulaExtractor::default_config())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cedula_domain::{Field, FieldMap, Score};

    const FRONT: &str = "Número de Cédula: 1-0234-0567\nJUAN PEREZ GOMEZ\nMASCULINO\nFecha de Nacimiento: 01/01/1990";

    #[test]
    fn test_new_session_is_idle() {
        let session = ScanSession::default_config();
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.current().record.is_empty());
    }

    #[test]
    fn test_frames_ignored_while_idle() {
        let mut session = ScanSession::default_config();
        let state = session.frame_observed(&Snapshot::from_text(FRONT));

        assert!(state.record.is_empty());
        assert_eq!(state.score, Score::ZERO);
        assert_eq!(session.frames_merged(), 0);
    }

    #[test]
    fn test_start_then_observe() {
        let mut session = ScanSession::default_config();
        session.start();
        let state = session.frame_observed(&Snapshot::from_text(FRONT));

        assert_eq!(state.record.detected_count(), 4);
        assert_eq!(state.record.get(Field::Sex), Some("MASCULINO"));
        assert_eq!(session.frames_merged(), 1);
        assert_eq!(session.last_report().detected.len(), 4);
    }

    #[test]
    fn test_stop_discards_and_returns_last_state() {
        let mut session = ScanSession::default_config();
        session.start();
        session.frame_observed(&Snapshot::from_text(FRONT));

        let last = session.stop();
        assert_eq!(last.record.detected_count(), 4);
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.current().record.is_empty());

        // Resuming starts fresh
        let state = session.start();
        assert!(state.record.is_empty());
        assert_eq!(state.score, Score::ZERO);
    }

    #[test]
    fn test_start_while_scanning_restarts() {
        let mut session = ScanSession::default_config();
        session.start();
        session.frame_observed(&Snapshot::from_text(FRONT));

        let state = session.start();
        assert!(session.is_scanning());
        assert!(state.record.is_empty());
        assert_eq!(session.frames_merged(), 0);
    }

    #[test]
    fn test_stop_while_idle_is_noop() {
        let mut session = ScanSession::default_config();
        let last = session.stop();
        assert!(last.record.is_empty());
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn test_complete_does_not_stop() {
        let mut session = ScanSession::default_config();
        session.start();
        session.frame_observed(&Snapshot::from_text(FRONT));
        let state = session.frame_observed(&Snapshot::from_text(
            "Lugar de Nacimiento: Cartago\nNombre del Padre: Pedro\nNombre de la Madre: Ana\nDomicilio Electoral: Escazu\nVencimiento: 2031",
        ));

        assert!(state.is_complete());
        assert!(session.is_scanning());
    }

    struct FixedExtractor(FieldMap);

    impl FieldExtractor for FixedExtractor {
        fn extract(&self, _snapshot: &Snapshot) -> FieldMap {
            self.0.clone()
        }
    }

    #[test]
    fn test_custom_extractor() {
        let mut map = FieldMap::new();
        map.insert(Field::MotherName, "Ana".to_string());
        let mut session = ScanSession::new(FixedExtractor(map));
        session.start();

        let state = session.frame_observed(&Snapshot::empty());
        assert_eq!(state.record.get(Field::MotherName), Some("Ana"));
    }
}
