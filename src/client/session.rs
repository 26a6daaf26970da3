use std::sync::atomic::{AtomicBool, Ordering};

use crate::message::Language;

/// Per-user dispatch context: the in-flight flag plus the language the UI
/// is displayed in.
#[derive(Debug, Default)]
pub struct Session {
    in_flight: AtomicBool,
    display_language: Language,
}

impl Session {
    pub fn new(display_language: Language) -> Self {
        Self {
            in_flight: AtomicBool::new(false),
            display_language,
        }
    }

    pub fn display_language(&self) -> Language {
        self.display_language
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Claims the session. `None` if another dispatch already holds it.
    pub(crate) fn try_begin(&self) -> Option<InFlight<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight { session: self })
    }
}

/// Releases the in-flight flag when dropped.
pub(crate) struct InFlight<'a> {
    session: &'a Session,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.session.in_flight.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_one_claim_at_a_time() {
        let session = Session::new(Language::En);
        let guard = session.try_begin().unwrap();
        assert!(session.is_in_flight());
        assert!(session.try_begin().is_none());
        drop(guard);
        assert!(!session.is_in_flight());
        assert!(session.try_begin().is_some());
    }
}
