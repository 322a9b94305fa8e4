// src/speech/mod.rs
use std::process::{Child, Command};

/// Capability interface over the speech synthesizer. Injected rather than
/// reached for as a global so tests can substitute a recording double.
pub trait Narrator {
    /// Fire-and-forget: returns as soon as playback has been dispatched.
    fn speak(&mut self, text: &str, locale: &str);

    /// Stops anything queued or currently playing.
    fn cancel_all(&mut self);
}

/// Front door for all narration. Every request cancels whatever is playing
/// before enqueueing exactly one utterance, so at most one narration is
/// active at any time and the most recent request always wins.
pub struct Narration {
    engine: Box<dyn Narrator>,
}

impl Narration {
    pub fn new(engine: Box<dyn Narrator>) -> Self {
        Self { engine }
    }

    pub fn request(&mut self, text: &str, locale: &str) {
        tracing::info!(locale, chars = text.len(), "narration requested");
        self.engine.cancel_all();
        self.engine.speak(text, locale);
    }

    pub fn cancel_all(&mut self) {
        self.engine.cancel_all();
    }
}

/// Production narrator: spawns the configured synthesizer command (espeak-ng
/// by default) once per utterance and keeps the child handle so a later
/// cancel can kill it mid-sentence.
pub struct CommandNarrator {
    program: String,
    current: Option<Child>,
}

impl CommandNarrator {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            current: None,
        }
    }

    // espeak-ng selects voices by language code, e.g. "ta" from "ta-IN".
    fn voice_for(locale: &str) -> String {
        locale
            .split('-')
            .next()
            .unwrap_or("en")
            .to_ascii_lowercase()
    }
}

impl Narrator for CommandNarrator {
    fn speak(&mut self, text: &str, locale: &str) {
        let spawned = Command::new(&self.program)
            .arg("-v")
            .arg(Self::voice_for(locale))
            .arg(text)
            .spawn();

        match spawned {
            Ok(child) => self.current = Some(child),
            Err(e) => {
                tracing::warn!(program = %self.program, error = %e, "failed to start narration");
                self.current = None;
            }
        }
    }

    fn cancel_all(&mut self) {
        if let Some(mut child) = self.current.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

impl Drop for CommandNarrator {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Speak(String, String),
        CancelAll,
    }

    struct RecordingNarrator {
        calls: Rc<RefCell<Vec<Call>>>,
    }

    impl Narrator for RecordingNarrator {
        fn speak(&mut self, text: &str, locale: &str) {
            self.calls
                .borrow_mut()
                .push(Call::Speak(text.to_string(), locale.to_string()));
        }

        fn cancel_all(&mut self) {
            self.calls.borrow_mut().push(Call::CancelAll);
        }
    }

    fn recording() -> (Narration, Rc<RefCell<Vec<Call>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let narration = Narration::new(Box::new(RecordingNarrator {
            calls: Rc::clone(&calls),
        }));
        (narration, calls)
    }

    #[test]
    fn request_cancels_before_speaking() {
        let (mut narration, calls) = recording();
        narration.request("Welcome to SME Vision", "en-US");
        assert_eq!(
            &*calls.borrow(),
            &[
                Call::CancelAll,
                Call::Speak("Welcome to SME Vision".into(), "en-US".into()),
            ]
        );
    }

    #[test]
    fn rapid_requests_leave_only_the_later_utterance_active() {
        let (mut narration, calls) = recording();
        narration.request("first", "en-US");
        narration.request("second", "ta-IN");

        // Every speak is preceded by a cancel, so at any observation point
        // at most one utterance is active and it belongs to the later call.
        let calls = calls.borrow();
        assert_eq!(calls.len(), 4);
        assert_eq!(calls[2], Call::CancelAll);
        assert_eq!(calls[3], Call::Speak("second".into(), "ta-IN".into()));
    }

    #[test]
    fn voice_is_derived_from_locale_prefix() {
        assert_eq!(CommandNarrator::voice_for("ta-IN"), "ta");
        assert_eq!(CommandNarrator::voice_for("hi-IN"), "hi");
        assert_eq!(CommandNarrator::voice_for("en-US"), "en");
    }
}
