//! Generation session state: one retained clip, at most one in-flight request.

use std::sync::Mutex;

use crate::speech::VoiceClip;

/// Lifecycle of the single generation slot:
/// idle -> generating -> (ready | failed) -> idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Generating,
    Ready,
    Failed,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Generating => "generating",
            Phase::Ready => "ready",
            Phase::Failed => "failed",
        }
    }
}

#[derive(Debug, Default)]
struct SessionState {
    phase: Phase,
    clip: Option<VoiceClip>,
    last_error: Option<String>,
}

/// Point-in-time view for the status endpoint.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub error: Option<String>,
    pub duration_ms: Option<u64>,
    pub sample_rate: Option<u32>,
}

#[derive(Debug, Default)]
pub struct Session {
    inner: Mutex<SessionState>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit a new generation. Returns `None` while another one is in
    /// flight. Admission releases the previously retained clip and clears
    /// any earlier failure.
    pub fn begin(&self) -> Option<GenerationGuard<'_>> {
        let mut state = self.inner.lock().unwrap();
        if state.phase == Phase::Generating {
            return None;
        }
        state.phase = Phase::Generating;
        state.clip = None;
        state.last_error = None;
        Some(GenerationGuard {
            session: self,
            resolved: false,
        })
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.inner.lock().unwrap();
        SessionSnapshot {
            phase: state.phase,
            error: state.last_error.clone(),
            duration_ms: state.clip.as_ref().map(|c| c.duration_ms),
            sample_rate: state.clip.as_ref().map(|c| c.sample_rate),
        }
    }

    /// The retained clip, if the last generation succeeded.
    pub fn clip(&self) -> Option<VoiceClip> {
        self.inner.lock().unwrap().clip.clone()
    }

    fn finish(&self, phase: Phase, clip: Option<VoiceClip>, error: Option<String>) {
        let mut state = self.inner.lock().unwrap();
        state.phase = phase;
        state.clip = clip;
        state.last_error = error;
    }
}

/// Held for the duration of one generation; resolving it records the
/// outcome. An unresolved guard (cancelled handler) frees the slot on drop.
#[derive(Debug)]
pub struct GenerationGuard<'a> {
    session: &'a Session,
    resolved: bool,
}

impl GenerationGuard<'_> {
    pub fn complete(mut self, clip: VoiceClip) {
        self.resolved = true;
        self.session.finish(Phase::Ready, Some(clip), None);
    }

    pub fn fail(mut self, message: impl Into<String>) {
        self.resolved = true;
        self.session
            .finish(Phase::Failed, None, Some(message.into()));
    }
}

impl Drop for GenerationGuard<'_> {
    fn drop(&mut self) {
        if !self.resolved {
            self.session.finish(Phase::Idle, None, None);
        }
    }
}
