//! Round state machine
//!
//! `Game` orchestrates one round of the guessing game: audio input →
//! transcription → synthesis → randomized option assignment → guess →
//! score → persistence. `Session` is the explicit per-player state the
//! transitions mutate; everything the front end renders is read from it.

pub mod options;

use crate::audio::AudioHandle;
use crate::leaderboard::LeaderboardStore;
use crate::speech::{Synthesizer, Transcriber};
use crate::{Result, VoiceoffError};
use log::{debug, info, warn};
use options::{Label, RoundOptions};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Minimum non-whitespace characters for a usable transcription
const MIN_TRANSCRIPT_CHARS: usize = 3;

/// Phase of the current round
///
/// "Already computed" is a named phase here, never a presence check on some
/// shared field: a round in `ReadyToGuess` has its transcript, AI clip, and
/// label binding cached in the session, and re-reading the session never
/// recomputes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// No audio received yet this session
    Idle,
    /// New audio input accepted, pipeline not started
    AwaitingAudio,
    /// Transcription in progress (or failed; re-capture to retry)
    Transcribing,
    /// Synthesis in progress (or failed; re-capture to retry)
    Synthesizing,
    /// Both clips ready, options bound, waiting for the player's guess
    ReadyToGuess,
    /// Guess accepted; only new audio starts the next round
    GuessSubmitted,
    /// Transcription produced no usable text; terminal for this round
    Invalid,
}

/// Result of an accepted guess
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessOutcome {
    /// The label the player chose
    pub guess: Label,
    /// The label that was bound to the real voice
    pub real_label: Label,
    /// Whether the guess was correct
    pub correct: bool,
    /// Cumulative correct guesses after this submission
    pub correct_count: u32,
    /// Cumulative rounds after this submission
    pub total_rounds: u32,
}

/// Per-player session state
///
/// Mutated exclusively by `Game` transitions. Round-scoped fields are reset
/// whenever new audio input arrives; the cumulative score fields persist
/// across rounds and end with the session.
pub struct Session {
    /// Phase of the current round
    phase: RoundPhase,

    /// The player's captured voice sample
    real_audio: Option<AudioHandle>,

    /// The synthesized rendition of the transcript
    ai_audio: Option<AudioHandle>,

    /// Transcribed text of the voice sample
    transcribed_text: Option<String>,

    /// Shuffled label binding for this round
    options: Option<RoundOptions>,

    /// Outcome of the accepted guess, kept so repeat submissions are no-ops
    outcome: Option<GuessOutcome>,

    /// Identifier of the last processed input (upload file name)
    last_input_id: Option<String>,

    /// Cumulative correct guesses this session
    correct_count: u32,

    /// Cumulative rounds played this session
    total_rounds: u32,
}

impl Session {
    fn new() -> Self {
        Self {
            phase: RoundPhase::Idle,
            real_audio: None,
            ai_audio: None,
            transcribed_text: None,
            options: None,
            outcome: None,
            last_input_id: None,
            correct_count: 0,
            total_rounds: 0,
        }
    }

    /// Reset round-scoped state for a new audio input
    ///
    /// Cumulative score and the input identifier survive; everything the
    /// previous round computed is invalidated.
    fn begin_round(&mut self, audio: AudioHandle, input_id: Option<&str>) {
        self.real_audio = Some(audio);
        self.ai_audio = None;
        self.transcribed_text = None;
        self.options = None;
        self.outcome = None;
        // Mic recordings carry no identifier and leave the last upload name
        // in place, so re-selecting that same file later is still ignored
        if let Some(id) = input_id {
            self.last_input_id = Some(id.to_string());
        }
        self.phase = RoundPhase::AwaitingAudio;
    }

    /// Current round phase
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// The player's real voice sample, if captured
    pub fn real_audio(&self) -> Option<&AudioHandle> {
        self.real_audio.as_ref()
    }

    /// The synthesized clip, if ready
    pub fn ai_audio(&self) -> Option<&AudioHandle> {
        self.ai_audio.as_ref()
    }

    /// Transcribed text, if transcription has run
    pub fn transcribed_text(&self) -> Option<&str> {
        self.transcribed_text.as_deref()
    }

    /// This round's label binding, if generated
    pub fn options(&self) -> Option<&RoundOptions> {
        self.options.as_ref()
    }

    /// Outcome of this round's accepted guess, if any
    pub fn outcome(&self) -> Option<&GuessOutcome> {
        self.outcome.as_ref()
    }

    /// Cumulative correct guesses this session
    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    /// Cumulative rounds played this session
    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    /// The audio clip bound to a label this round
    ///
    /// Returns None until the round reaches `ReadyToGuess`.
    pub fn audio_for(&self, label: Label) -> Option<&AudioHandle> {
        let options = self.options.as_ref()?;
        if options.is_real(label) {
            self.real_audio.as_ref()
        } else {
            self.ai_audio.as_ref()
        }
    }
}

/// The round state machine
///
/// Owns the session plus the external collaborators: a transcriber, a
/// synthesizer, and the leaderboard store. The front end drives it with
/// `submit_audio` and `submit_guess` and renders from `session()`.
pub struct Game {
    session: Session,
    transcriber: Box<dyn Transcriber>,
    synthesizer: Box<dyn Synthesizer>,
    leaderboard: LeaderboardStore,
    /// Full service name of the synthesis voice
    voice: String,
    rng: StdRng,
}

impl Game {
    /// Create a game with an entropy-seeded RNG
    pub fn new(
        transcriber: Box<dyn Transcriber>,
        synthesizer: Box<dyn Synthesizer>,
        leaderboard: LeaderboardStore,
        voice: String,
    ) -> Self {
        Self::with_rng(transcriber, synthesizer, leaderboard, voice, StdRng::from_entropy())
    }

    /// Create a game with an explicit RNG (for deterministic tests)
    pub fn with_rng(
        transcriber: Box<dyn Transcriber>,
        synthesizer: Box<dyn Synthesizer>,
        leaderboard: LeaderboardStore,
        voice: String,
        rng: StdRng,
    ) -> Self {
        Self {
            session: Session::new(),
            transcriber,
            synthesizer,
            leaderboard,
            voice,
            rng,
        }
    }

    /// Read-only view of the session for rendering
    ///
    /// Reading never runs transcription or synthesis and never regenerates
    /// the label binding.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The leaderboard store backing this game
    pub fn leaderboard(&self) -> &LeaderboardStore {
        &self.leaderboard
    }

    /// Handle a new audio input event and run the round pipeline
    ///
    /// `input_id` identifies the input source (the upload's file name); if it
    /// matches the last processed identifier the event is ignored and the
    /// current phase is returned unchanged. Mic recordings pass `None` and
    /// always start a new round.
    ///
    /// Returns the phase the round reached: `Invalid` when the transcription
    /// had no usable text (no synthesis attempted), `ReadyToGuess` on
    /// success. Service failures return `Err` and leave the round blocked at
    /// the failing step until new audio arrives.
    pub fn submit_audio(&mut self, audio: AudioHandle, input_id: Option<&str>) -> Result<RoundPhase> {
        if let (Some(id), Some(last)) = (input_id, self.session.last_input_id.as_deref()) {
            if id == last {
                debug!("Ignoring already-processed input '{}'", id);
                return Ok(self.session.phase);
            }
        }

        info!("New audio input{}", input_id.map(|id| format!(" '{}'", id)).unwrap_or_default());
        self.session.begin_round(audio, input_id);
        self.run_pipeline()
    }

    /// Transcribe the captured audio, then synthesize the AI rendition
    fn run_pipeline(&mut self) -> Result<RoundPhase> {
        let audio = self
            .session
            .real_audio
            .clone()
            .ok_or_else(|| VoiceoffError::Input("no audio captured".to_string()))?;

        self.session.phase = RoundPhase::Transcribing;
        let text = self.transcriber.transcribe(&audio)?;
        debug!("Transcribed: '{}'", text);
        self.session.transcribed_text = Some(text.clone());

        if text.trim().chars().filter(|c| !c.is_whitespace()).count() < MIN_TRANSCRIPT_CHARS {
            warn!("No usable speech in transcription ('{}')", text.trim());
            self.session.phase = RoundPhase::Invalid;
            return Ok(RoundPhase::Invalid);
        }

        self.session.phase = RoundPhase::Synthesizing;
        let ai_audio = self.synthesizer.synthesize(&text, &self.voice)?;
        self.session.ai_audio = Some(ai_audio);
        self.session.phase = RoundPhase::ReadyToGuess;

        // Bind labels exactly once per round; stable until the next input
        if self.session.options.is_none() {
            let options = RoundOptions::shuffled(&mut self.rng);
            debug!("Options bound: real voice is {}", options.real_label());
            self.session.options = Some(options);
        }

        Ok(RoundPhase::ReadyToGuess)
    }

    /// Submit the player's guess for this round
    ///
    /// Only accepted once per round: a repeat submission returns the first
    /// submission's outcome without touching the score or the leaderboard.
    /// If `player` is a non-empty name, the session's cumulative counts are
    /// appended to the leaderboard.
    pub fn submit_guess(&mut self, guess: Label, player: Option<&str>) -> Result<GuessOutcome> {
        match self.session.phase {
            RoundPhase::ReadyToGuess => {}
            RoundPhase::GuessSubmitted => {
                debug!("Guess already submitted this round");
                return self
                    .session
                    .outcome
                    .clone()
                    .ok_or_else(|| VoiceoffError::Input("no recorded outcome".to_string()));
            }
            phase => {
                return Err(VoiceoffError::Input(format!(
                    "no round is ready for guessing (phase {:?})",
                    phase
                )));
            }
        }

        let options = self
            .session
            .options
            .ok_or_else(|| VoiceoffError::Input("options not generated".to_string()))?;

        let correct = options.is_real(guess);
        self.session.total_rounds += 1;
        if correct {
            self.session.correct_count += 1;
        }

        let outcome = GuessOutcome {
            guess,
            real_label: options.real_label(),
            correct,
            correct_count: self.session.correct_count,
            total_rounds: self.session.total_rounds,
        };
        info!(
            "Guess {} was {} ({} / {})",
            guess,
            if correct { "correct" } else { "wrong" },
            outcome.correct_count,
            outcome.total_rounds
        );

        self.session.outcome = Some(outcome.clone());
        self.session.phase = RoundPhase::GuessSubmitted;

        if let Some(name) = player {
            if !name.trim().is_empty() {
                // Persists the cumulative session counts, not this round alone
                self.leaderboard
                    .append(name, outcome.correct_count, outcome.total_rounds)?;
            }
        }

        Ok(outcome)
    }
}
