//! Round option labels and their binding to audio clips

use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// One of the two fixed option labels presented to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    A,
    B,
}

impl Label {
    /// The other label
    pub fn other(self) -> Label {
        match self {
            Label::A => Label::B,
            Label::B => Label::A,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::A => write!(f, "A"),
            Label::B => write!(f, "B"),
        }
    }
}

impl FromStr for Label {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" | "a" => Ok(Label::A),
            "B" | "b" => Ok(Label::B),
            other => Err(format!("'{}' is not a valid option (A or B)", other)),
        }
    }
}

/// The randomized label assignment for one round
///
/// Exactly two labels, one bound to the real voice and one to the AI voice.
/// Generated once per round by a fair shuffle and immutable until the next
/// audio input starts a new round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundOptions {
    /// Labels in their shuffled presentation order
    order: [Label; 2],
}

impl RoundOptions {
    /// Generate a fresh assignment with a uniformly random permutation
    ///
    /// The first label in the shuffled order is bound to the real voice,
    /// the second to the AI voice, so each label is real with probability
    /// one half.
    pub fn shuffled<R: Rng>(rng: &mut R) -> Self {
        let mut order = [Label::A, Label::B];
        order.shuffle(rng);
        Self { order }
    }

    /// Labels in their shuffled presentation order
    pub fn order(&self) -> [Label; 2] {
        self.order
    }

    /// The label bound to the player's real voice
    pub fn real_label(&self) -> Label {
        self.order[0]
    }

    /// The label bound to the synthesized voice
    pub fn ai_label(&self) -> Label {
        self.order[1]
    }

    /// Is this label bound to the real voice?
    pub fn is_real(&self, label: Label) -> bool {
        label == self.real_label()
    }
}
