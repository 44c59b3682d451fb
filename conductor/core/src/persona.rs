//! Persona Narration
//!
//! Johnny Silverhand narrates what the intent router did. The line for a
//! call is fixed by the call's shape; only the trailing quip is random, and
//! it always comes from the pool of the configured [`Tone`].

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::calls::FunctionCall;
use crate::tasks::Task;

/// Quips for the restrained tone
const RESTRAINED_QUIPS: &[&str] = &[
    "Rock 'n' roll. Let's move.",
    "Consider it done, rebel.",
    "Chrome up your act, choom.",
    "Another contract burned.",
];

/// Quips for the embellished tone
const EMBELLISHED_QUIPS: &[&str] = &[
    "Another day, another corpo chore torched.",
    "Alright, samurai — let’s burn this list.",
    "Marked it. Try not to flatline this time.",
    "Gone. Like Arasaka’s ethics.",
];

/// Line for a missing or nameless call
pub const ROUTER_GLITCH_LINE: &str = "Router glitched. Showing your docket.";

/// Line for `viewTasks` on an empty list
pub const EMPTY_LIST_LINE: &str = "Your list’s emptier than a corpo promise.";

/// Narration tone
///
/// Chosen once at startup. The `restrained` cargo feature flips the default.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Clean lines
    Restrained,
    /// Spicier lines
    Embellished,
}

impl Default for Tone {
    fn default() -> Self {
        if cfg!(feature = "restrained") {
            Self::Restrained
        } else {
            Self::Embellished
        }
    }
}

impl Tone {
    /// Quip pool for this tone
    #[must_use]
    pub fn quips(self) -> &'static [&'static str] {
        match self {
            Self::Restrained => RESTRAINED_QUIPS,
            Self::Embellished => EMBELLISHED_QUIPS,
        }
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Restrained => write!(f, "restrained"),
            Self::Embellished => write!(f, "embellished"),
        }
    }
}

/// Turns function calls into persona lines
#[derive(Clone, Copy, Debug, Default)]
pub struct Narrator {
    tone: Tone,
}

impl Narrator {
    /// Create a narrator with a fixed tone
    #[must_use]
    pub fn new(tone: Tone) -> Self {
        Self { tone }
    }

    /// Narrate a call using the thread-local RNG for the quip
    #[must_use]
    pub fn narrate(&self, call: &FunctionCall, tasks: &[Task]) -> String {
        self.narrate_with(call, tasks, &mut rand::thread_rng())
    }

    /// Narrate a call, drawing the quip from `rng`
    pub fn narrate_with<R: Rng + ?Sized>(
        &self,
        call: &FunctionCall,
        tasks: &[Task],
        rng: &mut R,
    ) -> String {
        match call {
            FunctionCall::Missing => ROUTER_GLITCH_LINE.to_string(),
            FunctionCall::AddTask { description } => {
                format!("Added “{description}”. {}", self.quip(rng))
            }
            FunctionCall::CompleteTask { task_id } => {
                format!("Checked off task #{task_id}. {}", self.quip(rng))
            }
            FunctionCall::DeleteTask { task_id } => {
                format!("Deleted task #{task_id}. {}", self.quip(rng))
            }
            FunctionCall::ViewTasks => match tasks.len() {
                0 => EMPTY_LIST_LINE.to_string(),
                n => {
                    let plural = if n > 1 { "s" } else { "" };
                    format!("You’ve got {n} contract{plural} left. {}", self.quip(rng))
                }
            },
            FunctionCall::Unrecognized { .. } => format!("Done. {}", self.quip(rng)),
        }
    }

    /// Pick a quip from this tone's pool
    pub fn quip<R: Rng + ?Sized>(&self, rng: &mut R) -> &'static str {
        self.tone.quips().choose(rng).copied().unwrap_or_default()
    }
}
