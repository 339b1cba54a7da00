//! Pipeline stages.

use serde::{Deserialize, Serialize};

/// One state of the orchestrator's state machine, in execution order.
///
/// `Failed` is not a stage: it is a terminal [`JobStatus`](crate::JobStatus)
/// that records which stage failed.
///
/// # Examples
///
/// ```
/// use fresco_core::Stage;
///
/// assert_eq!(Stage::Cleaning.next(), Some(Stage::Scripting));
/// assert_eq!(Stage::Done.next(), None);
/// assert_eq!(Stage::Narrating.to_string(), "narrating");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    /// Wipe scratch image/audio directories
    Cleaning,
    /// Generate and persist the script
    Scripting,
    /// One image per visual cue
    Imaging,
    /// One audio clip per narration segment
    Narrating,
    /// Compute and persist subtitle cues
    Timing,
    /// Compose and encode the video
    Assembling,
    /// Move the video into the publish directory
    Publishing,
    /// Finished successfully
    Done,
}

impl Stage {
    /// The stage that follows this one, or `None` after `Done`.
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Cleaning => Some(Stage::Scripting),
            Stage::Scripting => Some(Stage::Imaging),
            Stage::Imaging => Some(Stage::Narrating),
            Stage::Narrating => Some(Stage::Timing),
            Stage::Timing => Some(Stage::Assembling),
            Stage::Assembling => Some(Stage::Publishing),
            Stage::Publishing => Some(Stage::Done),
            Stage::Done => None,
        }
    }
}
