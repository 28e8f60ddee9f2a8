use serde::{Deserialize, Serialize};

use crate::config::BackgroundConfig;
use crate::foundation::error::{ReelError, ReelResult};

/// How the looping background clip is fitted under the narration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum BackgroundPlan {
    /// Play a window of the source starting at `start_secs`.
    Cut {
        /// Offset into the source clip.
        start_secs: f64,
        /// Window length.
        duration_secs: f64,
    },
    /// Loop the source from its start until `duration_secs`.
    Loop {
        /// Total looped length.
        duration_secs: f64,
    },
}

impl BackgroundPlan {
    /// Length of background footage on the timeline.
    pub fn duration_secs(&self) -> f64 {
        match *self {
            Self::Cut { duration_secs, .. } | Self::Loop { duration_secs } => duration_secs,
        }
    }
}

/// Pick a background window for `narration_secs` of narration.
///
/// A source longer than the narration plus `min_surplus_secs` is cut at a start chosen by
/// `unit` (in `[0, 1]`) across the usable range; shorter sources loop. Either way the background
/// runs `overrun_secs` past the narration.
pub fn plan_background(
    source_secs: f64,
    narration_secs: f64,
    cfg: &BackgroundConfig,
    unit: f64,
) -> ReelResult<BackgroundPlan> {
    if !source_secs.is_finite() || source_secs <= 0.0 {
        return Err(ReelError::validation(
            "background duration must be finite and > 0",
        ));
    }
    if !narration_secs.is_finite() || narration_secs < 0.0 {
        return Err(ReelError::validation(
            "narration duration must be finite and >= 0",
        ));
    }

    let duration_secs = narration_secs + cfg.overrun_secs;
    if source_secs > narration_secs + cfg.min_surplus_secs {
        let max_start = (source_secs - (narration_secs + cfg.tail_guard_secs)).max(0.0);
        Ok(BackgroundPlan::Cut {
            start_secs: max_start * unit.clamp(0.0, 1.0),
            duration_secs,
        })
    } else {
        Ok(BackgroundPlan::Loop { duration_secs })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assemble/background.rs"]
mod tests;
