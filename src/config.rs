//! Slideshow settings, read from the JSON block embedded in the page.

use serde::{Deserialize, Serialize};

use crate::error::{SlideshowError, SlideshowResult};
use crate::style::{default_weights, Transition, TransitionWeight};

/// Largest accepted weight for a single transition.
pub const MAX_TRANSITION_WEIGHT: u32 = 1000;

/// What happens once the last slide has been shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoopMode {
    /// Reshuffle and start over, forever.
    #[default]
    Continuous,
    /// Let the last slide play its full duration, then pause.
    Once,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SlideshowConfig {
    /// Image locators, treated as opaque strings.
    pub slides: Vec<String>,
    /// Length of one full pass; split evenly across the slides.
    pub total_show_ms: u32,
    /// Transition window at the end of each slide.
    pub fade_ms: u32,
    /// Slack after a transition before its transient tags are removed.
    pub cleanup_margin_ms: u32,
    /// Viewports at or below this width count as narrow.
    pub narrow_breakpoint_px: u32,
    /// How many recent transitions are avoided.
    pub history_len: usize,
    pub loop_mode: LoopMode,
    /// Shuffle before the first slide is shown.
    pub shuffle_on_start: bool,
    /// Fixed seed for reproducible ordering and effects.
    pub seed: Option<u64>,
    pub transitions: Vec<TransitionWeight>,
}

impl Default for SlideshowConfig {
    fn default() -> Self {
        Self {
            slides: Vec::new(),
            total_show_ms: 120_000,
            fade_ms: 1200,
            cleanup_margin_ms: 60,
            narrow_breakpoint_px: 820,
            history_len: 3,
            loop_mode: LoopMode::Continuous,
            shuffle_on_start: true,
            seed: None,
            transitions: default_weights(),
        }
    }
}

impl SlideshowConfig {
    pub fn from_json(json: &str) -> SlideshowResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> SlideshowResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Display duration of a single slide.
    pub fn slide_ms(&self) -> u32 {
        let count = self.slides.len().max(1) as f64;
        (f64::from(self.total_show_ms) / count).round() as u32
    }

    pub fn validate(&self) -> SlideshowResult<()> {
        if self.total_show_ms == 0 {
            return Err(SlideshowError::Config("totalShowMs must be positive".into()));
        }
        if !self.slides.is_empty() && self.fade_ms >= self.slide_ms() {
            return Err(SlideshowError::Config(format!(
                "fadeMs ({}) must be shorter than the per-slide duration ({}ms)",
                self.fade_ms,
                self.slide_ms()
            )));
        }
        if self.cleanup_margin_ms > self.total_show_ms {
            return Err(SlideshowError::Config(format!(
                "cleanupMarginMs ({}) must not exceed totalShowMs ({})",
                self.cleanup_margin_ms, self.total_show_ms
            )));
        }
        if self.history_len >= Transition::ALL.len() {
            return Err(SlideshowError::Config(format!(
                "historyLen ({}) must be below the number of transitions ({})",
                self.history_len,
                Transition::ALL.len()
            )));
        }
        if let Some(w) = self
            .transitions
            .iter()
            .find(|w| w.weight > MAX_TRANSITION_WEIGHT)
        {
            return Err(SlideshowError::Config(format!(
                "weight {} for {} exceeds {MAX_TRANSITION_WEIGHT}",
                w.weight,
                w.transition.name()
            )));
        }
        Ok(())
    }
}
