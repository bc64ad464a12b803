//! Per-slide effect selection: the short transition between two slides and the slow
//! zoom/pan motion that runs for the whole display duration.

use std::collections::VecDeque;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Visual effect bridging two slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Transition {
    Fade,
    SlideLeft,
    SlideRight,
    Glow,
    Spin,
    Flip,
}

impl Transition {
    pub const ALL: [Transition; 6] = [
        Transition::Fade,
        Transition::SlideLeft,
        Transition::SlideRight,
        Transition::Glow,
        Transition::Spin,
        Transition::Flip,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Transition::Fade => "fade",
            Transition::SlideLeft => "slide-left",
            Transition::SlideRight => "slide-right",
            Transition::Glow => "glow",
            Transition::Spin => "spin",
            Transition::Flip => "flip",
        }
    }

    /// Class tag put on both layers while the transition runs.
    pub fn class(self) -> &'static str {
        match self {
            Transition::Fade => "t-fade",
            Transition::SlideLeft => "t-slide-left",
            Transition::SlideRight => "t-slide-right",
            Transition::Glow => "t-glow",
            Transition::Spin => "t-spin",
            Transition::Flip => "t-flip",
        }
    }

    /// 3D transitions are too heavy for narrow (mobile) viewports.
    pub fn is_3d(self) -> bool {
        matches!(self, Transition::Flip)
    }

    pub fn default_weight(self) -> u32 {
        match self {
            Transition::Fade => 30,
            Transition::SlideLeft | Transition::SlideRight => 20,
            Transition::Glow => 15,
            Transition::Spin => 10,
            Transition::Flip => 5,
        }
    }
}

/// One row of the transition weight table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionWeight {
    pub transition: Transition,
    pub weight: u32,
}

pub fn default_weights() -> Vec<TransitionWeight> {
    Transition::ALL
        .iter()
        .map(|&transition| TransitionWeight {
            transition,
            weight: transition.default_weight(),
        })
        .collect()
}

/// Weighted transition picker that steers away from the last few choices.
#[derive(Debug, Clone)]
pub struct TransitionPicker {
    weights: Vec<TransitionWeight>,
    history: VecDeque<Transition>,
    capacity: usize,
}

impl TransitionPicker {
    pub fn new(weights: Vec<TransitionWeight>, capacity: usize) -> Self {
        Self {
            weights,
            history: VecDeque::with_capacity(capacity.min(Transition::ALL.len())),
            capacity,
        }
    }

    /// Recently used transitions, oldest first.
    pub fn history(&self) -> impl Iterator<Item = Transition> + '_ {
        self.history.iter().copied()
    }

    /// Draw the next transition.
    ///
    /// Flip is dropped on narrow viewports, then anything in the history is excluded. If that
    /// leaves nothing, the history is ignored. An all-zero table yields `Fade`.
    pub fn pick<R: Rng + ?Sized>(&mut self, narrow: bool, rng: &mut R) -> Transition {
        let eligible: Vec<TransitionWeight> = self
            .weights
            .iter()
            .copied()
            .filter(|w| !(narrow && w.transition.is_3d()))
            .collect();

        let mut pool = expand(
            eligible
                .iter()
                .filter(|w| !self.history.contains(&w.transition)),
        );
        if pool.is_empty() {
            pool = expand(eligible.iter());
        }

        let choice = if pool.is_empty() {
            Transition::Fade
        } else {
            pool[rng.gen_range(0..pool.len())]
        };

        self.history.push_back(choice);
        while self.history.len() > self.capacity {
            self.history.pop_front();
        }
        choice
    }
}

fn expand<'a>(weights: impl Iterator<Item = &'a TransitionWeight>) -> Vec<Transition> {
    let mut pool = Vec::new();
    for w in weights {
        pool.extend(std::iter::repeat(w.transition).take(w.weight as usize));
    }
    pool
}

/// Continuous camera motion applied for the full slide duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionStyle {
    Center,
    PanLeft,
    PanRight,
    PanUp,
    PanDown,
    Tilt,
}

impl MotionStyle {
    pub const ALL: [MotionStyle; 6] = [
        MotionStyle::Center,
        MotionStyle::PanLeft,
        MotionStyle::PanRight,
        MotionStyle::PanUp,
        MotionStyle::PanDown,
        MotionStyle::Tilt,
    ];

    /// CSS keyframes name driving this motion.
    pub fn animation_name(self) -> &'static str {
        match self {
            MotionStyle::Center => "kb-center",
            MotionStyle::PanLeft => "kb-pan-left",
            MotionStyle::PanRight => "kb-pan-right",
            MotionStyle::PanUp => "kb-pan-up",
            MotionStyle::PanDown => "kb-pan-down",
            MotionStyle::Tilt => "kb-tilt",
        }
    }
}

/// Uniform motion picker with a single re-roll against immediate repeats.
#[derive(Debug, Clone, Default)]
pub struct MotionPicker {
    last: Option<MotionStyle>,
}

impl MotionPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<MotionStyle> {
        self.last
    }

    /// Best effort only: the re-roll is accepted even if it repeats again.
    pub fn pick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> MotionStyle {
        let styles = &MotionStyle::ALL;
        let mut choice = styles[rng.gen_range(0..styles.len())];
        if Some(choice) == self.last && styles.len() > 1 {
            choice = styles[rng.gen_range(0..styles.len())];
        }
        self.last = Some(choice);
        choice
    }
}
