//! Playlist ordering: shuffled once per loop, walked one slide at a time.

use rand::seq::SliceRandom;
use rand::Rng;

/// Outcome of stepping the playlist forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Moved to the given index within the current order.
    Next(usize),
    /// Ran past the end: the order was reshuffled and the index is back at 0.
    Looped,
}

/// Owns the playlist order and the current slide index.
#[derive(Debug, Clone)]
pub struct Sequencer {
    slides: Vec<String>,
    index: usize,
}

impl Sequencer {
    pub fn new(slides: Vec<String>) -> Self {
        Self { slides, index: 0 }
    }

    /// Unbiased Fisher-Yates permutation of the whole playlist.
    pub fn reshuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.slides.shuffle(rng);
    }

    /// Step to the next slide, reshuffling at the loop boundary. `None` for an empty playlist.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Step> {
        if self.slides.is_empty() {
            return None;
        }
        let next = self.index + 1;
        if next >= self.slides.len() {
            self.reshuffle(rng);
            self.index = 0;
            Some(Step::Looped)
        } else {
            self.index = next;
            Some(Step::Next(next))
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// One-based position as shown in the counter.
    pub fn position(&self) -> usize {
        self.index + 1
    }

    pub fn current(&self) -> Option<&str> {
        self.slides.get(self.index).map(String::as_str)
    }

    pub fn is_last(&self) -> bool {
        !self.slides.is_empty() && self.index == self.slides.len() - 1
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn slides(&self) -> &[String] {
        &self.slides
    }
}
