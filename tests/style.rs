use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use slideshow_wasm::style::{
    default_weights, MotionPicker, MotionStyle, Transition, TransitionPicker, TransitionWeight,
};

proptest! {
    #[test]
    fn narrow_viewport_never_flips(seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut picker = TransitionPicker::new(default_weights(), 3);
        for _ in 0..200 {
            prop_assert_ne!(picker.pick(true, &mut rng), Transition::Flip);
        }
    }

    #[test]
    fn no_repeat_within_history_window(seed in any::<u64>(), narrow in any::<bool>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut picker = TransitionPicker::new(default_weights(), 3);
        let mut draws: Vec<Transition> = Vec::new();
        for _ in 0..200 {
            let recent: Vec<Transition> = picker.history().collect();
            let choice = picker.pick(narrow, &mut rng);
            prop_assert!(!recent.contains(&choice), "{:?} repeated from {:?}", choice, recent);
            draws.push(choice);
        }
        for window in draws.windows(4) {
            prop_assert!(!window[1..].contains(&window[0]));
        }
    }
}

#[test]
fn history_is_bounded() {
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let mut picker = TransitionPicker::new(default_weights(), 3);
    let mut last = Vec::new();
    for _ in 0..10 {
        last.push(picker.pick(false, &mut rng));
    }
    let history: Vec<Transition> = picker.history().collect();
    assert_eq!(history, last[last.len() - 3..].to_vec());
}

#[test]
fn oversized_history_keeps_every_draw() {
    let mut picker = TransitionPicker::new(default_weights(), usize::MAX);
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    for _ in 0..20 {
        picker.pick(false, &mut rng);
    }
    assert_eq!(picker.history().count(), 20);
}

#[test]
fn falls_back_to_full_pool_when_history_covers_it() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let weights = vec![
        TransitionWeight { transition: Transition::Glow, weight: 1 },
        TransitionWeight { transition: Transition::Flip, weight: 4 },
    ];
    let mut picker = TransitionPicker::new(weights, 3);
    for _ in 0..20 {
        // flip is filtered on narrow screens and glow is always in history after the first draw
        assert_eq!(picker.pick(true, &mut rng), Transition::Glow);
    }
}

#[test]
fn empty_table_yields_fade() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let weights = vec![TransitionWeight { transition: Transition::Spin, weight: 0 }];
    let mut picker = TransitionPicker::new(weights, 3);
    assert_eq!(picker.pick(false, &mut rng), Transition::Fade);
}

#[test]
fn weights_shape_the_draw() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let mut picker = TransitionPicker::new(default_weights(), 0);
    let draws = 20_000;
    let fades = (0..draws)
        .filter(|_| picker.pick(false, &mut rng) == Transition::Fade)
        .count();
    let share = fades as f64 / draws as f64;
    assert!((0.27..0.33).contains(&share), "fade share {share}");
}

#[test]
fn transition_names_match_css() {
    assert_eq!(Transition::SlideLeft.class(), "t-slide-left");
    assert_eq!(Transition::Fade.name(), "fade");
    let parsed: Transition = serde_json::from_str("\"slide-right\"").unwrap();
    assert_eq!(parsed, Transition::SlideRight);
    let total: u32 = default_weights().iter().map(|w| w.weight).sum();
    assert_eq!(total, 100);
}

#[test]
fn motion_reroll_makes_repeats_rare_but_possible() {
    let mut rng = ChaCha8Rng::seed_from_u64(21);
    let mut picker = MotionPicker::new();
    let mut previous = picker.pick(&mut rng);
    let mut repeats = 0;
    let draws = 6000;
    for _ in 0..draws {
        let next = picker.pick(&mut rng);
        if next == previous {
            repeats += 1;
        }
        previous = next;
    }
    // one re-roll: 1/36 instead of 1/6
    let share = f64::from(repeats) / f64::from(draws);
    assert!(repeats > 0);
    assert!(share < 0.06, "repeat share {share}");
    assert_eq!(picker.last(), Some(previous));
}

#[test]
fn motion_styles_have_distinct_keyframes() {
    let mut names: Vec<&str> = MotionStyle::ALL.iter().map(|m| m.animation_name()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), MotionStyle::ALL.len());
}
