//! Picks the winning gesture class from classifier scores.

use handsign_hand_model::GESTURE_CLASS_COUNT;

/// Index of the highest score.
///
/// Ties go to the lowest index. NaN scores never win; if every score is
/// NaN the result is index 0.
pub fn select(scores: &[f32; GESTURE_CLASS_COUNT]) -> usize {
    select_with_score(scores).0
}

/// Like [`select`], also returning the winning score.
pub fn select_with_score(scores: &[f32; GESTURE_CLASS_COUNT]) -> (usize, f32) {
    let mut best: Option<(usize, f32)> = None;
    for (index, &score) in scores.iter().enumerate() {
        if score.is_nan() {
            continue;
        }
        match best {
            // Strictly greater keeps the first of equal maxima.
            Some((_, top)) if score <= top => {}
            _ => best = Some((index, score)),
        }
    }
    best.unwrap_or((0, scores[0]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn picks_clear_winner() {
        let mut scores = [0.0f32; GESTURE_CLASS_COUNT];
        scores[0] = 0.1;
        scores[1] = 0.9;
        scores[2] = 0.1;
        assert_eq!(select(&scores), 1);
    }

    #[test]
    fn ties_go_to_lowest_index() {
        let mut scores = [0.0f32; GESTURE_CLASS_COUNT];
        scores[7] = 2.5;
        scores[3] = 2.5;
        scores[20] = 2.5;
        assert_eq!(select_with_score(&scores), (3, 2.5));
    }

    #[test]
    fn all_equal_selects_first() {
        assert_eq!(select(&[0.25f32; GESTURE_CLASS_COUNT]), 0);
    }

    #[test]
    fn negative_logits_are_ranked() {
        let mut scores = [-10.0f32; GESTURE_CLASS_COUNT];
        scores[25] = -0.5;
        assert_eq!(select(&scores), 25);
    }

    #[test]
    fn nan_never_wins() {
        let mut scores = [0.0f32; GESTURE_CLASS_COUNT];
        scores[0] = f32::NAN;
        scores[4] = 1.0;
        assert_eq!(select(&scores), 4);
        assert_eq!(select(&[f32::NAN; GESTURE_CLASS_COUNT]), 0);
    }

    proptest! {
        #[test]
        fn unique_max_is_selected(
            scores in prop::array::uniform26(-5.0f32..5.0),
            winner in 0usize..GESTURE_CLASS_COUNT,
        ) {
            let mut scores = scores;
            scores[winner] = 10.0;
            prop_assert_eq!(select(&scores), winner);
        }

        #[test]
        fn smallest_of_tied_maxima_is_selected(
            scores in prop::array::uniform26(-5.0f32..5.0),
            tied in prop::collection::btree_set(0usize..GESTURE_CLASS_COUNT, 2..6),
        ) {
            let mut scores = scores;
            for &i in &tied {
                scores[i] = 10.0;
            }
            let lowest = *tied.iter().next().unwrap();
            prop_assert_eq!(select(&scores), lowest);
        }
    }
}
