//! Color list operations — dedup, random generation, similarity sort.
//!
//! These are the steps between "the scanner found some colors" and
//! "the UI shows a tidy row of controls": drop exact duplicates, then
//! chain the survivors so adjacent swatches look related.

use std::collections::HashSet;

use crate::model::Hsl;
use crate::rng::Xorshift32;

// ─── Dedup ───────────────────────────────────────────────────────────────────

/// Remove exact-triple duplicates from a color list.
///
/// Two colors are duplicates iff all three components are equal.
/// First occurrences are kept in their original order. (The upstream
/// behavior left post-dedup order unspecified; keeping input order is
/// the strictest choice that satisfies it, and the similarity sort
/// usually runs right after anyway.)
#[must_use]
pub fn remove_duplicate_colors(colors: &[Hsl]) -> Vec<Hsl> {
    let mut seen = HashSet::with_capacity(colors.len());
    colors
        .iter()
        .copied()
        .filter(|c| seen.insert(*c))
        .collect()
}

// ─── Random ──────────────────────────────────────────────────────────────────

/// Generate a uniform random color: `h ∈ [0, 360)`, `s, l ∈ [0, 100)`.
///
/// The generator is a parameter so callers that need reproducible
/// output (tests, demos) can pin the seed.
#[must_use]
pub fn random_hsl_color(rng: &mut Xorshift32) -> Hsl {
    Hsl {
        h: rng.next_below(360) as u16,
        s: rng.next_below(100) as u8,
        l: rng.next_below(100) as u8,
    }
}

// ─── Similarity sort ─────────────────────────────────────────────────────────

/// Distance between two colors in normalized HSL space.
///
/// Hue distance is circular (shortest arc, max 180°) divided by 180;
/// saturation and lightness differences are divided by 100. Euclidean
/// norm over the three. The hue divisor stays at 180 — that is what
/// the reference behavior computes, whatever its comments claimed
/// about a 0–2 range.
#[must_use]
pub fn color_distance(a: Hsl, b: Hsl) -> f64 {
    let hue_gap = f64::from(a.h.abs_diff(b.h));
    let dh = hue_gap.min(360.0 - hue_gap) / 180.0;
    let ds = f64::from(a.s.abs_diff(b.s)) / 100.0;
    let dl = f64::from(a.l.abs_diff(b.l)) / 100.0;
    dh.mul_add(dh, ds.mul_add(ds, dl * dl)).sqrt()
}

/// Reorder colors so adjacent entries are perceptually close.
///
/// Greedy nearest-neighbor chaining: seed with the first input color,
/// then repeatedly pull the remaining color closest to the last placed
/// one. Ties go to the lowest remaining index, which keeps the output
/// reproducible. This is an open-path TSP heuristic, not an optimum —
/// O(n²) and entirely adequate for hand-entered color counts.
#[must_use]
pub fn sort_similar_colors(colors: &[Hsl]) -> Vec<Hsl> {
    let Some((&first, rest)) = colors.split_first() else {
        return Vec::new();
    };

    let mut result = Vec::with_capacity(colors.len());
    result.push(first);
    let mut remaining: Vec<Hsl> = rest.to_vec();

    while !remaining.is_empty() {
        let last = result[result.len() - 1];

        let mut closest_index = 0;
        let mut closest_distance = color_distance(last, remaining[0]);
        for (i, &candidate) in remaining.iter().enumerate().skip(1) {
            let d = color_distance(last, candidate);
            // Strict `<` keeps the lowest index on ties.
            if d < closest_distance {
                closest_distance = d;
                closest_index = i;
            }
        }

        result.push(remaining.remove(closest_index));
    }

    result
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    // ── remove_duplicate_colors ─────────────────────────────────────────

    #[test]
    fn exact_duplicates_removed() {
        let colors = [
            Hsl::new(10, 20, 30),
            Hsl::new(10, 20, 30),
            Hsl::new(40, 50, 60),
        ];
        let unique = remove_duplicate_colors(&colors);
        assert_eq!(unique, vec![Hsl::new(10, 20, 30), Hsl::new(40, 50, 60)]);
    }

    #[test]
    fn near_duplicates_are_kept() {
        let colors = [Hsl::new(10, 20, 30), Hsl::new(10, 20, 31)];
        assert_eq!(remove_duplicate_colors(&colors).len(), 2);
    }

    #[test]
    fn dedup_empty_list() {
        assert!(remove_duplicate_colors(&[]).is_empty());
    }

    #[test]
    fn dedup_keeps_first_occurrence_order() {
        let colors = [
            Hsl::new(40, 50, 60),
            Hsl::new(10, 20, 30),
            Hsl::new(40, 50, 60),
            Hsl::new(10, 20, 30),
        ];
        assert_eq!(
            remove_duplicate_colors(&colors),
            vec![Hsl::new(40, 50, 60), Hsl::new(10, 20, 30)]
        );
    }

    // ── random_hsl_color ────────────────────────────────────────────────

    #[test]
    fn random_color_stays_in_range() {
        let mut rng = Xorshift32::new(42);
        for _ in 0..1000 {
            let c = random_hsl_color(&mut rng);
            assert!(c.h < 360);
            assert!(c.s < 100);
            assert!(c.l < 100);
        }
    }

    #[test]
    fn random_color_is_deterministic_per_seed() {
        let mut a = Xorshift32::new(7);
        let mut b = Xorshift32::new(7);
        for _ in 0..20 {
            assert_eq!(random_hsl_color(&mut a), random_hsl_color(&mut b));
        }
    }

    // ── color_distance ──────────────────────────────────────────────────

    #[test]
    fn distance_to_self_is_zero() {
        let c = Hsl::new(220, 55, 50);
        assert!(color_distance(c, c) < 1e-12);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Hsl::new(10, 80, 40);
        let b = Hsl::new(350, 20, 60);
        assert!((color_distance(a, b) - color_distance(b, a)).abs() < 1e-12);
    }

    #[test]
    fn hue_distance_wraps_around_the_wheel() {
        // 10° and 350° are 20° apart, not 340°.
        let near = color_distance(Hsl::new(10, 50, 50), Hsl::new(350, 50, 50));
        let far = color_distance(Hsl::new(10, 50, 50), Hsl::new(180, 50, 50));
        assert!(near < far);
        assert!((near - 20.0 / 180.0).abs() < 1e-12);
    }

    #[test]
    fn opposite_hues_hit_the_divisor_ceiling() {
        // Max circular hue distance is 180°, normalized to exactly 1.
        let d = color_distance(Hsl::new(0, 50, 50), Hsl::new(180, 50, 50));
        assert!((d - 1.0).abs() < 1e-12);
    }

    // ── sort_similar_colors ─────────────────────────────────────────────

    #[test]
    fn empty_input_empty_output() {
        assert_eq!(sort_similar_colors(&[]), Vec::<Hsl>::new());
    }

    #[test]
    fn singleton_is_returned_unchanged() {
        let c = Hsl::new(220, 55, 50);
        assert_eq!(sort_similar_colors(&[c]), vec![c]);
    }

    #[test]
    fn output_is_a_permutation_of_input() {
        let colors = [
            Hsl::new(0, 100, 50),
            Hsl::new(240, 100, 50),
            Hsl::new(10, 100, 50),
            Hsl::new(250, 100, 50),
        ];
        let mut sorted = sort_similar_colors(&colors);
        assert_eq!(sorted.len(), colors.len());
        sorted.sort_by_key(|c| (c.h, c.s, c.l));
        let mut input = colors.to_vec();
        input.sort_by_key(|c| (c.h, c.s, c.l));
        assert_eq!(sorted, input);
    }

    #[test]
    fn chains_nearest_neighbors() {
        // Seeded at red; the nearby red shade comes first. From hue 10
        // the circular distance to 250 is 120° (wrapping past 0) versus
        // 130° to 240, so the chain reaches 250 before 240.
        let colors = [
            Hsl::new(0, 100, 50),
            Hsl::new(240, 100, 50),
            Hsl::new(10, 100, 50),
            Hsl::new(250, 100, 50),
        ];
        let sorted = sort_similar_colors(&colors);
        assert_eq!(
            sorted,
            vec![
                Hsl::new(0, 100, 50),
                Hsl::new(10, 100, 50),
                Hsl::new(250, 100, 50),
                Hsl::new(240, 100, 50),
            ]
        );
    }

    #[test]
    fn ties_pick_the_lowest_remaining_index() {
        // Both candidates are 10° from the seed; input order decides.
        let colors = [
            Hsl::new(180, 50, 50),
            Hsl::new(190, 50, 50),
            Hsl::new(170, 50, 50),
        ];
        let sorted = sort_similar_colors(&colors);
        assert_eq!(sorted[1], Hsl::new(190, 50, 50));
        assert_eq!(sorted[2], Hsl::new(170, 50, 50));
    }

    #[test]
    fn idempotent_on_a_sorted_chain() {
        let chain = [
            Hsl::new(0, 100, 50),
            Hsl::new(20, 100, 50),
            Hsl::new(60, 100, 50),
            Hsl::new(140, 100, 50),
        ];
        let once = sort_similar_colors(&chain);
        let twice = sort_similar_colors(&once);
        assert_eq!(once, twice);
        assert_eq!(once, chain.to_vec());
    }

    #[test]
    fn full_pipeline_scan_dedup_sort() {
        let found = crate::find_colors("#f00 #00f #ff0000 #0000ee");
        let unique = remove_duplicate_colors(&found);
        let sorted = sort_similar_colors(&unique);
        // #f00 and #ff0000 collapse to one red; red's neighbor chain
        // then walks through the two blues.
        assert_eq!(sorted.len(), 3);
        assert_eq!(sorted[0], Hsl::new(0, 100, 50));
    }
}
