//! Die rolls through an injected random source.
//!
//! The domain never owns a random source. Rolls take an injected
//! `FnMut(min, max) -> i32` that yields a value in `[min, max]`, so a seeded
//! generator reproduces identical outcomes.

/// Faces on the check die.
pub const D20_FACES: i32 = 20;

/// Roll one d20. Values the source returns outside `[1, 20]` are clamped.
pub fn roll_d20<R>(rng: &mut R) -> i32
where
    R: FnMut(i32, i32) -> i32 + ?Sized,
{
    rng(1, D20_FACES).clamp(1, D20_FACES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn roll_asks_the_source_for_one_to_twenty() {
        let mut asked = Vec::new();
        let face = roll_d20(&mut |min, max| {
            asked.push((min, max));
            14
        });
        assert_eq!(face, 14);
        assert_eq!(asked, vec![(1, 20)]);
    }

    #[test]
    fn out_of_range_source_is_clamped() {
        assert_eq!(roll_d20(&mut |_, _| 99), 20);
        assert_eq!(roll_d20(&mut |_, _| -3), 1);
    }

    #[test]
    fn seeded_rolls_reproduce() {
        let roll_sequence = |seed: u64| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut source = |min: i32, max: i32| rng.gen_range(min..=max);
            (0..20).map(|_| roll_d20(&mut source)).collect::<Vec<_>>()
        };
        let rolls = roll_sequence(7);
        assert_eq!(rolls, roll_sequence(7));
        assert!(rolls.iter().all(|face| (1..=20).contains(face)));
    }
}
