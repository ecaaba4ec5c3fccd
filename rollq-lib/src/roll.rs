mod explode;
mod result;
mod source;

pub use explode::Explode;
pub use result::MultiRollResult;
pub use result::RollResult;
pub use source::default_roll_method;
pub use source::get_roll_method;
pub use source::set_roll_method;
pub use source::RandomSource;
pub use source::RegistrySource;
pub use source::RollMethod;
pub use source::Source;

use crate::error::Result;
use crate::validate;

/// Draw one accepted face, re-drawing while the explode rule triggers
fn draw_slot<S: Source + ?Sized>(sides: u64, explode: Explode, source: &mut S) -> u64 {
    loop {
        let face = source.throw(sides);
        if !explode.triggers(face, sides) {
            return face;
        }
        tracing::trace!(face, sides, %explode, "face exploded, drawing again");
    }
}

/// Roll `count` dice without validating the arguments
pub(crate) fn raw_roll<S: Source + ?Sized>(
    count: u64,
    sides: u64,
    explode: Explode,
    source: &mut S,
) -> RollResult {
    let explode = explode.resolve(sides);
    let raw: Vec<u64> = (0..count)
        .map(|_| draw_slot(sides, explode, source))
        .collect();
    tracing::debug!(count, sides, %explode, ?raw, "rolled dice group");
    RollResult::accepted(raw, explode)
}

/// Repeat a raw roll `repetitions` times without validating the arguments
pub(crate) fn raw_roll_multi<S: Source + ?Sized>(
    count: u64,
    sides: u64,
    repetitions: usize,
    explode: Explode,
    source: &mut S,
) -> MultiRollResult {
    MultiRollResult::accepted(
        (0..repetitions)
            .map(|_| raw_roll(count, sides, explode, source))
            .collect(),
    )
}

fn validate_dice(count: u64, sides: u64) -> Result<()> {
    validate::validate_count(count)?;
    validate::validate_sides(sides)?;
    validate::validate_total(count, sides)?;
    Ok(())
}

/// Roll `count` dice with `sides` faces using the process wide source
pub fn roll(count: u64, sides: u64, explode: impl Into<Explode>) -> Result<RollResult> {
    roll_with_source(count, sides, explode, &mut RegistrySource)
}

/// Roll `count` dice with `sides` faces using the provided source
pub fn roll_with_source<S: Source + ?Sized>(
    count: u64,
    sides: u64,
    explode: impl Into<Explode>,
    source: &mut S,
) -> Result<RollResult> {
    validate_dice(count, sides)?;
    Ok(raw_roll(count, sides, explode.into(), source))
}

/// Roll the same dice group `repetitions` times using the process wide source
pub fn roll_multi(
    count: u64,
    sides: u64,
    repetitions: usize,
    explode: impl Into<Explode>,
) -> Result<MultiRollResult> {
    roll_multi_with_source(count, sides, repetitions, explode, &mut RegistrySource)
}

/// Roll the same dice group `repetitions` times using the provided source
pub fn roll_multi_with_source<S: Source + ?Sized>(
    count: u64,
    sides: u64,
    repetitions: usize,
    explode: impl Into<Explode>,
    source: &mut S,
) -> Result<MultiRollResult> {
    validate_dice(count, sides)?;
    validate::validate_repetitions(repetitions)?;
    Ok(raw_roll_multi(
        count,
        sides,
        repetitions,
        explode.into(),
        source,
    ))
}

/// Roll twice and keep the better draw
pub fn roll_advantage(count: u64, sides: u64, explode: impl Into<Explode>) -> Result<RollResult> {
    roll_advantage_with_source(count, sides, explode, &mut RegistrySource)
}

/// Roll twice with the provided source and keep the better draw
pub fn roll_advantage_with_source<S: Source + ?Sized>(
    count: u64,
    sides: u64,
    explode: impl Into<Explode>,
    source: &mut S,
) -> Result<RollResult> {
    Ok(roll_multi_with_source(count, sides, 2, explode, source)?
        .highest()
        .clone())
}

/// Roll twice and keep the worse draw
pub fn roll_disadvantage(
    count: u64,
    sides: u64,
    explode: impl Into<Explode>,
) -> Result<RollResult> {
    roll_disadvantage_with_source(count, sides, explode, &mut RegistrySource)
}

/// Roll twice with the provided source and keep the worse draw
pub fn roll_disadvantage_with_source<S: Source + ?Sized>(
    count: u64,
    sides: u64,
    explode: impl Into<Explode>,
    source: &mut S,
) -> Result<RollResult> {
    Ok(roll_multi_with_source(count, sides, 2, explode, source)?
        .lowest()
        .clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::MockIter;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn exploding_slot_keeps_final_face() {
        let mock = vec![6, 6, 3];
        let result = roll_with_source(
            1,
            6,
            true,
            &mut MockIter {
                iter: &mut mock.into_iter(),
            },
        )
        .unwrap();
        assert_eq!(&[3], result.raw());
        assert_eq!(Explode::OnValue(6), result.explode());
    }

    #[test]
    fn exploding_each_slot() {
        let mock = vec![1, 4, 1, 1, 2, 5];
        let result = roll_with_source(
            3,
            6,
            Explode::OnValue(1),
            &mut MockIter {
                iter: &mut mock.into_iter(),
            },
        )
        .unwrap();
        assert_eq!(&[4, 2, 5], result.raw());
        assert_eq!(11, result.value());
    }

    #[test]
    fn exploding_on_range() {
        let mock = vec![5, 6, 4, 1, 6, 2];
        let result = roll_with_source(
            2,
            6,
            (6u64, 4u64),
            &mut MockIter {
                iter: &mut mock.into_iter(),
            },
        )
        .unwrap();
        assert_eq!(&[1, 2], result.raw());
        assert_eq!(Explode::InRange(4, 6), result.explode());
    }

    #[test]
    fn no_explode_takes_every_face() {
        let mock = vec![6, 6, 6];
        let result = roll_with_source(
            3,
            6,
            false,
            &mut MockIter {
                iter: &mut mock.into_iter(),
            },
        )
        .unwrap();
        assert_eq!(18, result.value());
        assert_eq!(Explode::None, result.explode());
    }

    #[test]
    fn invalid_dice_are_rejected() {
        assert!(roll(0, 6, false).unwrap_err().is_invalid_argument());
        assert!(roll(1, 1, false).unwrap_err().is_invalid_argument());
        assert!(roll_multi(1, 6, 0, false).unwrap_err().is_invalid_argument());
        assert!(roll_advantage(0, 6, false).is_err());
        assert!(roll_disadvantage(2, 0, false).is_err());
        assert!(roll(i64::MAX as u64, 2, false)
            .unwrap_err()
            .is_invalid_argument());
    }

    #[test]
    fn multi_roll_keeps_order() {
        let mock = vec![1, 2, 3, 4, 5, 6];
        let multi = roll_multi_with_source(
            2,
            6,
            3,
            false,
            &mut MockIter {
                iter: &mut mock.into_iter(),
            },
        )
        .unwrap();
        let values: Vec<u64> = multi.iter().map(|r| r.value()).collect();
        assert_eq!(vec![3, 7, 11], values);
        assert_eq!(11, multi.highest().value());
        assert_eq!(3, multi.lowest().value());
    }

    #[test]
    fn advantage_and_disadvantage_pick_from_two() {
        let mock = vec![2, 5, 4, 6];
        let best = roll_advantage_with_source(
            2,
            6,
            false,
            &mut MockIter {
                iter: &mut mock.clone().into_iter(),
            },
        )
        .unwrap();
        assert_eq!(&[4, 6], best.raw());
        let worst = roll_disadvantage_with_source(
            2,
            6,
            false,
            &mut MockIter {
                iter: &mut mock.into_iter(),
            },
        )
        .unwrap();
        assert_eq!(&[2, 5], worst.raw());
    }

    #[test]
    fn advantage_beats_disadvantage_on_average() {
        let mut generator = StdRng::seed_from_u64(42);
        let mut source = RandomSource {
            generator: &mut generator,
        };
        let trials = 2000;
        let (mut best, mut worst) = (0u64, 0u64);
        for _ in 0..trials {
            best += roll_advantage_with_source(1, 20, false, &mut source)
                .unwrap()
                .value();
            worst += roll_disadvantage_with_source(1, 20, false, &mut source)
                .unwrap()
                .value();
        }
        assert!(best > worst);
    }

    proptest! {
        #[test]
        fn value_within_bounds(count in 1..50u64, sides in 2..100u64, seed: u64) {
            let mut generator = StdRng::seed_from_u64(seed);
            let result = roll_with_source(
                count,
                sides,
                false,
                &mut RandomSource { generator: &mut generator },
            ).unwrap();
            prop_assert_eq!(count as usize, result.raw().len());
            prop_assert!(result.value() >= count);
            prop_assert!(result.value() <= count * sides);
        }

        #[test]
        fn exploded_faces_never_kept(count in 1..20u64, sides in 3..20u64, seed: u64) {
            let mut generator = StdRng::seed_from_u64(seed);
            let result = roll_with_source(
                count,
                sides,
                true,
                &mut RandomSource { generator: &mut generator },
            ).unwrap();
            prop_assert!(result.raw().iter().all(|&face| face < sides));
        }
    }
}
