use crate::error::Result;
use crate::roll;
use crate::roll::Explode;
use crate::roll::MultiRollResult;
use crate::roll::RegistrySource;
use crate::roll::RollResult;
use crate::roll::Source;
use crate::validate;

/// One signed `NdS` group of a roll query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiceTerm {
    count: u64,
    sides: u64,
    negative: bool,
    last_result: Option<RollResult>,
}

impl DiceTerm {
    pub fn new(count: u64, sides: u64) -> Result<Self> {
        Self::with_sign(count, sides, false)
    }

    /// New term subtracting from the query total
    pub fn negative(count: u64, sides: u64) -> Result<Self> {
        Self::with_sign(count, sides, true)
    }

    pub fn with_sign(count: u64, sides: u64, negative: bool) -> Result<Self> {
        let (count, sides) = validate::validate_total(
            validate::validate_count(count)?,
            validate::validate_sides(sides)?,
        )?;
        Ok(DiceTerm {
            count,
            sides,
            negative,
            last_result: None,
        })
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn sides(&self) -> u64 {
        self.sides
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn last_result(&self) -> Option<&RollResult> {
        self.last_result.as_ref()
    }

    fn sign(&self) -> i64 {
        if self.negative {
            -1
        } else {
            1
        }
    }

    // count * sides fits in an i64 for every constructed term
    fn raw_max(&self) -> i64 {
        (self.count * self.sides) as i64
    }

    pub fn min(&self) -> i64 {
        if self.negative {
            -self.raw_max()
        } else {
            self.count as i64
        }
    }

    pub fn max(&self) -> i64 {
        if self.negative {
            -(self.count as i64)
        } else {
            self.raw_max()
        }
    }

    /// Signed value of the last roll, `None` before the first one
    pub fn last_value(&self) -> Option<i64> {
        self.last_result
            .as_ref()
            .map(|result| result.value() as i64 * self.sign())
    }

    fn store(&mut self, result: RollResult) -> i64 {
        let value = result.value() as i64 * self.sign();
        self.last_result = Some(result);
        value
    }

    pub fn roll(&mut self, explode: impl Into<Explode>) -> i64 {
        self.roll_with_source(explode, &mut RegistrySource)
    }

    pub fn roll_with_source<S: Source + ?Sized>(
        &mut self,
        explode: impl Into<Explode>,
        source: &mut S,
    ) -> i64 {
        let result = roll::raw_roll(self.count, self.sides, explode.into(), source);
        self.store(result)
    }

    /// Roll `repetitions` times, keeping the last draw as the term result
    pub fn roll_multi(
        &mut self,
        repetitions: usize,
        explode: impl Into<Explode>,
    ) -> Result<MultiRollResult> {
        self.roll_multi_with_source(repetitions, explode, &mut RegistrySource)
    }

    pub fn roll_multi_with_source<S: Source + ?Sized>(
        &mut self,
        repetitions: usize,
        explode: impl Into<Explode>,
        source: &mut S,
    ) -> Result<MultiRollResult> {
        validate::validate_repetitions(repetitions)?;
        let multi = roll::raw_roll_multi(
            self.count,
            self.sides,
            repetitions,
            explode.into(),
            source,
        );
        self.store(multi.last().clone());
        Ok(multi)
    }

    pub fn roll_advantage(&mut self, explode: impl Into<Explode>) -> i64 {
        self.roll_advantage_with_source(explode, &mut RegistrySource)
    }

    pub fn roll_advantage_with_source<S: Source + ?Sized>(
        &mut self,
        explode: impl Into<Explode>,
        source: &mut S,
    ) -> i64 {
        let multi = roll::raw_roll_multi(self.count, self.sides, 2, explode.into(), source);
        self.store(multi.highest().clone())
    }

    pub fn roll_disadvantage(&mut self, explode: impl Into<Explode>) -> i64 {
        self.roll_disadvantage_with_source(explode, &mut RegistrySource)
    }

    pub fn roll_disadvantage_with_source<S: Source + ?Sized>(
        &mut self,
        explode: impl Into<Explode>,
        source: &mut S,
    ) -> i64 {
        let multi = roll::raw_roll_multi(self.count, self.sides, 2, explode.into(), source);
        self.store(multi.lowest().clone())
    }

    /// Stringify as `NdS`, with a leading `+` on positive terms when `force_sign`
    pub fn to_notation(&self, force_sign: bool) -> String {
        let sign = match (self.negative, force_sign) {
            (true, _) => "-",
            (false, true) => "+",
            (false, false) => "",
        };
        format!("{sign}{}d{}", self.count, self.sides)
    }
}

impl std::fmt::Display for DiceTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_notation(f.alternate()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::MockIter;

    #[test]
    fn rejects_invalid_dice() {
        assert!(DiceTerm::new(0, 6).unwrap_err().is_invalid_argument());
        assert!(DiceTerm::new(2, 1).unwrap_err().is_invalid_argument());
        assert!(DiceTerm::negative(0, 0).is_err());
        assert!(DiceTerm::new(i64::MAX as u64, 2)
            .unwrap_err()
            .is_invalid_argument());
        assert!(DiceTerm::new(1 << 63, 2).is_err());
    }

    #[test]
    fn bounds() {
        let term = DiceTerm::new(2, 6).unwrap();
        assert_eq!(2, term.min());
        assert_eq!(12, term.max());
        let term = DiceTerm::negative(2, 6).unwrap();
        assert_eq!(-12, term.min());
        assert_eq!(-2, term.max());
        let term = DiceTerm::negative(1, i64::MAX as u64).unwrap();
        assert_eq!(-i64::MAX, term.min());
        assert_eq!(-1, term.max());
    }

    #[test]
    fn roll_stores_signed_result() {
        let mut term = DiceTerm::negative(2, 6).unwrap();
        assert_eq!(None, term.last_value());
        assert!(term.last_result().is_none());
        let mock = vec![3, 4];
        let value = term.roll_with_source(
            false,
            &mut MockIter {
                iter: &mut mock.into_iter(),
            },
        );
        assert_eq!(-7, value);
        assert_eq!(Some(-7), term.last_value());
        assert_eq!(&[3, 4], term.last_result().unwrap().raw());
    }

    #[test]
    fn roll_replaces_previous_result() {
        let mut term = DiceTerm::new(1, 20).unwrap();
        let mock = vec![8, 15];
        let mut source = MockIter {
            iter: &mut mock.into_iter(),
        };
        assert_eq!(8, term.roll_with_source(false, &mut source));
        assert_eq!(15, term.roll_with_source(false, &mut source));
        assert_eq!(Some(15), term.last_value());
        assert_eq!(&[15], term.last_result().unwrap().raw());
    }

    #[test]
    fn roll_multi_keeps_last_draw() {
        let mut term = DiceTerm::new(1, 6).unwrap();
        let mock = vec![6, 1, 4];
        let multi = term
            .roll_multi_with_source(
                3,
                false,
                &mut MockIter {
                    iter: &mut mock.into_iter(),
                },
            )
            .unwrap();
        assert_eq!(3, multi.len());
        assert_eq!(Some(4), term.last_value());
        assert!(term.roll_multi(0, false).is_err());
    }

    #[test]
    fn advantage_and_disadvantage() {
        let mut term = DiceTerm::new(1, 20).unwrap();
        let mock = vec![5, 17, 5, 17];
        let mut source = MockIter {
            iter: &mut mock.into_iter(),
        };
        assert_eq!(17, term.roll_advantage_with_source(false, &mut source));
        assert_eq!(5, term.roll_disadvantage_with_source(false, &mut source));
        assert_eq!(Some(5), term.last_value());
    }

    #[test]
    fn negative_advantage_keeps_higher_draw() {
        let mut term = DiceTerm::negative(1, 20).unwrap();
        let mock = vec![5, 17];
        let value = term.roll_advantage_with_source(
            false,
            &mut MockIter {
                iter: &mut mock.into_iter(),
            },
        );
        assert_eq!(-17, value);
    }

    #[test]
    fn notation() {
        let term = DiceTerm::new(3, 8).unwrap();
        assert_eq!("3d8", term.to_string());
        assert_eq!("+3d8", format!("{term:#}"));
        let term = DiceTerm::negative(1, 4).unwrap();
        assert_eq!("-1d4", term.to_notation(false));
        assert_eq!("-1d4", term.to_notation(true));
    }
}
