mod item;

pub use item::DiceTerm;

use crate::error::Error;
use crate::parser::Parser;
use crate::parser::TermMatch;
use crate::roll::Explode;
use crate::roll::RegistrySource;
use crate::roll::Source;
use std::str::FromStr;

/// Signed dice groups plus a constant, e.g. `2d6+1d4-3`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RollQuery {
    items: Vec<DiceTerm>,
    constant: i64,
}

impl RollQuery {
    /// Empty query worth zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<DiceTerm>, constant: i64) -> Self {
        RollQuery { items, constant }
    }

    /// Parse dice notation, `None` for anything else
    pub fn parse(text: &str) -> Option<Self> {
        let terms = Parser::terms(text)?;
        let mut query = RollQuery::new();
        for term in terms {
            if term.is_constant() {
                query.constant = query.constant.checked_add(Self::constant_of(&term)?)?;
            } else {
                query.items.push(Self::dice_of(&term)?);
            }
        }
        Some(query)
    }

    fn constant_of(term: &TermMatch) -> Option<i64> {
        let value = term.sides.parse::<i64>().ok()?;
        Some(if term.is_negative() { -value } else { value })
    }

    fn dice_of(term: &TermMatch) -> Option<DiceTerm> {
        let count = match term.count {
            Some("") | None => 1,
            Some(count) => count.parse::<u64>().ok()?,
        };
        let sides = term.sides.parse::<u64>().ok()?;
        match DiceTerm::with_sign(count, sides, term.is_negative()) {
            Ok(item) => Some(item),
            Err(error) => {
                tracing::debug!(%error, "rejected dice term");
                None
            }
        }
    }

    pub fn push(&mut self, item: DiceTerm) -> &mut Self {
        self.items.push(item);
        self
    }

    pub fn add_constant(&mut self, constant: i64) -> &mut Self {
        self.constant = self.constant.saturating_add(constant);
        self
    }

    pub fn items(&self) -> &[DiceTerm] {
        &self.items
    }

    pub fn constant(&self) -> i64 {
        self.constant
    }

    /// Lowest total of the dice alone
    pub fn min_nat(&self) -> i64 {
        self.items
            .iter()
            .map(DiceTerm::min)
            .fold(0, i64::saturating_add)
    }

    /// Lowest total, saturating at the `i64` limits
    pub fn min(&self) -> i64 {
        self.min_nat().saturating_add(self.constant)
    }

    /// Highest total of the dice alone
    pub fn max_nat(&self) -> i64 {
        self.items
            .iter()
            .map(DiceTerm::max)
            .fold(0, i64::saturating_add)
    }

    /// Highest total, saturating at the `i64` limits
    pub fn max(&self) -> i64 {
        self.max_nat().saturating_add(self.constant)
    }

    /// Dice total of the last roll, `None` while any term is unrolled
    pub fn last_nat(&self) -> Option<i64> {
        self.items.iter().map(DiceTerm::last_value).sum()
    }

    pub fn last_value(&self) -> Option<i64> {
        self.last_nat().map(|natural| natural + self.constant)
    }

    pub fn roll(&mut self, explode: impl Into<Explode>) -> i64 {
        self.roll_with_source(explode, &mut RegistrySource)
    }

    pub fn roll_with_source<S: Source + ?Sized>(
        &mut self,
        explode: impl Into<Explode>,
        source: &mut S,
    ) -> i64 {
        let explode = explode.into();
        self.items
            .iter_mut()
            .fold(self.constant, |total, item| {
                total + item.roll_with_source(explode, source)
            })
    }

    pub fn roll_advantage(&mut self, explode: impl Into<Explode>) -> i64 {
        self.roll_advantage_with_source(explode, &mut RegistrySource)
    }

    pub fn roll_advantage_with_source<S: Source + ?Sized>(
        &mut self,
        explode: impl Into<Explode>,
        source: &mut S,
    ) -> i64 {
        let explode = explode.into();
        self.items
            .iter_mut()
            .fold(self.constant, |total, item| {
                total + item.roll_advantage_with_source(explode, source)
            })
    }

    pub fn roll_disadvantage(&mut self, explode: impl Into<Explode>) -> i64 {
        self.roll_disadvantage_with_source(explode, &mut RegistrySource)
    }

    pub fn roll_disadvantage_with_source<S: Source + ?Sized>(
        &mut self,
        explode: impl Into<Explode>,
        source: &mut S,
    ) -> i64 {
        let explode = explode.into();
        self.items
            .iter_mut()
            .fold(self.constant, |total, item| {
                total + item.roll_disadvantage_with_source(explode, source)
            })
    }
}

impl FromStr for RollQuery {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| Error::InvalidNotation(s.to_owned()))
    }
}

impl std::fmt::Display for RollQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut items = self.items.iter();
        match items.next() {
            Some(first) => write!(f, "{first}")?,
            None => return write!(f, "{}", self.constant),
        }
        items.try_for_each(|item| write!(f, "{item:#}"))?;
        if self.constant != 0 {
            write!(f, "{:+}", self.constant)?;
        }
        Ok(())
    }
}
