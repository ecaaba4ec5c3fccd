use crate::error::Error;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Which faces make a die re-roll its slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Explode {
    #[default]
    None,
    /// Explode on the highest face of the die
    OnMax,
    /// Explode on one exact face
    OnValue(u64),
    /// Explode on any face in the inclusive range, always stored low to high
    InRange(u64, u64),
}

impl Explode {
    /// Build a range rule, normalizing the bounds order
    pub fn range(a: u64, b: u64) -> Self {
        Explode::InRange(a.min(b), a.max(b))
    }

    /// Pin `OnMax` to the face count of a concrete die
    pub fn resolve(self, sides: u64) -> Self {
        match self {
            Explode::OnMax => Explode::OnValue(sides),
            Explode::InRange(a, b) => Explode::range(a, b),
            other => other,
        }
    }

    /// Check whether a face triggers a re-roll on a die with `sides` faces
    pub fn triggers(&self, value: u64, sides: u64) -> bool {
        match *self {
            Explode::None => false,
            Explode::OnMax => value == sides,
            Explode::OnValue(v) => value == v,
            Explode::InRange(lo, hi) => (lo..=hi).contains(&value),
        }
    }
}

impl From<bool> for Explode {
    fn from(value: bool) -> Self {
        if value {
            Explode::OnMax
        } else {
            Explode::None
        }
    }
}

impl From<u64> for Explode {
    fn from(value: u64) -> Self {
        Explode::OnValue(value)
    }
}

impl From<(u64, u64)> for Explode {
    fn from((a, b): (u64, u64)) -> Self {
        Explode::range(a, b)
    }
}

impl From<RangeInclusive<u64>> for Explode {
    fn from(value: RangeInclusive<u64>) -> Self {
        Explode::range(*value.start(), *value.end())
    }
}

impl<T: Into<Explode>> From<Option<T>> for Explode {
    fn from(value: Option<T>) -> Self {
        value.map_or(Explode::None, Into::into)
    }
}

impl FromStr for Explode {
    type Err = Error;

    /// Accepts `none`, `max`, a face like `6`, or a range like `4..6`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim().to_ascii_lowercase();
        let face = |t: &str| {
            t.trim()
                .parse::<u64>()
                .map_err(|_| Error::InvalidExplode(s.to_owned()))
        };
        match text.as_str() {
            "" | "none" | "false" => Ok(Explode::None),
            "max" | "true" => Ok(Explode::OnMax),
            _ => match text.split_once("..") {
                Some((lo, hi)) => Ok(Explode::range(
                    face(lo)?,
                    face(hi.strip_prefix('=').unwrap_or(hi))?,
                )),
                None => Ok(Explode::OnValue(face(text.as_str())?)),
            },
        }
    }
}

impl std::fmt::Display for Explode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Explode::None => write!(f, "none"),
            Explode::OnMax => write!(f, "max"),
            Explode::OnValue(v) => write!(f, "{v}"),
            Explode::InRange(lo, hi) => write!(f, "{lo}..{hi}"),
        }
    }
}
