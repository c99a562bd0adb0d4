//! The four fixed hydrometer sampling times.

use core::fmt;
use core::ops::{Index, IndexMut};

/// Elapsed settling time at which a hydrometer reading is taken.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SampleTime {
    S30,
    S60,
    S5400,
    S86400,
}

impl SampleTime {
    pub const ALL: [SampleTime; 4] = [Self::S30, Self::S60, Self::S5400, Self::S86400];

    /// Elapsed time in seconds.
    pub fn seconds(self) -> f64 {
        match self {
            Self::S30 => 30.0,
            Self::S60 => 60.0,
            Self::S5400 => 5400.0,
            Self::S86400 => 86400.0,
        }
    }

    /// Label used in column tokens and warnings, e.g. `"5400"`.
    pub fn label(self) -> &'static str {
        match self {
            Self::S30 => "30",
            Self::S60 => "60",
            Self::S5400 => "5400",
            Self::S86400 => "86400",
        }
    }

    fn index(self) -> usize {
        match self {
            Self::S30 => 0,
            Self::S60 => 1,
            Self::S5400 => 2,
            Self::S86400 => 3,
        }
    }
}

impl fmt::Display for SampleTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Exactly one value per sampling time.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct PerTime<T>([T; 4]);

impl<T> PerTime<T> {
    pub fn new(values: [T; 4]) -> Self {
        Self(values)
    }

    /// Build by evaluating `f` once per sampling time, in time order.
    pub fn from_fn(mut f: impl FnMut(SampleTime) -> T) -> Self {
        Self(SampleTime::ALL.map(&mut f))
    }

    /// Fallible variant of [`PerTime::from_fn`]; stops at the first error.
    pub fn try_from_fn<E>(mut f: impl FnMut(SampleTime) -> Result<T, E>) -> Result<Self, E> {
        let [a, b, c, d] = SampleTime::ALL;
        Ok(Self([f(a)?, f(b)?, f(c)?, f(d)?]))
    }

    pub fn iter(&self) -> impl Iterator<Item = (SampleTime, &T)> {
        SampleTime::ALL.into_iter().zip(self.0.iter())
    }

    pub fn values(&self) -> &[T; 4] {
        &self.0
    }
}

impl<T> Index<SampleTime> for PerTime<T> {
    type Output = T;

    fn index(&self, time: SampleTime) -> &T {
        &self.0[time.index()]
    }
}

impl<T> IndexMut<SampleTime> for PerTime<T> {
    fn index_mut(&mut self, time: SampleTime) -> &mut T {
        &mut self.0[time.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn times_are_ordered_and_labelled() {
        let secs: Vec<f64> = SampleTime::ALL.iter().map(|t| t.seconds()).collect();
        assert_eq!(secs, vec![30.0, 60.0, 5400.0, 86400.0]);
        assert_eq!(SampleTime::S5400.to_string(), "5400");
    }

    #[test]
    fn per_time_indexing_matches_construction_order() {
        let mut v = PerTime::from_fn(|t| t.seconds() * 2.0);
        assert_eq!(v[SampleTime::S30], 60.0);
        assert_eq!(v[SampleTime::S86400], 172_800.0);

        v[SampleTime::S60] = -1.0;
        let collected: Vec<(SampleTime, f64)> = v.iter().map(|(t, x)| (t, *x)).collect();
        assert_eq!(collected[1], (SampleTime::S60, -1.0));
    }

    #[test]
    fn try_from_fn_stops_at_first_error() {
        let mut calls = 0;
        let result: Result<PerTime<f64>, SampleTime> = PerTime::try_from_fn(|t| {
            calls += 1;
            if t == SampleTime::S60 { Err(t) } else { Ok(1.0) }
        });
        assert_eq!(result, Err(SampleTime::S60));
        assert_eq!(calls, 2);
    }
}
