use crate::mdp::StateId;
use ndarray::{Array1, Zip};

/// Expected discounted return per state, indexed by [`StateId`].
///
/// States past the end of the table read as 0, so a partially filled table can
/// seed a solver.
#[derive(Debug, Clone, PartialEq)]
pub struct Utilities {
    values: Array1<f64>,
}

impl Utilities {
    pub fn zeros(len: usize) -> Self {
        Self {
            values: Array1::zeros(len),
        }
    }

    pub fn from_vec(values: Vec<f64>) -> Self {
        Self {
            values: Array1::from(values),
        }
    }

    /// Builds a table from explicit entries; states not mentioned are 0.
    ///
    /// # Panics
    ///
    /// The table is dense, so it panics when a table reaching the largest
    /// state index cannot be allocated.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (StateId, f64)>) -> Self {
        let pairs: Vec<_> = pairs.into_iter().collect();
        let len = pairs
            .iter()
            .map(|(s, _)| s.index().saturating_add(1))
            .max()
            .unwrap_or(0);
        let mut values = Array1::zeros(len);
        for (state, value) in pairs {
            values[state.index()] = value;
        }
        Self { values }
    }

    pub(crate) fn from_fn(len: usize, f: impl FnMut(usize) -> f64) -> Self {
        Self {
            values: Array1::from_shape_fn(len, f),
        }
    }

    /// Same values, padded with zeros or cut to `len` entries.
    pub fn resized(&self, len: usize) -> Self {
        Self::from_fn(len, |i| self.values.get(i).copied().unwrap_or(0.0))
    }

    pub fn get(&self, state: StateId) -> f64 {
        self.values.get(state.index()).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StateId, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(i, v)| (StateId::new(i), *v))
    }

    pub fn as_array(&self) -> &Array1<f64> {
        &self.values
    }

    /// Largest absolute per-state difference. Missing entries count as 0.
    pub fn max_difference(&self, other: &Utilities) -> f64 {
        if self.len() == other.len() {
            return Zip::from(&self.values)
                .and(&other.values)
                .fold(0.0, |acc: f64, a: &f64, b: &f64| acc.max((a - b).abs()));
        }
        let len = self.len().max(other.len());
        (0..len)
            .map(StateId::new)
            .map(|s| (self.get(s) - other.get(s)).abs())
            .fold(0.0, f64::max)
    }
}
