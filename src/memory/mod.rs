//! Variable and array namespace
//!
//! One flat table for the whole run: no block scoping, no shadowing and no
//! function frames. A variable declared inside a loop body is the same
//! variable everywhere else in `main`, and re-declaring a name overwrites it.
//!
//! All values are `f64`. Integer display truncates toward zero at output
//! time; nothing is truncated on store.

use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Default)]
pub struct Namespace {
    scalars: FxHashMap<String, f64>,
    arrays: FxHashMap<String, Vec<f64>>,
}

impl Namespace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares (or re-declares) a scalar.
    pub fn declare(&mut self, name: &str, value: f64) {
        self.scalars.insert(name.to_string(), value);
    }

    /// Assigns a scalar, declaring it implicitly if needed.
    pub fn set(&mut self, name: &str, value: f64) {
        self.declare(name, value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.scalars.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.scalars.contains_key(name)
    }

    /// Number of scalar variables currently known
    pub fn scalar_count(&self) -> usize {
        self.scalars.len()
    }

    /// Declares an array of `size` elements. Missing trailing values are 0;
    /// extra values are dropped.
    pub fn declare_array(&mut self, name: &str, size: usize, values: &[f64]) {
        let mut elements = vec![0.0; size];
        for (slot, value) in elements.iter_mut().zip(values) {
            *slot = *value;
        }
        self.arrays.insert(name.to_string(), elements);
    }

    pub fn array(&self, name: &str) -> Option<&[f64]> {
        self.arrays.get(name).map(Vec::as_slice)
    }

    /// Reads `name[index]`; unknown arrays and out-of-range indices read 0.
    pub fn element(&self, name: &str, index: i64) -> f64 {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.arrays.get(name)?.get(i).copied())
            .unwrap_or(0.0)
    }

    /// Writes `name[index]`. Returns `false` (and writes nothing) for unknown
    /// arrays and out-of-range indices.
    pub fn set_element(&mut self, name: &str, index: i64, value: f64) -> bool {
        let slot = usize::try_from(index)
            .ok()
            .and_then(|i| self.arrays.get_mut(name)?.get_mut(i));
        match slot {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Scalars sorted by name
    pub fn scalars(&self) -> Vec<(&str, f64)> {
        let mut vars: Vec<(&str, f64)> = self
            .scalars
            .iter()
            .map(|(name, value)| (name.as_str(), *value))
            .collect();
        vars.sort_by(|a, b| a.0.cmp(b.0));
        vars
    }
}
