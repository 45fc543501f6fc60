use crate::error::{EvolveError, Result};
use rand::Rng;
use serde::Serialize;

/// A named integer gene bounded to `[minimum, maximum)`.
///
/// Construction is the only place values are repaired: a value outside the
/// range is replaced by a uniform draw from it. Parameters are never changed
/// in place; mutation builds new ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    name: String,
    maximum: i64,
    minimum: i64,
    value: i64,
}

impl Parameter {
    pub fn new<R: Rng + ?Sized>(
        name: impl Into<String>,
        minimum: i64,
        maximum: i64,
        value: i64,
        rng: &mut R,
    ) -> Result<Self> {
        let name = name.into();
        if minimum >= maximum {
            return Err(EvolveError::InvalidArgument(format!(
                "parameter {} has empty range [{}, {})",
                name, minimum, maximum
            )));
        }

        Ok(Self {
            name,
            maximum,
            minimum,
            value: repair(minimum, maximum, value, rng),
        })
    }

    /// Parameter with a uniformly random value in range
    pub fn random<R: Rng + ?Sized>(
        name: impl Into<String>,
        minimum: i64,
        maximum: i64,
        rng: &mut R,
    ) -> Result<Self> {
        let name = name.into();
        if minimum >= maximum {
            return Err(EvolveError::InvalidArgument(format!(
                "parameter {} has empty range [{}, {})",
                name, minimum, maximum
            )));
        }
        let value = rng.gen_range(minimum..maximum);
        Self::new(name, minimum, maximum, value, rng)
    }

    /// Same name and bounds, new value (repaired if out of range)
    pub fn with_value<R: Rng + ?Sized>(&self, value: i64, rng: &mut R) -> Self {
        Self {
            name: self.name.clone(),
            maximum: self.maximum,
            minimum: self.minimum,
            value: repair(self.minimum, self.maximum, value, rng),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn minimum(&self) -> i64 {
        self.minimum
    }

    pub fn maximum(&self) -> i64 {
        self.maximum
    }

    pub fn value(&self) -> i64 {
        self.value
    }
}

fn repair<R: Rng + ?Sized>(minimum: i64, maximum: i64, value: i64, rng: &mut R) -> i64 {
    if (minimum..maximum).contains(&value) {
        value
    } else {
        rng.gen_range(minimum..maximum)
    }
}
