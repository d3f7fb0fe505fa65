//! Patient category assigned when a roster is merged.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Classification of a patient record by the roster it came from.
///
/// Source files never carry this value; it is attached once at merge time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Hypertensive,
    Diabetic,
}

impl Category {
    /// All categories, in roster order.
    pub const ALL: [Category; 2] = [Category::Hypertensive, Category::Diabetic];

    /// Canonical label used in tables and exports.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Hypertensive => "Hypertensive",
            Category::Diabetic => "Diabetic",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "hypertensive" | "hipertenso" | "hipertensos" => Ok(Category::Hypertensive),
            "diabetic" | "diabético" | "diabetico" | "diabéticos" | "diabeticos" => {
                Ok(Category::Diabetic)
            }
            _ => Err(ModelError::UnknownCategory {
                value: value.to_string(),
            }),
        }
    }
}
