pub mod classification;
pub mod config;
pub mod forms;
pub mod score;
pub mod supplier;

pub use classification::*;
pub use config::{ClassificationSettings, Config};
pub use score::*;
pub use supplier::*;

/// Categorical answer with a fixed set of string codes
pub trait Categorical: Sized + Copy + 'static {
    /// Every value, in declaration order
    const ALL: &'static [Self];

    /// Code used on forms and in database columns
    fn as_str(&self) -> &'static str;

    fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == code)
    }
}
