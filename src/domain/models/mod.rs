mod analysis;
mod diagnosis;
mod provider;

pub use analysis::*;
pub use diagnosis::*;
pub use provider::*;
