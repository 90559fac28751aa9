mod analyze_opinion;

pub use analyze_opinion::*;
