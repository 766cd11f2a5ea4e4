//! Internal constants for diagram extraction.

/// Number of lines above an opening fence searched for a heading title.
pub const TITLE_LOOKBACK: usize = 5;

/// Prefix of synthesized titles (`"Diagram 1"`, `"Diagram 2"`, ...).
pub const SYNTHESIZED_TITLE_PREFIX: &str = "Diagram";
