mod field_aliases;
mod normalize_fragment;

pub use field_aliases::*;
pub use normalize_fragment::*;
