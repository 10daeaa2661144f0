pub(crate) mod core;
pub(crate) mod error;
pub(crate) mod math;
pub(crate) mod natural;
