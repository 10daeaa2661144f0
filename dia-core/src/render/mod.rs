pub(crate) mod blend;
pub(crate) mod chain;
pub(crate) mod compositor;
pub(crate) mod fit;
