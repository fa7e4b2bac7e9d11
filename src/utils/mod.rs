pub(crate) mod interner;
pub(crate) mod path;
pub(crate) mod sym;
