pub(crate) mod frames;
pub(crate) mod lines;
pub(crate) mod title;
