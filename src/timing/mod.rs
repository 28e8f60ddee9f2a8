pub(crate) mod rate;
pub(crate) mod words;
