pub(crate) mod catalog;
pub(crate) mod models;
pub(crate) mod severity;
pub(crate) mod types;
