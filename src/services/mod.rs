pub(crate) mod dashboards;
pub(crate) mod documents;
pub(crate) mod fees;
pub(crate) mod wizard;
