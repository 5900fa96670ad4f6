pub(crate) mod appeals;
pub(crate) mod auth;
pub(crate) mod dashboards;
pub(crate) mod errors;
pub(crate) mod guards;
pub(crate) mod handlers;
pub(crate) mod pagination;
pub(crate) mod papers;
pub(crate) mod reviews;
pub(crate) mod router;
pub(crate) mod validation;
