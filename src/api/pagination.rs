use serde::Deserialize;

pub(crate) const fn default_limit() -> usize {
    100
}

const fn default_skip() -> usize {
    0
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListQuery {
    #[serde(default = "default_skip")]
    pub(crate) skip: usize,
    #[serde(default = "default_limit")]
    pub(crate) limit: usize,
}
