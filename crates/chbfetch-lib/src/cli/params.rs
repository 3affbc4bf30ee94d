use crate::config::FetchConfig;
use crate::manifest::Class;

#[derive(Debug, Clone)]
pub struct FetchParams {
    pub class: Class,
    pub config: FetchConfig,
}
