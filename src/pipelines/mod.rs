pub(crate) mod cache;
pub(crate) mod stats;
pub(crate) mod utils;

pub mod bulk;
pub mod sentiment;
pub mod topic;
