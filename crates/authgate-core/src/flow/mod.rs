//! Login flow lookup and per-page-load flow resolution.

pub mod initializer;
pub mod resolver;

pub use initializer::{CSRF_NODE_NAME, FlowInit, FlowInitError, initialize_flow};
pub use resolver::{
    FLOW_QUERY_PARAM, FlowResolution, FlowResolver, RedirectReason, ResolveError,
    flow_id_from_query,
};
