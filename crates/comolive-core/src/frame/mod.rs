mod query;
mod spec;

pub use query::{attribute_safe, QueryBuilder};
pub use spec::{
    alert_query, top_query, Dimension, FrameModule, FrameSpec, SPECIAL_MODULE, TOP_N,
};
