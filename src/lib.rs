pub mod config;
pub mod extract;
pub mod fetch;
pub mod meta;
pub mod model;
pub mod pipeline;
pub mod render;
