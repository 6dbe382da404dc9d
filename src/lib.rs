pub mod api;
pub mod cli;
pub mod core;
pub mod openai;
pub mod relay;
pub mod view;
