mod common;
mod export;
mod pipeline;
