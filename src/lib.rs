pub mod config;
pub mod ingest;
pub mod job;
pub mod mapper;
pub mod model;
pub mod observer;
pub mod pacing;
pub mod sofascore;
