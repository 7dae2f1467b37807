pub mod config;
pub mod environment;
pub mod journal;
pub mod metrics;
pub mod navigation;
pub mod preferences;
pub mod services;
pub mod storage;
pub mod tutorial;
