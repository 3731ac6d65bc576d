pub mod config;
pub mod logging;

// Core modules
pub mod control;
pub mod email;
pub mod fetch;
pub mod keytool;
pub mod lookup_url;
pub mod runner;
pub mod validate;
pub mod zbase32;
