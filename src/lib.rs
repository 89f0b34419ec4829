pub mod announce;
pub mod batch;
pub mod cli;
pub mod config;
pub mod decoder;
pub mod error;
pub mod io;
pub mod logging;
pub mod scan;
pub mod view;
