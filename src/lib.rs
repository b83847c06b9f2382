pub mod cli;
pub mod config;
pub mod credentials;
pub mod error;
pub mod portal;
pub mod reporter;
pub mod status;
pub mod submit;
pub mod tally;
pub mod util;
