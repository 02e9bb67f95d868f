pub mod config;
pub mod errors;
pub mod linear;
pub mod lintree_config;
pub mod logging;
pub mod state;
pub mod tracker;
pub mod tree;
pub mod ui;
