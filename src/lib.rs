pub mod audio;
pub mod catalog;
pub mod config;
pub mod event;
pub mod nav;
pub mod store;
pub mod ui;
pub mod util;
