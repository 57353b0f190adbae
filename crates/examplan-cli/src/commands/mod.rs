pub mod catalog;
pub mod config;
pub mod exam;
pub mod key;
pub mod recommend;
pub mod slots;
