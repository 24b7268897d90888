pub mod config;
pub mod machine;
pub mod packet;
pub mod plugin;
