pub mod config_io;
pub mod seed;
pub mod seed_worker;
