pub mod init;
pub mod seed;
pub mod serve;
pub mod stats;
