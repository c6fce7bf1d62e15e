pub mod check_tool;
pub mod figure;
pub mod init_config;
pub mod run;
pub mod submit;
pub mod wiggle;
