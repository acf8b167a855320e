pub mod normal_mode;
pub mod insert_mode;
pub mod command_mode;
