pub mod help;
pub mod delete_confirmation;
