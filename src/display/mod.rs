pub mod cli_formatting;
pub mod data_formatting;

pub use cli_formatting::{format_ticket_detail, format_ticket_line};
pub use data_formatting::{format_date, format_relative, owner_label, ticket_table, user_table};
