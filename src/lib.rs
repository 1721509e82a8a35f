pub mod commands;
pub mod config;
pub mod display;
pub mod error;
pub mod gateway;
pub mod guard;
pub mod lifecycle;
pub mod session;
pub mod store;
pub mod types;
pub mod utils;

pub use config::Config;
pub use error::{Result, TaskdeckError};
pub use gateway::{ApiClient, LoginResponse, TicketClient, TicketGateway, UserClient, UserGateway};
pub use lifecycle::{Action, check_permitted, permitted_actions};
pub use session::{Session, SessionStore};
pub use store::{TicketStore, UserStore};
pub use types::{
    CreateTicketRequest, CreateUserRequest, Role, Ticket, TicketPriority, TicketStatus,
    UpdateTicketRequest, User, VALID_PRIORITIES, VALID_ROLES, VALID_STATUSES,
};
