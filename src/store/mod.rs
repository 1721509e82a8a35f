//! In-memory state stores.
//!
//! Each store is the sole owner of its fetched snapshot and is mutated only
//! through its own action methods: every action flips the loading flag,
//! calls the gateway, and on success merges the single result into the
//! collection (prepend for create, in-place replace for transitions,
//! remove for delete) or replaces the whole collection (fetch). On failure
//! the snapshot is left untouched, the error message is recorded, and the
//! typed error is returned to the caller.

pub mod tickets;
pub mod users;

pub use tickets::TicketStore;
pub use users::UserStore;
