//! Setup validation and a command-driven game session.
//!
//! ```text
//! SetupRequest --validate--> GameSetup --start--> Session
//!                                                   | handle(Command)
//!                                                   v
//!                                                  Events
//! ```

pub mod command;
pub mod driver;
pub mod setup;
pub mod summary;

pub use command::{Command, Event};
pub use driver::{Events, Session};
pub use setup::{GameSetup, PlayerProfile, SetupRequest};
pub use summary::{GameSummary, SummaryText};
