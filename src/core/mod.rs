//! Core business logic - framework-agnostic stores, queries and exports.

pub mod csv;
pub mod format;
pub mod id;
pub mod query;
pub mod resolver;
pub mod state;
pub mod stats;
pub mod store;
pub mod validation;

pub use query::{OfferingQuery, RegistrationQuery, RegistrationSort};
pub use resolver::{OfferingDetails, Resolver, UNKNOWN, resolve_name};
pub use state::AppState;
pub use stats::{GroupCount, RegistrationStats};
pub use store::{EntityStore, Named, Record};
