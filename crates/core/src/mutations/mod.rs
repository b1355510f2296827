//! Optimistic mutations against the settings cache.

mod coordinator;
mod mutation_state;


pub use coordinator::MutationCoordinator;
pub use mutation_state::{MutationField, MutationKey, MutationOutcome, MutationState};
