//! Domain model for projects and contracts.
//!
//! All values are validated at construction and immutable afterwards;
//! "changed" values are built with copy-with constructors rather than
//! in-place mutation.

mod contract;
mod error;
mod ids;
mod project;

pub use contract::{Contract, ContractId, HourlyRate, PersistedContractData};
pub use error::RosterDomainError;
pub use ids::{ContributorRef, ProjectRef, Provider, RepoName, Role, Username};
pub use project::Project;
