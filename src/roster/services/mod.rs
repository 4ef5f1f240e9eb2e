//! Application services for project and contract management.

mod registry;

pub use registry::{
    ContractPages, ContractRegistry, RegisterContractRequest, RegisterProjectRequest,
    RegistryError, RegistryResult,
};
