//! Storage layer abstraction trait definition

mod client_repository;
mod domain_record_repository;

pub use client_repository::ClientRepository;
pub use domain_record_repository::DomainRecordRepository;

// Collaborators consumed by the provider library
pub use registrar_orchestrator_provider::{
    ContactLookups, CountryDirectory, CustomerProvisioning, PhoneNumberParser, RegistrarProvider,
};
