pub mod editor;
pub mod filter;
pub mod lead_service;
pub mod metrics;
pub mod summary;

pub use lead_service::LeadService;

#[cfg(test)]
pub(crate) mod test_support;
