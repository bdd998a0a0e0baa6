//! Adapters for the hospital record tables searched through [`Paginator`](crate::Paginator).
//!
//! Transactional records (medications, procedures, visits, patients) page
//! newest first; reference terminology pages in ascending identifier order.

mod concept;
mod medication;
mod patient;
mod procedure;
mod visit;

pub use concept::*;
pub use medication::*;
pub use patient::*;
pub use procedure::*;
pub use visit::*;
