pub mod classification;
pub mod supplier;

pub use classification::ClassificationService;
pub use supplier::SupplierService;
