pub mod product;
pub mod service;

pub use product::ProductData;
pub use service::ServiceData;
