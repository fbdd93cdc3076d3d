pub mod admission;
pub mod request_id;

pub use admission::AdmissionGate;
pub use request_id::RequestIdMiddleware;
