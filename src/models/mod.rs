// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::*;
pub use requests::*;
pub use responses::*;
