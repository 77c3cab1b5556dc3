pub mod post;
pub mod user;
pub mod validation;

pub use validation::ValidationError;
