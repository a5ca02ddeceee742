pub mod ids;
pub mod request;
pub mod response;
pub mod value;

pub use ids::*;
pub use request::*;
pub use response::*;
pub use value::*;
