//! Database models, schema and queries

pub mod init;
pub mod models;
pub mod responses;
pub mod surveys;
pub mod users;

pub use init::*;
pub use models::*;
pub use responses::*;
pub use surveys::*;
pub use users::*;
