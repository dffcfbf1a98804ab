pub mod routes;
pub mod startup;
pub mod errors;
pub mod extract;
pub mod rate_limit;
pub mod openapi;

pub use routes::auth::ServerState;
pub use startup::run;
