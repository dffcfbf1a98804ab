//! Service layer providing the bike shop's business operations on top of models.
//! - Bike directory, service lifecycle, bills and bookings live under `db`.
//! - Multi-table mutations run inside one transaction.
//! - Admin signup/login lives under `auth` (domain, repository, service).

pub mod errors;
pub mod auth;
pub mod views;
pub mod db;
#[cfg(test)]
pub mod test_support;
