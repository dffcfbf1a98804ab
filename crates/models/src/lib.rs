pub mod errors;
pub mod db;
pub mod dates;
pub mod bike;
pub mod service_record;
pub mod bill;
pub mod bill_entry;
pub mod booking;
pub mod admin;

#[cfg(test)]
mod tests;
