pub mod constants;
pub mod cookies;
pub mod currency;
pub mod flash;
pub mod types;
pub mod validation;
pub mod views;

#[cfg(test)]
pub mod test_helpers;
