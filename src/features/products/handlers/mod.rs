pub mod product_api_handler;
pub mod product_web_handler;

pub use product_api_handler::*;
