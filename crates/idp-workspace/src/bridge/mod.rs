pub mod api_bridge;

pub use api_bridge::ApiBridge;
