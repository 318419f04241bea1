pub mod relay;
pub mod traits;
