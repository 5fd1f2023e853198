pub mod products;
pub mod vision;

pub use products::{OpenFoodFacts, ProductLookup};
pub use vision::{GoogleVision, VisionClient};
