pub mod heading;
pub mod layer;
pub mod material;
pub mod mesh;
pub mod node;
