mod layer;

pub use layer::KeyValueAccessLayer;
