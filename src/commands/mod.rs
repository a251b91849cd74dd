pub mod align;
pub mod batch;
