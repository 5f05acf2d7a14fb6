pub mod artifact;
pub mod binarizer;
pub mod dataset;
pub mod forest;
pub mod tree;
