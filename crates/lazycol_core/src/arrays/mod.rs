pub mod batch;
pub mod column;
pub mod datatype;
pub mod scalar;
