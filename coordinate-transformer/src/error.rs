#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TransformError {
    #[error("rotation quaternion {0:?} has zero norm")]
    DegenerateRotation([f64; 4]),
}
