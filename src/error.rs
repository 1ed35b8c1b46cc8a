use std::fmt;

pub type DragspinResult<T> = Result<T, DragspinError>;

#[derive(Debug)]
pub enum DragspinError {
    InvalidDamping(String),
    InvalidDragSlowing(String),
    InvalidFlingReduction(String),
    InvalidFlingEpsilon(String),
    UnknownArg(String),
}
impl fmt::Display for DragspinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DragspinError::InvalidDamping(val) => {
                write!(f, "
                    \rFling damping must be a number between 0 and 1: {val}",
                )
            }
            DragspinError::InvalidDragSlowing(val) => {
                write!(f, "
                    \rDrag slowing must be a positive number: {val}",
                )
            }
            DragspinError::InvalidFlingReduction(val) => {
                write!(f, "
                    \rFling reduction must be a positive number: {val}",
                )
            }
            DragspinError::InvalidFlingEpsilon(val) => {
                write!(f, "
                    \rFling epsilon must be a non-negative number: {val}",
                )
            }
            DragspinError::UnknownArg(arg) => {
                write!(f, "
                    \rUnrecognized argument: {arg}",
                )
            }
        }
    }
}
