use crate::types::ColliderHandle;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhysicsError {
    #[error("unknown body index {0}")]
    UnknownBody(usize),
    #[error("unknown collider {0:?}")]
    UnknownCollider(ColliderHandle),
    #[error("invalid collider shape: {0}")]
    InvalidShape(&'static str),
}
