pub mod kind;
pub mod virtual_node;

pub use kind::{Kind, CONTAINER_KIND};
pub use virtual_node::{PropertyValue, VirtualNode};
