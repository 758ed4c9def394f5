//! Catalog entity model.
//!
//! `Laptop` and its parts are prost messages so the same values travel over
//! gRPC, serialize to disk, and live in the stores. Every store boundary
//! exchanges a `clone()` of these values, never a shared reference.

mod filter;
mod json;
mod laptop;
mod rating;

pub use filter::Filter;
pub use laptop::{
    keyboard, memory, screen, storage, Cpu, Gpu, Keyboard, Laptop, Memory, Screen, Storage,
};
pub use rating::Rating;
