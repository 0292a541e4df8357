pub mod builtin;
pub mod error;
pub mod layer;
pub mod record;
pub mod table;
