mod r#enum;
mod field;
mod schema;
mod table;

pub use r#enum::*;
pub use field::*;
pub use schema::*;
pub use table::*;
