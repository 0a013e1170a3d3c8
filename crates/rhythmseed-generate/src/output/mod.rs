pub mod sql;

pub use sql::{render_dataset, write_sql};
