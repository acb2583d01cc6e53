pub mod filter;
pub mod item;

pub use filter::Filter;
pub use item::Task;
