mod cache;
mod callback;
mod config;
mod error;
mod flag;
mod item;
mod key;
mod repository;
mod segment;
mod storage;
mod test_common;

pub use cache::*;
pub use callback::*;
pub use config::*;
pub use error::*;
pub use flag::*;
pub use item::*;
pub use key::*;
pub use repository::*;
pub use segment::*;
pub use storage::*;
