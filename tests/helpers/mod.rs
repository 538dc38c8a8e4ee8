pub mod builders;
pub mod db;

pub use builders::PropertyBuilder;
pub use db::TestDb;
