pub mod database;
pub mod options;
pub mod request_manager;
pub mod resolver;
pub mod table;
