pub mod conf;
pub mod crud;
pub mod error;
pub mod lookup;
pub mod mapper;
pub mod model;
pub mod schema;
