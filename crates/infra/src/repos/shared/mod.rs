pub mod inmemory_repo;
pub mod query_structs;
