pub mod backup;
pub mod connectivity;
pub mod database;
pub mod offline;
pub mod storage;
