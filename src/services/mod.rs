pub mod fetcher;
pub mod relay;
pub mod storage;
