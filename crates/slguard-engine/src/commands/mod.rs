pub mod storage_layout;
