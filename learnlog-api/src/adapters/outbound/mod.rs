pub mod rowstore;
