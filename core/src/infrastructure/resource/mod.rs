pub mod http_repository;

pub use http_repository::HttpResourceRepository;
