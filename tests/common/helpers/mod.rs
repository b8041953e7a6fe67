pub mod minio;
