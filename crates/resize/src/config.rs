/// Resize service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ResizeConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3100`).
    pub port: u16,
    /// Region of the source and destination buckets.
    pub region: String,
    /// Bucket assumed for trigger records that do not name one.
    pub source_bucket: Option<String>,
}

impl ResizeConfig {
    /// | Env Var                | Default          |
    /// |------------------------|------------------|
    /// | `RESIZE_HOST`          | `0.0.0.0`        |
    /// | `RESIZE_PORT`          | `3100`           |
    /// | `AWS_REGION`           | `ap-northeast-2` |
    /// | `RESIZE_SOURCE_BUCKET` | unset            |
    pub fn from_env() -> Self {
        let host = std::env::var("RESIZE_HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("RESIZE_PORT")
            .unwrap_or_else(|_| "3100".into())
            .parse()
            .expect("RESIZE_PORT must be a valid u16");

        let region = std::env::var("AWS_REGION")
            .ok()
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| "ap-northeast-2".into());

        let source_bucket = std::env::var("RESIZE_SOURCE_BUCKET")
            .ok()
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty());

        Self {
            host,
            port,
            region,
            source_bucket,
        }
    }
}
