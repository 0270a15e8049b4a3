// IMPORTANT:
// Keep ALL fixed values centralized here (repo rule: no hardcoded values scattered around).

pub mod api {
    pub const INFERENCE_BASE_URL: &str =
        "https://api-inference.huggingface.co/pipeline/feature-extraction";

    // Cap on how much of an error response body ends up in logs and error messages.
    pub const ERROR_BODY_MAX_CHARS: usize = 256;
}

pub mod logging {
    pub const LOG_DIR: &str = "log";
    pub const LOG_BASENAME: &str = "pipeline";
}

pub mod db {
    pub const EMBEDDINGS_TABLE: &str = "embeddings";
}
