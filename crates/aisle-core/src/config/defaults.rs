//! Default values for every configuration section.

// Catalog
pub const DEFAULT_CATALOG_PATH: &str = "data/amazon_products.csv";
pub const DEFAULT_TITLE_FALLBACK_CHARS: usize = 80;

// Lexical
pub const DEFAULT_TITLE_WEIGHT: f64 = 2.0;
pub const DEFAULT_CATEGORY_WEIGHT: f64 = 1.0;
pub const DEFAULT_DESCRIPTION_WEIGHT: f64 = 1.0;

// Embedding
pub const DEFAULT_EMBEDDING_PROVIDER: &str = "none";
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 384;
pub const DEFAULT_EMBEDDING_ENDPOINT: &str = "https://api.openai.com/v1/embeddings";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
pub const DEFAULT_EMBEDDING_API_KEY_ENV: &str = "EMBEDDING_API_KEY";
pub const DEFAULT_EMBEDDING_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_EMBEDDING_BATCH_SIZE: usize = 32;
pub const DEFAULT_L1_CACHE_SIZE: u64 = 10_000;

// Fusion
pub const DEFAULT_LEXICAL_WEIGHT: f64 = 0.5;
pub const DEFAULT_EMBEDDING_WEIGHT: f64 = 0.5;
pub const DEFAULT_RATING_WEIGHT: f64 = 0.0;
pub const DEFAULT_MIN_RELEVANCE: f64 = 0.0;
/// Cosine 0 maps to 0.5 on the [0, 1] embedding scale.
pub const DEFAULT_SEMANTIC_FLOOR: f64 = 0.5;

// Rerank
pub const DEFAULT_RERANK_TOP_N: usize = 10;
pub const DEFAULT_RERANK_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_RERANK_MODEL: &str = "llama-3.1-8b-instant";
pub const DEFAULT_RERANK_API_KEY_ENV: &str = "GROQ_API_KEY";
pub const DEFAULT_RERANK_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_RERANK_MAX_TOKENS: u32 = 256;

// Observability
pub const DEFAULT_LOG_LEVEL: &str = "info";
