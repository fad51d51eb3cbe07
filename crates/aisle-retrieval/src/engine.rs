//! RecommendationEngine: the query pipeline.
//!
//! query → (lexical ∥ embedding) → fusion → optional LLM re-rank → assembly

use std::sync::Arc;
use std::time::Instant;

use aisle_catalog::CatalogLoader;
use aisle_core::constants::{COMPONENT_EMBEDDINGS, COMPONENT_RERANK};
use aisle_core::errors::{AisleError, AisleResult, RequestError};
use aisle_core::models::{
    Catalog, DegradationEvent, DegradationKind, EmbeddingStatus, RankingStatus,
    RecommendationResult, RerankStatus, ScoreMap,
};
use aisle_core::traits::{IEmbeddingProvider, ILlmClient};
use aisle_core::{AisleConfig, CancellationToken};
use aisle_embeddings::EmbeddingEngine;
use tracing::{debug, info, info_span, warn, Span};
use uuid::Uuid;

use crate::assembler;
use crate::llm::ChatCompletionsClient;
use crate::ranking::{HybridFusion, LlmReranker};
use crate::search::{EmbeddingOutcome, EmbeddingRetriever, LexicalIndex};

/// Hybrid product recommender over a read-only catalog.
///
/// `Send + Sync`: queries run concurrently against shared state.
pub struct RecommendationEngine {
    catalog: Arc<Catalog>,
    lexical: LexicalIndex,
    semantic: EmbeddingRetriever,
    fusion: HybridFusion,
    reranker: LlmReranker,
}

impl RecommendationEngine {
    pub fn builder(config: AisleConfig) -> RecommendationEngineBuilder {
        RecommendationEngineBuilder::new(config)
    }

    /// Load the catalog at `config.catalog.path` and build providers from config.
    pub fn from_config(config: &AisleConfig) -> AisleResult<Self> {
        Self::builder(config.clone()).build()
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn embeddings_enabled(&self) -> bool {
        self.semantic.is_enabled()
    }

    /// Top `k` products for `query`.
    ///
    /// `k = 0` yields an empty result for any query.
    ///
    /// # Errors
    /// `AisleError::InvalidRequest` for a negative `k` or, when `k > 0`, a blank query.
    /// Embedding and re-rank failures degrade the ranking instead.
    pub fn get_recommendations(
        &self,
        query: &str,
        k: i64,
        use_llm_rerank: bool,
    ) -> AisleResult<RecommendationResult> {
        self.get_recommendations_with_cancel(query, k, use_llm_rerank, &CancellationToken::new())
    }

    /// Same as [`get_recommendations`](Self::get_recommendations), checking
    /// `cancel` between stages and before every external call.
    pub fn get_recommendations_with_cancel(
        &self,
        query: &str,
        k: i64,
        use_llm_rerank: bool,
        cancel: &CancellationToken,
    ) -> AisleResult<RecommendationResult> {
        let k = usize::try_from(k).map_err(|_| RequestError::NegativeK { k })?;
        let query = query.trim();
        let mut status = RankingStatus::default();
        if k == 0 {
            debug!("k = 0, returning empty result");
            if self.semantic.is_enabled() {
                status.embeddings = EmbeddingStatus::Used { scored: 0 };
            }
            return Ok(RecommendationResult::empty(query, status));
        }
        if query.is_empty() {
            return Err(RequestError::EmptyQuery.into());
        }

        let span = info_span!("recommend", query_id = %Uuid::new_v4(), k);
        let _guard = span.enter();
        let started = Instant::now();
        check(cancel)?;

        let (lexical, embedding) = self.retrieve(query, cancel);
        let embedding = embedding?;
        check(cancel)?;

        let mut degradations = Vec::new();
        status.embeddings = match &embedding {
            EmbeddingOutcome::Scored(scores) => EmbeddingStatus::Used {
                scored: scores.len(),
            },
            EmbeddingOutcome::Disabled => EmbeddingStatus::Disabled,
            EmbeddingOutcome::Unavailable { reason } => {
                warn!(%reason, "embedding signal unavailable, ranking lexical-only");
                degradations.push(DegradationEvent::new(
                    DegradationKind::RetrievalDegraded,
                    COMPONENT_EMBEDDINGS,
                    reason.clone(),
                    "lexical-only",
                ));
                EmbeddingStatus::Unavailable {
                    reason: reason.clone(),
                }
            }
        };

        let fused = self
            .fusion
            .fuse_with_ratings(&lexical, embedding.scores(), &self.catalog);
        debug!(candidates = fused.len(), "fused candidates");
        check(cancel)?;

        let reranked = self
            .reranker
            .rerank(query, fused, &self.catalog, use_llm_rerank, cancel)?;
        if let RerankStatus::FellBack { reason } = &reranked.status {
            degradations.push(DegradationEvent::new(
                DegradationKind::RerankFailed,
                COMPONENT_RERANK,
                reason.clone(),
                "fused order",
            ));
        }
        status.rerank = reranked.status;
        check(cancel)?;

        let items = assembler::assemble(&reranked.candidates, k, &self.catalog);
        info!(
            returned = items.len(),
            candidates = reranked.candidates.len(),
            degraded = status.is_degraded(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "recommendations ready"
        );

        Ok(RecommendationResult {
            query: query.to_string(),
            items,
            status,
            degradations,
        })
    }
}

impl RecommendationEngine {
    /// Run both retrievers concurrently.
    ///
    /// The embedding branch may block on network I/O, so it runs on a scoped
    /// OS thread rather than a rayon worker; only the CPU scoring inside each
    /// branch uses the rayon pool.
    fn retrieve(
        &self,
        query: &str,
        cancel: &CancellationToken,
    ) -> (ScoreMap, AisleResult<EmbeddingOutcome>) {
        if !self.semantic.is_enabled() {
            let embedding = self.semantic.score(query, &self.catalog, cancel);
            return (self.lexical.score(query), embedding);
        }

        let span = Span::current();
        std::thread::scope(|scope| {
            let embedding = scope.spawn(move || {
                let _guard = span.enter();
                self.semantic.score(query, &self.catalog, cancel)
            });
            let lexical = self.lexical.score(query);
            let embedding = embedding
                .join()
                .unwrap_or_else(|payload| std::panic::resume_unwind(payload));
            (lexical, embedding)
        })
    }
}

fn check(cancel: &CancellationToken) -> AisleResult<()> {
    if cancel.is_cancelled() {
        return Err(AisleError::Cancelled);
    }
    Ok(())
}

/// Builder for [`RecommendationEngine`].
///
/// Anything not supplied explicitly is built from the config: the catalog
/// is loaded from `catalog.path`, the embedding provider from `embedding`,
/// the LLM client from `rerank`.
pub struct RecommendationEngineBuilder {
    config: AisleConfig,
    catalog: Option<Arc<Catalog>>,
    embedding_provider: Option<Box<dyn IEmbeddingProvider>>,
    llm_client: Option<Arc<dyn ILlmClient>>,
}

impl RecommendationEngineBuilder {
    fn new(config: AisleConfig) -> Self {
        Self {
            config,
            catalog: None,
            embedding_provider: None,
            llm_client: None,
        }
    }

    pub fn catalog(mut self, catalog: impl Into<Arc<Catalog>>) -> Self {
        self.catalog = Some(catalog.into());
        self
    }

    pub fn embedding_provider(mut self, provider: impl IEmbeddingProvider + 'static) -> Self {
        self.embedding_provider = Some(Box::new(provider));
        self
    }

    pub fn llm_client(mut self, client: impl ILlmClient + 'static) -> Self {
        self.llm_client = Some(Arc::new(client));
        self
    }

    /// # Errors
    /// `ConfigError` for invalid settings, `LoadError` when the catalog
    /// cannot be loaded.
    pub fn build(self) -> AisleResult<RecommendationEngine> {
        let config = self.config;
        config.validate()?;

        let catalog = match self.catalog {
            Some(catalog) => catalog,
            None => Arc::new(CatalogLoader::from_config(&config.catalog).load(&config.catalog.path)?),
        };

        let engine = match self.embedding_provider {
            Some(provider) => Some(EmbeddingEngine::new(provider, config.embedding.l1_cache_size)),
            None => EmbeddingEngine::from_config(&config.embedding)?,
        };
        let semantic = match engine {
            Some(engine) => EmbeddingRetriever::new(engine, &catalog, &config.embedding),
            None => EmbeddingRetriever::disabled(),
        };

        let llm_client = match self.llm_client {
            Some(client) => Some(client),
            None => match ChatCompletionsClient::from_config(&config.rerank) {
                Ok(client) => Some(Arc::new(client) as Arc<dyn ILlmClient>),
                Err(e) => {
                    warn!(error = %e, "LLM client unavailable, re-ranking will fall back");
                    None
                }
            },
        };

        let lexical = LexicalIndex::build(&catalog, &config.lexical);
        let fusion = HybridFusion::new(config.fusion.clone())?;
        let reranker = LlmReranker::new(llm_client, config.rerank.top_n);

        info!(
            products = catalog.len(),
            vocabulary = lexical.vocabulary_size(),
            embeddings = semantic.is_enabled(),
            product_vectors = semantic.vectors().len(),
            rerank_top_n = config.rerank.top_n,
            "RecommendationEngine initialized"
        );

        Ok(RecommendationEngine {
            catalog,
            lexical,
            semantic,
            fusion,
            reranker,
        })
    }
}
