//! Optional LLM re-ranking of the head of the fused ranking.
//!
//! The head (`top_n` candidates) is sent to the LLM as a numbered list; the
//! reply is expected to contain a JSON array of product ids. Unknown and
//! repeated ids are dropped and ids the model left out are appended in
//! fused order, so the output is always a permutation of the input. Any
//! failure keeps the fused order.

use std::collections::HashSet;
use std::sync::Arc;

use aisle_core::errors::{AisleError, AisleResult, RerankError};
use aisle_core::models::{Catalog, RerankStatus, ScoredCandidate};
use aisle_core::traits::ILlmClient;
use aisle_core::CancellationToken;
use serde_json::Value;
use tracing::{debug, warn};

const SYSTEM_PROMPT: &str = "You are a shopping assistant that ranks products by how well they \
match a customer's search. Reply with only a JSON array of product ids, most relevant first.";

/// Candidates after re-ranking, with the status describing what happened.
#[derive(Debug, Clone, PartialEq)]
pub struct RerankOutcome {
    pub candidates: Vec<ScoredCandidate>,
    pub status: RerankStatus,
}

impl RerankOutcome {
    fn unchanged(candidates: Vec<ScoredCandidate>, status: RerankStatus) -> Self {
        Self { candidates, status }
    }
}

pub struct LlmReranker {
    client: Option<Arc<dyn ILlmClient>>,
    top_n: usize,
}

impl LlmReranker {
    pub fn new(client: Option<Arc<dyn ILlmClient>>, top_n: usize) -> Self {
        Self { client, top_n }
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Re-rank the first `top_n` candidates when `enabled`.
    ///
    /// # Errors
    /// Only `AisleError::Cancelled`; LLM failures become `RerankStatus::FellBack`.
    pub fn rerank(
        &self,
        query: &str,
        candidates: Vec<ScoredCandidate>,
        catalog: &Catalog,
        enabled: bool,
        cancel: &CancellationToken,
    ) -> AisleResult<RerankOutcome> {
        if !enabled {
            return Ok(RerankOutcome::unchanged(candidates, RerankStatus::NotRequested));
        }

        let Some(client) = &self.client else {
            return Ok(fell_back(candidates, RerankError::NotConfigured.to_string()));
        };

        let head_len = candidates.len().min(self.top_n);
        if head_len <= 1 && client.is_configured() {
            return Ok(RerankOutcome::unchanged(
                candidates,
                RerankStatus::Applied { reranked: head_len },
            ));
        }

        if cancel.is_cancelled() {
            return Err(AisleError::Cancelled);
        }

        // Unconfigured clients fail fast in `complete` with their own reason.
        let prompt = build_prompt(query, &candidates[..head_len], catalog);
        let reply = match client.complete(SYSTEM_PROMPT, &prompt) {
            Ok(reply) => reply,
            Err(e) => return Ok(fell_back(candidates, e.to_string())),
        };

        let head_ids: Vec<&str> = candidates[..head_len]
            .iter()
            .map(|c| c.product_id.as_str())
            .collect();
        let order = match parse_ranking(&reply).and_then(|ids| merge_order(&head_ids, &ids)) {
            Ok(order) => order,
            Err(e) => return Ok(fell_back(candidates, e.to_string())),
        };

        debug!(client = client.name(), reranked = head_len, "LLM re-rank applied");
        let mut remaining = candidates;
        let tail = remaining.split_off(head_len);
        let mut head: Vec<Option<ScoredCandidate>> = remaining.into_iter().map(Some).collect();
        let mut reordered: Vec<ScoredCandidate> = order
            .into_iter()
            .filter_map(|pos| head[pos].take())
            .collect();
        reordered.extend(tail);

        Ok(RerankOutcome {
            candidates: reordered,
            status: RerankStatus::Applied { reranked: head_len },
        })
    }
}

fn fell_back(candidates: Vec<ScoredCandidate>, reason: String) -> RerankOutcome {
    warn!(%reason, "LLM re-rank failed, keeping fused order");
    RerankOutcome::unchanged(candidates, RerankStatus::FellBack { reason })
}

/// `id | title | category | price | rating`, one line per candidate.
pub fn build_prompt(query: &str, head: &[ScoredCandidate], catalog: &Catalog) -> String {
    let mut prompt = format!("Customer search: \"{}\"\n\nProducts:\n", query.trim());
    for candidate in head {
        let Some(p) = catalog.get(&candidate.product_id) else {
            continue;
        };
        let price = p.price.map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}"));
        let rating = p.rating.map_or_else(|| "n/a".to_string(), |v| format!("{v:.1}"));
        let category = if p.category.is_empty() { "n/a" } else { &p.category };
        prompt.push_str(&format!(
            "{} | {} | {} | {} | {}\n",
            p.id, p.title, category, price, rating
        ));
    }
    prompt.push_str("\nReturn a JSON array with every product id above, most relevant first.");
    prompt
}

/// Extract the first JSON array in `reply` as a list of ids.
///
/// String and integer elements are accepted; anything else is skipped.
pub fn parse_ranking(reply: &str) -> Result<Vec<String>, RerankError> {
    for (start, _) in reply.match_indices('[') {
        let mut stream = serde_json::Deserializer::from_str(&reply[start..]).into_iter::<Vec<Value>>();
        if let Some(Ok(values)) = stream.next() {
            return Ok(values
                .into_iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s.trim().to_string()),
                    Value::Number(n) if n.is_u64() || n.is_i64() => Some(n.to_string()),
                    _ => None,
                })
                .collect());
        }
    }
    Err(RerankError::MalformedResponse {
        reason: "no JSON array of ids in reply".to_string(),
    })
}

/// Positions into `head_ids` in LLM order, completed with the ids it omitted.
///
/// # Errors
/// `RerankError::MalformedResponse` when the reply names none of the candidates.
pub fn merge_order(head_ids: &[&str], ranked: &[String]) -> Result<Vec<usize>, RerankError> {
    let mut seen: HashSet<usize> = HashSet::with_capacity(head_ids.len());
    let mut order: Vec<usize> = Vec::with_capacity(head_ids.len());
    for id in ranked {
        if let Some(pos) = head_ids.iter().position(|h| *h == id.as_str()) {
            if seen.insert(pos) {
                order.push(pos);
            }
        }
    }
    if order.is_empty() {
        return Err(RerankError::MalformedResponse {
            reason: "reply contained none of the candidate ids".to_string(),
        });
    }
    order.extend((0..head_ids.len()).filter(|pos| !seen.contains(pos)));
    Ok(order)
}
