//! Local ONNX embedding provider (feature `onnx`).
//!
//! Runs a sentence-embedding model through `ort`, mean-pools the token
//! outputs and L2-normalizes the result.

use std::path::Path;
use std::sync::Mutex;

use aisle_core::errors::{AisleResult, EmbeddingError};
use aisle_core::traits::IEmbeddingProvider;
use ort::session::Session;
use ort::value::Tensor;
use tracing::debug;

use crate::similarity::l2_normalize;

const CLS_TOKEN: i64 = 101;
const SEP_TOKEN: i64 = 102;
const VOCAB_SIZE: u32 = 30_000;
/// Longest input fed to the model, special tokens included.
const MAX_SEQ_LEN: usize = 256;

pub struct OnnxProvider {
    /// `Session::run` takes `&mut self`.
    session: Mutex<Session>,
    dimensions: usize,
    model_name: String,
}

impl OnnxProvider {
    /// # Errors
    /// `EmbeddingError::ModelLoadFailed` if the file is missing or rejected by ort.
    pub fn load(model_path: &str, dimensions: usize) -> AisleResult<Self> {
        let load_failed = |reason: String| EmbeddingError::ModelLoadFailed {
            path: model_path.to_string(),
            reason,
        };

        let path = Path::new(model_path);
        if model_path.is_empty() || !path.exists() {
            return Err(load_failed("model file not found".to_string()).into());
        }

        let session = Session::builder()
            .map_err(|e| load_failed(e.to_string()))?
            .with_intra_threads(2)
            .map_err(|e| load_failed(e.to_string()))?
            .commit_from_file(model_path)
            .map_err(|e| load_failed(e.to_string()))?;

        let model_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("onnx-model")
            .to_string();

        debug!(model = %model_name, dims = dimensions, "ONNX model loaded");

        Ok(Self {
            session: Mutex::new(session),
            dimensions,
            model_name,
        })
    }

    fn infer(&self, text: &str) -> AisleResult<Vec<f32>> {
        let input_ids = word_piece_ids(text);
        let seq_len = input_ids.len() as i64;
        let attention_mask = vec![1i64; input_ids.len()];

        let inference_failed = |reason: String| EmbeddingError::InferenceFailed { reason };

        let ids_tensor = Tensor::from_array((vec![1i64, seq_len], input_ids))
            .map_err(|e| inference_failed(format!("tensor creation error: {e}")))?;
        let mask_tensor = Tensor::from_array((vec![1i64, seq_len], attention_mask))
            .map_err(|e| inference_failed(format!("tensor creation error: {e}")))?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| inference_failed(format!("session lock poisoned: {e}")))?;

        let outputs = session
            .run(ort::inputs![ids_tensor, mask_tensor])
            .map_err(|e| inference_failed(e.to_string()))?;

        let (_name, output) = outputs
            .iter()
            .next()
            .ok_or_else(|| inference_failed("no output tensor".to_string()))?;

        let (shape, data) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| inference_failed(format!("tensor extraction failed: {e}")))?;

        let mut pooled = match shape.len() {
            // [1, seq, dims]
            3 => {
                let (seq, dims) = (shape[1] as usize, shape[2] as usize);
                let mut pooled = vec![0.0f32; dims];
                for row in data.chunks_exact(dims).take(seq) {
                    for (acc, v) in pooled.iter_mut().zip(row) {
                        *acc += v;
                    }
                }
                let denom = seq.max(1) as f32;
                pooled.iter_mut().for_each(|v| *v /= denom);
                pooled
            }
            // [1, dims], already pooled
            2 => data[..shape[1] as usize].to_vec(),
            _ => {
                return Err(inference_failed(format!("unexpected output shape: {shape:?}")).into())
            }
        };

        if pooled.len() != self.dimensions {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dimensions,
                actual: pooled.len(),
            }
            .into());
        }
        l2_normalize(&mut pooled);
        Ok(pooled)
    }
}

/// Hash words into the vocab range, framed by `[CLS]` and `[SEP]`.
fn word_piece_ids(text: &str) -> Vec<i64> {
    let mut ids = vec![CLS_TOKEN];
    for word in text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .take(MAX_SEQ_LEN - 2)
    {
        let mut h: u32 = 0x811c9dc5;
        for b in word.to_lowercase().as_bytes() {
            h ^= u32::from(*b);
            h = h.wrapping_mul(0x01000193);
        }
        ids.push(i64::from(1 + h % (VOCAB_SIZE - 1)));
    }
    ids.push(SEP_TOKEN);
    ids
}

impl IEmbeddingProvider for OnnxProvider {
    fn embed(&self, text: &str) -> AisleResult<Vec<f32>> {
        self.infer(text)
    }

    fn embed_batch(&self, texts: &[String]) -> AisleResult<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.infer(t)).collect()
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        &self.model_name
    }

    fn is_available(&self) -> bool {
        true
    }
}
