//! Embedding collaborator contract and the synchronous ONNX implementation.
//!
//! The engine only sees the `TextEmbedder` trait; model internals stay behind
//! it. The shipped implementation uses all-MiniLM-L6-v2 (384 dimensions) with
//! mean pooling over the attention mask.

use hf_hub::api::sync::Api;
use ort::inputs;
use ort::session::Session;
use ort::session::builder::GraphOptimizationLevel;
use ort::value::Tensor;
use tokenizers::Tokenizer;
use tokenizers::TruncationParams;

use crate::errors::Error;

/// Embedding dimensions for all-MiniLM-L6-v2.
pub const EMBEDDING_DIMS: usize = 384;

/// Contract for the embedding model collaborator.
///
/// `embed` maps text to a vector of exactly `dimensions()` values and is
/// relied upon to be deterministic for identical input; any failure must
/// surface as an `Error`, never a panic.
///
/// Implementations may mutate internal state per call (the ONNX engine does,
/// for tensor allocations), hence `&mut self`.
pub trait TextEmbedder {
    /// Fixed output dimensionality `D` for the lifetime of the store.
    fn dimensions(&self) -> usize;

    /// Generate an embedding for a single text.
    fn embed(&mut self, text: &str) -> Result<Vec<f32>, Error>;
}

/// ONNX embedding engine for synchronous text-to-vector conversion.
pub struct OnnxEmbedder {
    session: Session,
    tokenizer: Tokenizer,
    requires_token_type_ids: bool,
}

impl OnnxEmbedder {
    /// Load model from cache or download on first use.
    ///
    /// Uses `hf_hub::api::sync::Api` with the ureq feature for blocking I/O,
    /// matching the crate's no-async policy. Files are cached locally in the
    /// HF Hub cache and only downloaded once.
    pub fn new(model_id: &str) -> Result<Self, Error> {
        let api = Api::new()?;
        let repo = api.model(model_id.to_string());

        let model_path = repo
            .get("onnx/model.onnx")
            .or_else(|_| repo.get("model.onnx"))?;
        let tokenizer_path = repo.get("tokenizer.json")?;

        let mut tokenizer = Tokenizer::from_file(tokenizer_path)?;
        tokenizer
            .with_padding(None)
            .with_truncation(Some(TruncationParams {
                max_length: 512,
                ..Default::default()
            }))?;

        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level1)
            .map_err(ort::Error::from)?
            .commit_from_file(&model_path)?;

        // Check if model requires token_type_ids input
        let requires_token_type_ids = session
            .inputs()
            .iter()
            .any(|input| input.name() == "token_type_ids");

        Ok(OnnxEmbedder {
            session,
            tokenizer,
            requires_token_type_ids,
        })
    }
}

impl TextEmbedder for OnnxEmbedder {
    fn dimensions(&self) -> usize {
        EMBEDDING_DIMS
    }

    /// Generate embedding for a single text.
    ///
    /// Returns exactly 384 f32 values, mean-pooled over the attention mask.
    /// No normalization is applied: distances compare raw model output.
    ///
    /// Texts exceeding 512 tokens are silently truncated by the tokenizer.
    fn embed(&mut self, text: &str) -> Result<Vec<f32>, Error> {
        let encoding = self.tokenizer.encode(text, true)?;
        let input_ids = encoding.get_ids();
        let attention_mask = encoding.get_attention_mask();

        if input_ids.is_empty() {
            return Ok(vec![0.0f32; EMBEDDING_DIMS]);
        }

        let seq_len = input_ids.len();

        let input_ids_vec: Vec<i64> = input_ids.iter().map(|&id| id as i64).collect();
        let attention_mask_vec: Vec<i64> = attention_mask.iter().map(|&m| m as i64).collect();

        let input_ids_tensor = Tensor::from_array(([1usize, seq_len], input_ids_vec))?;
        let attention_mask_tensor = Tensor::from_array(([1usize, seq_len], attention_mask_vec))?;

        // Only include token_type_ids if the model requires it
        let outputs = if self.requires_token_type_ids {
            let token_type_ids_vec: Vec<i64> = vec![0i64; seq_len]; // Single sentence, all zeros
            let token_type_ids_tensor =
                Tensor::from_array(([1usize, seq_len], token_type_ids_vec))?;
            self.session.run(inputs![
                "input_ids" => input_ids_tensor,
                "attention_mask" => attention_mask_tensor,
                "token_type_ids" => token_type_ids_tensor
            ])?
        } else {
            self.session.run(inputs![
                "input_ids" => input_ids_tensor,
                "attention_mask" => attention_mask_tensor
            ])?
        };

        let last_hidden_state = outputs
            .get("last_hidden_state")
            .or_else(|| outputs.get("token_embeddings"))
            .ok_or_else(|| {
                Error::Inference(
                    "Output tensor 'last_hidden_state' or 'token_embeddings' not found".to_string(),
                )
            })?
            .try_extract_tensor::<f32>()?;

        let (shape, data) = last_hidden_state;
        if shape.len() != 3 {
            return Err(Error::Inference(format!(
                "Expected 3D output (batch, seq_len, hidden), got {:?}",
                shape
            )));
        }

        let batch_size = shape[0] as usize;
        let hidden_dim = shape[2] as usize;

        if batch_size != 1 || hidden_dim != EMBEDDING_DIMS {
            return Err(Error::Inference(format!(
                "Unexpected output shape: {:?}, batch=1, hidden=384 expected",
                shape
            )));
        }

        let mut pooled = vec![0.0f32; EMBEDDING_DIMS];

        for (token_idx, chunk) in data.chunks(hidden_dim).take(seq_len).enumerate() {
            let mask_value = attention_mask.get(token_idx).copied().unwrap_or(0) as f32;

            for (dim, pooled_value) in pooled.iter_mut().enumerate() {
                *pooled_value += chunk[dim] * mask_value;
            }
        }

        let mask_sum: f32 = attention_mask
            .iter()
            .take(seq_len)
            .map(|&m| m as f32)
            .sum::<f32>()
            .max(1e-9);

        for value in pooled.iter_mut() {
            *value /= mask_sum;
        }

        Ok(pooled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedding_dimensions() {
        assert_eq!(EMBEDDING_DIMS, 384);
    }

    #[ignore]
    #[test]
    fn test_integration_simple_text() {
        let mut engine =
            OnnxEmbedder::new("sentence-transformers/all-MiniLM-L6-v2").expect("load model");
        let embedding = engine.embed("hello world").expect("embed text");

        assert_eq!(embedding.len(), 384);
        assert!(embedding.iter().all(|&x| x.is_finite()));
    }

    #[ignore]
    #[test]
    fn test_integration_deterministic() {
        let mut engine =
            OnnxEmbedder::new("sentence-transformers/all-MiniLM-L6-v2").expect("load model");
        let first = engine.embed("the same text").expect("embed");
        let second = engine.embed("the same text").expect("embed");

        assert_eq!(first, second);
    }

    #[ignore]
    #[test]
    fn test_integration_long_text_truncation() {
        let mut engine =
            OnnxEmbedder::new("sentence-transformers/all-MiniLM-L6-v2").expect("load model");

        let long_text = "This is a sentence. ".repeat(100);
        let embedding = engine.embed(&long_text).expect("embed long text");

        assert_eq!(embedding.len(), 384);
    }
}
