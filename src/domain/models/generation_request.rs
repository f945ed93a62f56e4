use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// System prompt sent when the caller does not supply one.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Sampling configuration sent with every generation task.
///
/// The defaults are the fixed configuration the remote model is tuned for;
/// callers only adjust individual fields through [`SamplingOverrides`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingParameters {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub repetition_penalty: f32,
    pub length_penalty: f32,
    pub max_tokens: u32,
    pub min_tokens: u32,
    pub max_new_tokens: u32,
    /// `-1` lets the remote side pick.
    pub min_new_tokens: i32,
    pub stop_sequences: String,
    pub seed: u64,
    pub quantization: bool,
    pub do_sample: bool,
}

impl Default for SamplingParameters {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_p: 0.95,
            top_k: 0,
            repetition_penalty: 1.0,
            length_penalty: 1.0,
            max_tokens: 0,
            min_tokens: 0,
            max_new_tokens: 0,
            min_new_tokens: -1,
            stop_sequences: String::new(),
            seed: 123_456,
            quantization: true,
            do_sample: true,
        }
    }
}

/// Per-call adjustments merged over [`SamplingParameters::default`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SamplingOverrides {
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub top_k: Option<u32>,
    pub repetition_penalty: Option<f32>,
    pub length_penalty: Option<f32>,
    pub max_tokens: Option<u32>,
    pub min_tokens: Option<u32>,
    pub max_new_tokens: Option<u32>,
    pub min_new_tokens: Option<i32>,
    pub stop_sequences: Option<String>,
    pub seed: Option<u64>,
    pub quantization: Option<bool>,
    pub do_sample: Option<bool>,
}

impl SamplingParameters {
    pub fn with_overrides(self, overrides: &SamplingOverrides) -> Self {
        Self {
            temperature: overrides.temperature.unwrap_or(self.temperature),
            top_p: overrides.top_p.unwrap_or(self.top_p),
            top_k: overrides.top_k.unwrap_or(self.top_k),
            repetition_penalty: overrides
                .repetition_penalty
                .unwrap_or(self.repetition_penalty),
            length_penalty: overrides.length_penalty.unwrap_or(self.length_penalty),
            max_tokens: overrides.max_tokens.unwrap_or(self.max_tokens),
            min_tokens: overrides.min_tokens.unwrap_or(self.min_tokens),
            max_new_tokens: overrides.max_new_tokens.unwrap_or(self.max_new_tokens),
            min_new_tokens: overrides.min_new_tokens.unwrap_or(self.min_new_tokens),
            stop_sequences: overrides
                .stop_sequences
                .clone()
                .unwrap_or(self.stop_sequences),
            seed: overrides.seed.unwrap_or(self.seed),
            quantization: overrides.quantization.unwrap_or(self.quantization),
            do_sample: overrides.do_sample.unwrap_or(self.do_sample),
        }
    }
}

/// One generation call. Built once, consumed by a single submission.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    prompt: String,
    system_prompt: Option<String>,
    sampling: SamplingParameters,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_prompt: None,
            sampling: SamplingParameters::default(),
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    pub fn with_overrides(mut self, overrides: &SamplingOverrides) -> Self {
        self.sampling = self.sampling.with_overrides(overrides);
        self
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn system_prompt(&self) -> Option<&str> {
        self.system_prompt.as_deref()
    }

    pub fn sampling(&self) -> &SamplingParameters {
        &self.sampling
    }

    /// Task-creation body in the field layout the remote API expects.
    ///
    /// The API takes most float parameters and the seed as strings, and the
    /// boolean flags as their command-line spelling (empty when off).
    pub fn to_wire_body(&self) -> Value {
        let s = &self.sampling;
        json!({
            "prompt": self.prompt,
            "user_id": "",
            "session_id": "",
            "system_prompt": self.system_prompt.as_deref().unwrap_or(DEFAULT_SYSTEM_PROMPT),
            "temperature": decimal_string(s.temperature),
            "top_p": decimal_string(s.top_p),
            "top_k": s.top_k,
            "repetition_penalty": decimal_string(s.repetition_penalty),
            // integral values go out without a fractional part, e.g. "1"
            "length_penalty": s.length_penalty.to_string(),
            "max_tokens": s.max_tokens,
            "min_tokens": s.min_tokens,
            "max_new_tokens": s.max_new_tokens,
            "min_new_tokens": s.min_new_tokens,
            "stop_sequences": s.stop_sequences,
            "seed": s.seed.to_string(),
            "quantization": if s.quantization { "--quantization" } else { "" },
            "do_sample": if s.do_sample { "--do_sample" } else { "" },
            "callbackUrl": "",
        })
    }
}

fn decimal_string(value: f32) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}
