//! Engine options passed to the translation backend at load time

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Device the translator runs on
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    #[default]
    Cpu,
    Cuda,
}

/// Numeric precision used for model weights and computation
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComputeType {
    /// Keep the type the model was converted with
    #[default]
    Default,
    /// Let the engine pick the fastest supported type
    Auto,
    Float32,
    Int8,
    Int8Float32,
    Int8Float16,
    Int16,
    Float16,
    Bfloat16,
}

impl FromStr for Device {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cpu" => Ok(Self::Cpu),
            "cuda" => Ok(Self::Cuda),
            other => Err(format!("unknown device '{}' (expected cpu or cuda)", other)),
        }
    }
}

impl FromStr for ComputeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Self::Default),
            "auto" => Ok(Self::Auto),
            "float32" => Ok(Self::Float32),
            "int8" => Ok(Self::Int8),
            "int8_float32" => Ok(Self::Int8Float32),
            "int8_float16" => Ok(Self::Int8Float16),
            "int16" => Ok(Self::Int16),
            "float16" => Ok(Self::Float16),
            "bfloat16" => Ok(Self::Bfloat16),
            other => Err(format!("unknown compute type '{}'", other)),
        }
    }
}

/// Translator configuration
///
/// Every field has a default, so partial TOML tables deserialize cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    pub device: Device,
    pub compute_type: ComputeType,
    /// Threads per translator replica (0 = engine default)
    pub num_threads: usize,
    pub beam_size: usize,
    pub max_decoding_length: usize,
    /// Source sequences longer than this are truncated by the engine (0 = no limit)
    pub max_input_length: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            device: Device::Cpu,
            compute_type: ComputeType::Default,
            num_threads: 0,
            beam_size: 2,
            max_decoding_length: 256,
            max_input_length: 1024,
        }
    }
}
