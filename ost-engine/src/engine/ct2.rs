//! CTranslate2 backend via the ct2rs bindings

use std::path::Path;

use ct2rs::sys::{self, Config, TranslationOptions, Translator};
use tracing::debug;

use super::TranslationEngine;
use crate::error::{Result, TranslateError};
use crate::options::{ComputeType, Device, EngineOptions};

/// CTranslate2 translator loaded from a converted model directory
pub struct Ct2Engine {
    translator: Translator,
    beam_size: usize,
    max_decoding_length: usize,
    max_input_length: usize,
}

fn device(device: Device) -> sys::Device {
    match device {
        Device::Cpu => sys::Device::CPU,
        Device::Cuda => sys::Device::CUDA,
    }
}

fn compute_type(compute_type: ComputeType) -> sys::ComputeType {
    match compute_type {
        ComputeType::Default => sys::ComputeType::DEFAULT,
        ComputeType::Auto => sys::ComputeType::AUTO,
        ComputeType::Float32 => sys::ComputeType::FLOAT32,
        ComputeType::Int8 => sys::ComputeType::INT8,
        ComputeType::Int8Float32 => sys::ComputeType::INT8_FLOAT32,
        ComputeType::Int8Float16 => sys::ComputeType::INT8_FLOAT16,
        ComputeType::Int16 => sys::ComputeType::INT16,
        ComputeType::Float16 => sys::ComputeType::FLOAT16,
        ComputeType::Bfloat16 => sys::ComputeType::BFLOAT16,
    }
}

impl Ct2Engine {
    /// Load a CTranslate2 model directory (`model.bin`, `config.json`, vocabularies).
    pub fn load(model_dir: &Path, options: &EngineOptions) -> Result<Self> {
        let config = Config {
            device: device(options.device),
            compute_type: compute_type(options.compute_type),
            num_threads_per_replica: options.num_threads,
            ..Default::default()
        };
        debug!("Loading CTranslate2 model from {:?} ({:?})", model_dir, options);

        let translator = Translator::new(model_dir, &config)
            .map_err(|e| TranslateError::ModelLoad(e.into()))?;

        Ok(Self {
            translator,
            beam_size: options.beam_size,
            max_decoding_length: options.max_decoding_length,
            max_input_length: options.max_input_length,
        })
    }
}

impl TranslationEngine for Ct2Engine {
    fn translate_batch(&mut self, batch: &[Vec<String>]) -> Result<Vec<Vec<String>>> {
        let options = TranslationOptions::<String, String> {
            beam_size: self.beam_size,
            max_decoding_length: self.max_decoding_length,
            max_input_length: self.max_input_length,
            ..Default::default()
        };
        let results = self
            .translator
            .translate_batch(batch, &options, None)
            .map_err(|e| TranslateError::Inference(e.into()))?;

        Ok(results
            .into_iter()
            .map(|r| r.hypotheses.into_iter().next().unwrap_or_default())
            .collect())
    }
}
