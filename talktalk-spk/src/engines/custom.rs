//! Custom synthesis provider
//! Lets callers plug in their own synthesis function

use crate::engines::SynthesisProvider;
use crate::error::SpeechError;
use crate::synthesizer::SynthesisRequest;
use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Arc;

type SynthesizeFn = dyn Fn(&SynthesisRequest) -> Result<Bytes, SpeechError> + Send + Sync;
type ListVoicesFn = dyn Fn(Option<&str>) -> Result<Vec<String>, SpeechError> + Send + Sync;

/// Closure-backed provider
pub struct CustomProvider {
    name: String,
    synthesize_fn: Arc<SynthesizeFn>,
    list_voices_fn: Arc<ListVoicesFn>,
}

impl CustomProvider {
    pub fn new<F1, F2>(name: impl Into<String>, synthesize_fn: F1, list_voices_fn: F2) -> Self
    where
        F1: Fn(&SynthesisRequest) -> Result<Bytes, SpeechError> + Send + Sync + 'static,
        F2: Fn(Option<&str>) -> Result<Vec<String>, SpeechError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            synthesize_fn: Arc::new(synthesize_fn),
            list_voices_fn: Arc::new(list_voices_fn),
        }
    }

    /// Provider that always returns the same audio and offers no voices
    pub fn fixed(name: impl Into<String>, audio: Bytes) -> Self {
        Self::new(name, move |_req| Ok(audio.clone()), |_lang| Ok(Vec::new()))
    }
}

#[async_trait]
impl SynthesisProvider for CustomProvider {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Bytes, SpeechError> {
        (self.synthesize_fn)(request)
    }

    async fn list_voices(&self, language: Option<&str>) -> Result<Vec<String>, SpeechError> {
        (self.list_voices_fn)(language)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
