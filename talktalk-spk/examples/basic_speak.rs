//! Basic speech synthesis example
//!
//! Needs GOOGLE_APPLICATION_CREDENTIALS or GOOGLE_CLOUD_API_KEY.

use talktalk_spk::selector::{KeywordSelector, SelectionContext, VoiceSelector};
use talktalk_spk::{ProviderConfig, SpeechSynthesizer, SynthesisRequest, VoiceConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let synthesizer = SpeechSynthesizer::google_cloud(&ProviderConfig::default())?;

    let text = "Hello, I am TalkTalk. How may I assist you today?";
    let voice = KeywordSelector::standard(VoiceConfig::default()).select(&SelectionContext::new(text));
    println!("Synthesizing with {} (rate {}, pitch {})", voice.voice_id, voice.speaking_rate, voice.pitch_semitones);

    match synthesizer.synthesize(&SynthesisRequest::new(text, &voice)).await {
        Ok(result) => {
            std::fs::write("hello.mp3", &result.audio)?;
            println!("Wrote {} bytes of {} to hello.mp3", result.audio.len(), result.mime_type);
        }
        Err(e) => {
            eprintln!("Failed to synthesize speech: {}", e);
        }
    }

    Ok(())
}
