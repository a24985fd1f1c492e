// Tests for the wire message shapes and audio payload decoding.

use anyhow::Result;
use base64::Engine;
use voice_relay::{decode_audio_payload, ClientMessage, PipelineError, ServerMessage};

fn sample_wav_bytes() -> Vec<u8> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 16000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = std::io::Cursor::new(Vec::new());
    let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
    for i in 0..1600 {
        writer.write_sample((i % 100) as i16).unwrap();
    }
    writer.finalize().unwrap();

    cursor.into_inner()
}

#[test]
fn test_decode_raw_base64_payload() -> Result<()> {
    let wav = sample_wav_bytes();
    let encoded = base64::engine::general_purpose::STANDARD.encode(&wav);

    let decoded = decode_audio_payload(&encoded)?;

    assert_eq!(decoded, wav, "Decoded bytes should match the original WAV");
    Ok(())
}

#[test]
fn test_decode_data_url_payload() -> Result<()> {
    let wav = sample_wav_bytes();
    let encoded = format!(
        "data:audio/wav;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(&wav)
    );

    let decoded = decode_audio_payload(&encoded)?;

    assert_eq!(decoded, wav);
    Ok(())
}

#[test]
fn test_decode_rejects_empty_payload() {
    for payload in ["", "   ", "\n"] {
        let err = decode_audio_payload(payload).expect_err("empty payload should fail");
        assert!(matches!(err, PipelineError::Decoding(_)));
    }
}

#[test]
fn test_decode_rejects_invalid_base64() {
    let err = decode_audio_payload("!!!not base64!!!").expect_err("invalid base64 should fail");
    assert!(matches!(err, PipelineError::Decoding(_)));
}

#[test]
fn test_decode_rejects_non_wav_bytes() {
    let encoded = base64::engine::general_purpose::STANDARD.encode(b"plain text, not audio");
    let err = decode_audio_payload(&encoded).expect_err("non-WAV bytes should fail");
    assert!(matches!(err, PipelineError::Decoding(_)));
}

#[test]
fn test_audio_message_wire_shape() -> Result<()> {
    let message = ClientMessage::Audio {
        audio: "AAAA".to_string(),
        target_language: "es".to_string(),
    };

    let value: serde_json::Value = serde_json::to_value(&message)?;

    assert_eq!(value["type"], "audio");
    assert_eq!(value["audio"], "AAAA");
    assert_eq!(
        value["targetLanguage"], "es",
        "The language field is camelCase on the wire"
    );

    Ok(())
}

#[test]
fn test_translation_message_wire_shape() -> Result<()> {
    let message = ServerMessage::Translation {
        original: "Hello".to_string(),
        translated: "Hola".to_string(),
        language: "es".to_string(),
    };

    let value: serde_json::Value = serde_json::to_value(&message)?;

    assert_eq!(value["type"], "translation");
    assert_eq!(value["original"], "Hello");
    assert_eq!(value["translated"], "Hola");
    assert_eq!(value["language"], "es");

    Ok(())
}

#[test]
fn test_error_message_wire_shape() -> Result<()> {
    let message = ServerMessage::Error {
        message: "transcription failed: request timed out".to_string(),
    };

    let value: serde_json::Value = serde_json::to_value(&message)?;

    assert_eq!(value["type"], "error");
    assert_eq!(value["message"], "transcription failed: request timed out");

    Ok(())
}

#[test]
fn test_client_message_round_trip() -> Result<()> {
    let raw = r#"{"type":"audio","audio":"AAAA","targetLanguage":"fr"}"#;

    let parsed: ClientMessage = serde_json::from_str(raw)?;

    assert_eq!(
        parsed,
        ClientMessage::Audio {
            audio: "AAAA".to_string(),
            target_language: "fr".to_string(),
        }
    );

    Ok(())
}
