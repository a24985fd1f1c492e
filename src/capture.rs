use std::io::Cursor;

use hound::{SampleFormat, WavSpec, WavWriter};
use tracing::info;

use crate::error::CaptureError;

/// Accumulates 16-bit PCM frames between `start` and `stop` and finalizes
/// them into one WAV blob.
///
/// At most one capture may be active at a time; starting while recording is
/// rejected rather than silently restarting the buffer. The finalized blob
/// is handed to the caller once and nothing is kept here afterwards.
///
/// Frames come from whatever input-device layer the caller runs; an access
/// denial there maps into [`CaptureError::DeviceAccess`] and stays local,
/// it never goes over the channel.
pub struct AudioCapture {
    sample_rate: u32,
    channels: u16,
    recording: bool,
    samples: Vec<i16>,
}

impl AudioCapture {
    pub fn new(sample_rate: u32, channels: u16) -> Self {
        Self {
            sample_rate,
            channels,
            recording: false,
            samples: Vec::new(),
        }
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Begin accumulating frames.
    pub fn start(&mut self) -> Result<(), CaptureError> {
        if self.recording {
            return Err(CaptureError::AlreadyRecording);
        }

        self.samples.clear();
        self.recording = true;
        Ok(())
    }

    /// Append a frame of interleaved samples. Frames arriving while idle
    /// are discarded.
    pub fn push(&mut self, frame: &[i16]) {
        if self.recording {
            self.samples.extend_from_slice(frame);
        }
    }

    /// Finalize the accumulated samples into one WAV blob and reset.
    pub fn stop(&mut self) -> Result<Vec<u8>, CaptureError> {
        if !self.recording {
            return Err(CaptureError::NotRecording);
        }
        self.recording = false;

        let spec = WavSpec {
            channels: self.channels,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };

        let mut cursor = Cursor::new(Vec::new());
        let mut writer = WavWriter::new(&mut cursor, spec)
            .map_err(|e| CaptureError::Encoding(e.to_string()))?;

        for &sample in &self.samples {
            writer
                .write_sample(sample)
                .map_err(|e| CaptureError::Encoding(e.to_string()))?;
        }
        writer
            .finalize()
            .map_err(|e| CaptureError::Encoding(e.to_string()))?;

        info!(
            "Capture finalized: {} samples, {}Hz, {} channel(s)",
            self.samples.len(),
            self.sample_rate,
            self.channels
        );

        self.samples.clear();
        Ok(cursor.into_inner())
    }
}
