//! Symphonia Audio Probe - 基于 symphonia 的音频元数据探测
//!
//! 实现 AudioProbePort trait，从参考音频读取时长与采样率。
//! 任何失败都只作为 ProbeError 返回，由调用方降级处理

use std::fs::File;
use std::path::Path;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::application::ports::{AudioInfo, AudioProbePort, ProbeError};

/// Symphonia 探测器
pub struct SymphoniaProbe;

impl SymphoniaProbe {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SymphoniaProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioProbePort for SymphoniaProbe {
    fn probe(&self, path: &Path) -> Result<AudioInfo, ProbeError> {
        let file = File::open(path).map_err(|e| ProbeError::IoError(e.to_string()))?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }

        let format_opts = FormatOptions::default();
        let metadata_opts = MetadataOptions::default();

        let probed = symphonia::default::get_probe()
            .format(&hint, mss, &format_opts, &metadata_opts)
            .map_err(|e| ProbeError::Unsupported(format!("Probe failed: {}", e)))?;

        let track = probed
            .format
            .default_track()
            .ok_or_else(|| ProbeError::DecodeError("No audio track found".to_string()))?;

        let params = &track.codec_params;
        let sample_rate = params
            .sample_rate
            .ok_or_else(|| ProbeError::DecodeError("Missing sample rate".to_string()))?;
        let n_frames = params
            .n_frames
            .ok_or_else(|| ProbeError::DecodeError("Missing frame count".to_string()))?;

        Ok(AudioInfo {
            duration_secs: n_frames as f64 / sample_rate as f64,
            sample_rate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    /// 构造 PCM 16-bit 单声道静音 WAV
    fn write_wav(path: &Path, sample_rate: u32, seconds: u32) {
        let num_samples = sample_rate * seconds;
        let data_size = num_samples * 2;
        let mut bytes = Vec::with_capacity(44 + data_size as usize);

        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&(36 + data_size).to_le_bytes());
        bytes.extend_from_slice(b"WAVE");
        bytes.extend_from_slice(b"fmt ");
        bytes.extend_from_slice(&16u32.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
        bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
        bytes.extend_from_slice(&sample_rate.to_le_bytes());
        bytes.extend_from_slice(&(sample_rate * 2).to_le_bytes());
        bytes.extend_from_slice(&2u16.to_le_bytes());
        bytes.extend_from_slice(&16u16.to_le_bytes());
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&data_size.to_le_bytes());
        bytes.resize(44 + data_size as usize, 0);

        let mut file = File::create(path).unwrap();
        file.write_all(&bytes).unwrap();
    }

    #[test]
    fn test_probe_wav() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sample.wav");
        write_wav(&path, 16000, 3);

        let info = SymphoniaProbe::new().probe(&path).unwrap();

        assert_eq!(info.sample_rate, 16000);
        assert!((info.duration_secs - 3.0).abs() < 0.01);
    }

    #[test]
    fn test_probe_missing_file() {
        let err = SymphoniaProbe::new()
            .probe(Path::new("/nonexistent/sample.wav"))
            .unwrap_err();
        assert!(matches!(err, ProbeError::IoError(_)));
    }

    #[test]
    fn test_probe_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("garbage.wav");
        std::fs::write(&path, b"definitely not audio").unwrap();

        assert!(SymphoniaProbe::new().probe(&path).is_err());
    }
}
