//! Audio file loading through `symphonia` (MP3, FLAC, WAV, OGG Vorbis).

use super::Signal;
use crate::{FirError, Result};
use std::fs::File;
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

impl<const SAMPLE_RATE: u32> Signal<SAMPLE_RATE> {
    /// Loads an audio file as a mono signal at `SAMPLE_RATE`.
    ///
    /// The format is probed from the file contents, using the extension as a
    /// hint. WAV files that `symphonia` cannot decode are retried with
    /// [`Signal::from_wav_file`].
    ///
    /// # Examples
    ///
    /// ```ignore
    /// use firbank::{Signal, SAMPLE_RATE};
    ///
    /// let signal = Signal::<SAMPLE_RATE>::from_file("speech.flac")?;
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match Self::decode(path) {
            Ok(signal) => Ok(signal),
            Err(e) if has_wav_extension(path) => {
                log::debug!("Falling back to hound for {}: {}", path.display(), e);
                Self::from_wav_file(path)
            }
            Err(e) => Err(e),
        }
    }

    fn decode(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        let mut hint = Hint::new();
        if let Some(ext) = path.extension() {
            hint.with_extension(&ext.to_string_lossy());
        }

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| FirError::Decode(format!("{}: {}", path.display(), e)))?;
        let mut format = probed.format;

        let track = format
            .default_track()
            .ok_or_else(|| FirError::Decode(format!("{}: no audio track", path.display())))?;
        let track_id = track.id;
        let mut sample_rate = track.codec_params.sample_rate;
        let mut channels = track.codec_params.channels.map(|c| c.count());

        let mut decoder = symphonia::default::get_codecs()
            .make(&track.codec_params, &DecoderOptions::default())
            .map_err(|e| FirError::Decode(format!("{}: {}", path.display(), e)))?;

        let mut samples: Vec<f64> = Vec::new();
        loop {
            let packet = match format.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(ref e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(e) => return Err(FirError::Decode(e.to_string())),
            };

            if packet.track_id() != track_id {
                continue;
            }

            let decoded = match decoder.decode(&packet) {
                Ok(decoded) => decoded,
                Err(SymphoniaError::DecodeError(e)) => {
                    log::warn!("Skipping undecodable packet in {}: {}", path.display(), e);
                    continue;
                }
                Err(e) => return Err(FirError::Decode(e.to_string())),
            };

            let spec = *decoded.spec();
            sample_rate = sample_rate.or(Some(spec.rate));
            channels = channels.or(Some(spec.channels.count()));

            let mut buffer = SampleBuffer::<f32>::new(decoded.frames() as u64, spec);
            buffer.copy_interleaved_ref(decoded);
            samples.extend(buffer.samples().iter().map(|&s| s as f64));
        }

        let sample_rate = sample_rate
            .ok_or_else(|| FirError::Decode(format!("{}: unknown sample rate", path.display())))?;
        let channels = channels.unwrap_or(1);

        log::info!(
            "Decoded {}: {} samples, {} channel(s) at {} Hz",
            path.display(),
            samples.len(),
            channels,
            sample_rate
        );

        Self::from_interleaved(&samples, channels, sample_rate)
    }
}

fn has_wav_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("wav"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    /// Samples per FLAC frame written by `flac_bytes`.
    const BLOCK: usize = 1024;

    fn crc8(bytes: &[u8]) -> u8 {
        bytes.iter().fold(0u8, |mut crc, &byte| {
            crc ^= byte;
            for _ in 0..8 {
                crc = if crc & 0x80 != 0 {
                    (crc << 1) ^ 0x07
                } else {
                    crc << 1
                };
            }
            crc
        })
    }

    fn crc16(bytes: &[u8]) -> u16 {
        bytes.iter().fold(0u16, |mut crc, &byte| {
            crc ^= (byte as u16) << 8;
            for _ in 0..8 {
                crc = if crc & 0x8000 != 0 {
                    (crc << 1) ^ 0x8005
                } else {
                    crc << 1
                };
            }
            crc
        })
    }

    /// Encodes mono 16-bit samples as a FLAC stream of verbatim subframes.
    fn flac_bytes(samples: &[i16], sample_rate: u32) -> Vec<u8> {
        assert_eq!(samples.len() % BLOCK, 0);
        let rate_code: u8 = match sample_rate {
            8000 => 4,
            16000 => 5,
            other => panic!("no frame header code for {} Hz", other),
        };

        let mut out = b"fLaC".to_vec();
        // Last metadata block, type STREAMINFO, 34 bytes
        out.extend_from_slice(&[0x80, 0x00, 0x00, 34]);
        out.extend_from_slice(&(BLOCK as u16).to_be_bytes());
        out.extend_from_slice(&(BLOCK as u16).to_be_bytes());
        out.extend_from_slice(&[0; 6]);
        // Sample rate (20 bits), channels - 1 (3), bits - 1 (5), total samples (36)
        let packed: u64 = ((sample_rate as u64) << 44) | (15 << 36) | samples.len() as u64;
        out.extend_from_slice(&packed.to_be_bytes());
        out.extend_from_slice(&[0; 16]);

        for (number, block) in samples.chunks(BLOCK).enumerate() {
            // Sync, 1024-sample block, mono, 16 bits per sample
            let mut frame = vec![0xFF, 0xF8, 0xA0 | rate_code, 0x08, number as u8];
            frame.push(crc8(&frame));
            frame.push(0x02);
            for &sample in block {
                frame.extend_from_slice(&sample.to_be_bytes());
            }
            let crc = crc16(&frame);
            frame.extend_from_slice(&crc.to_be_bytes());
            out.extend_from_slice(&frame);
        }
        out
    }

    fn tone(len: usize, sample_rate: u32) -> Vec<i16> {
        (0..len)
            .map(|n| {
                let phase = 2.0 * PI * 440.0 * n as f64 / sample_rate as f64;
                (16000.0 * phase.sin()).round() as i16
            })
            .collect()
    }

    #[test]
    fn test_crc_check_values() {
        assert_eq!(crc8(b"123456789"), 0xF4);
        assert_eq!(crc16(b"123456789"), 0xFEE8);
    }

    #[test]
    fn test_loads_flac() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.flac");
        let source = tone(2 * BLOCK, 8000);
        std::fs::write(&path, flac_bytes(&source, 8000)).unwrap();

        let loaded = Signal::<8000>::from_file(&path).unwrap();
        assert_eq!(loaded.len(), source.len());
        for (i, (&got, &want)) in loaded.samples().iter().zip(&source).enumerate() {
            let want = want as f64 / 32768.0;
            assert!((got - want).abs() < 1e-6, "sample {}: {} != {}", i, got, want);
        }
    }

    #[test]
    fn test_flac_resampled_to_signal_rate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.flac");
        std::fs::write(&path, flac_bytes(&tone(4 * BLOCK, 16000), 16000)).unwrap();

        let loaded = Signal::<8000>::from_file(&path).unwrap();
        assert_eq!(loaded.len(), 2 * BLOCK);
    }

    #[test]
    fn test_wav_decoded_without_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.wav");
        let signal = Signal::<8000>::new(vec![0.0, 0.25, -0.5, 1.5]);
        signal.write_wav(&path).unwrap();

        let decoded = Signal::<8000>::decode(&path).unwrap();
        assert_eq!(decoded, signal);
    }

    #[test]
    fn test_int_wav_matches_hound_loader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stereo.wav");
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for &sample in &[16384_i16, 0, -16384, -16384, 8192, 8192] {
            writer.write_sample(sample).unwrap();
        }
        writer.finalize().unwrap();

        let decoded = Signal::<8000>::decode(&path).unwrap();
        assert_eq!(decoded.samples(), &[0.25, -0.5, 0.25]);
        assert_eq!(decoded, Signal::<8000>::from_wav_file(&path).unwrap());
    }

    #[test]
    fn test_unrecognised_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("noise.mp3");
        std::fs::write(&path, b"definitely not audio").unwrap();

        let result = Signal::<8000>::from_file(&path);
        assert!(matches!(result, Err(FirError::Decode(_))));
    }

    #[test]
    fn test_unreadable_wav_falls_back_to_hound() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.wav");
        std::fs::write(&path, b"definitely not audio").unwrap();

        let result = Signal::<8000>::from_file(&path);
        assert!(matches!(result, Err(FirError::Wav(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = Signal::<8000>::from_file("/nonexistent/file.flac");
        assert!(matches!(result, Err(FirError::Io(_))));
    }
}
