//! Narration export.
//!
//! Speech comes back as raw 16-bit little-endian mono PCM with the sample
//! rate in the MIME type (`audio/L16;codec=pcm;rate=24000`). Players expect
//! a container, so exports are wrapped in a minimal WAV header.

use mime::Mime;
use mindful_core::AudioClip;

/// Sample rate assumed when the MIME type does not carry one.
pub const DEFAULT_SAMPLE_RATE: u32 = 24_000;

const CHANNELS: u16 = 1;
const BITS_PER_SAMPLE: u16 = 16;

/// Sample rate declared by a PCM MIME type.
///
/// # Examples
///
/// ```
/// use mindful::audio::sample_rate;
///
/// assert_eq!(sample_rate("audio/L16;codec=pcm;rate=16000"), 16000);
/// assert_eq!(sample_rate("audio/L16"), 24000);
/// ```
pub fn sample_rate(mime_type: &str) -> u32 {
    mime_type
        .parse::<Mime>()
        .ok()
        .and_then(|parsed| parsed.get_param("rate").and_then(|rate| rate.as_str().parse().ok()))
        .unwrap_or(DEFAULT_SAMPLE_RATE)
}

/// Whether a clip is raw PCM that needs a container before playback.
pub fn is_raw_pcm(clip: &AudioClip) -> bool {
    let Ok(parsed) = clip.mime_type.parse::<Mime>() else {
        return false;
    };
    let linear =
        parsed.type_() == mime::AUDIO && parsed.subtype().as_str().eq_ignore_ascii_case("l16");
    let pcm_codec = parsed
        .get_param("codec")
        .is_some_and(|codec| codec.as_str().eq_ignore_ascii_case("pcm"));
    linear || pcm_codec
}

/// Wrap raw PCM samples in a WAV container.
pub fn pcm_to_wav(pcm: &[u8], sample_rate: u32) -> Vec<u8> {
    let block_align = CHANNELS * BITS_PER_SAMPLE / 8;
    let byte_rate = sample_rate * u32::from(block_align);
    let data_len = pcm.len() as u32;

    let mut wav = Vec::with_capacity(44 + pcm.len());
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_len).to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes());
    wav.extend_from_slice(&CHANNELS.to_le_bytes());
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&block_align.to_le_bytes());
    wav.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());
    wav.extend_from_slice(pcm);
    wav
}

/// Bytes ready to write to a playable file, with the file extension to use.
pub fn playable(clip: &AudioClip) -> (Vec<u8>, &'static str) {
    if is_raw_pcm(clip) {
        (pcm_to_wav(&clip.data, sample_rate(&clip.mime_type)), "wav")
    } else {
        (clip.data.clone(), "audio")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wav_header_describes_pcm() {
        let wav = pcm_to_wav(&[0, 1, 2, 3], 24_000);

        assert_eq!(wav.len(), 48);
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(u32::from_le_bytes([wav[4], wav[5], wav[6], wav[7]]), 40);
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(
            u32::from_le_bytes([wav[24], wav[25], wav[26], wav[27]]),
            24_000
        );
        assert_eq!(
            u32::from_le_bytes([wav[28], wav[29], wav[30], wav[31]]),
            48_000
        );
        assert_eq!(&wav[36..40], b"data");
        assert_eq!(&wav[44..], &[0, 1, 2, 3]);
    }

    #[test]
    fn test_non_pcm_clip_passes_through() {
        let clip = AudioClip {
            mime_type: "audio/mpeg".to_string(),
            data: vec![9, 9],
        };
        let (bytes, extension) = playable(&clip);
        assert_eq!(bytes, vec![9, 9]);
        assert_eq!(extension, "audio");
    }

    #[test]
    fn test_pcm_detection_reads_mime_parameters() {
        let clip = |mime: &str| AudioClip {
            mime_type: mime.to_string(),
            data: vec![],
        };
        assert!(is_raw_pcm(&clip("audio/L16;codec=pcm;rate=24000")));
        assert!(is_raw_pcm(&clip("audio/l16")));
        assert!(is_raw_pcm(&clip("audio/raw; codec=PCM")));
        assert!(!is_raw_pcm(&clip("audio/wav")));
        assert!(!is_raw_pcm(&clip("not a mime type")));
    }

    #[test]
    fn test_sample_rate_from_parameters() {
        assert_eq!(sample_rate("audio/L16; codec=pcm; rate=16000"), 16_000);
        assert_eq!(sample_rate("audio/L16;rate=fast"), DEFAULT_SAMPLE_RATE);
        assert_eq!(sample_rate("garbage"), DEFAULT_SAMPLE_RATE);
    }

    #[test]
    fn test_playable_wraps_pcm_at_declared_rate() {
        let clip = AudioClip {
            mime_type: "audio/L16;codec=pcm;rate=16000".to_string(),
            data: vec![0, 1],
        };
        let (bytes, extension) = playable(&clip);
        assert_eq!(extension, "wav");
        assert_eq!(
            u32::from_le_bytes([bytes[24], bytes[25], bytes[26], bytes[27]]),
            16_000
        );
    }
}
