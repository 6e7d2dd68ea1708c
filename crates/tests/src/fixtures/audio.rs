use std::io::Cursor;

/// 16-bit PCM WAV with a 440 Hz tone.
pub fn tone_wav(sample_rate: u32, channels: u16, secs: f32) -> Vec<u8> {
    write_wav(sample_rate, channels, secs, |t| {
        (t * 440.0 * 2.0 * std::f32::consts::PI).sin() * 0.5
    })
}

/// 16-bit PCM WAV of digital silence.
pub fn silent_wav(sample_rate: u32, secs: f32) -> Vec<u8> {
    write_wav(sample_rate, 1, secs, |_| 0.0)
}

fn write_wav(sample_rate: u32, channels: u16, secs: f32, signal: impl Fn(f32) -> f32) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let frames = (sample_rate as f32 * secs) as usize;
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).expect("wav writer");
        for n in 0..frames {
            let sample = (signal(n as f32 / sample_rate as f32) * i16::MAX as f32) as i16;
            for _ in 0..channels {
                writer.write_sample(sample).expect("wav sample");
            }
        }
        writer.finalize().expect("wav finalize");
    }
    cursor.into_inner()
}
