#![no_main]

use lamina::prelude::*;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // First two bytes pick the dimensions and format, the rest is pixel data
    if data.len() < 2 {
        return;
    }
    let width = usize::from(data[0] % 16);
    let height = usize::from(data[1] % 16);
    let format = if data[0] & 0x80 == 0 {
        ImageFormat::L8
    } else {
        ImageFormat::Rgba8
    };
    let bytes = data[2..].to_vec();

    let image = match Image::from_bytes(width, height, format, bytes.clone()) {
        Ok(img) => img,
        Err(_) => {
            assert_ne!(bytes.len(), width * height * format.channel_count());
            return;
        }
    };

    // Every ingest path must either succeed with consistent shapes or return an error
    if let Ok(m) = Matrix::from_image(&image, 0) {
        assert_eq!(m.shape(), (height, width));
        assert!(m.as_slice().iter().all(|v| (0.0..=1.0).contains(v)));
        let round = m.to_image();
        assert_eq!(round.width(), width);
        assert_eq!(round.height(), height);
    }

    if let Ok(t) = Tensor3::from_image(&image, ImageChannels::RGBA) {
        assert_eq!(t.n_rows(), height);
        assert_eq!(t.n_cols(), width);
    }

    let reals: Vec<Real> = data.iter().map(|&b| Real::from(b)).collect();
    let _ = Matrix::from_vec(height, width, reals.clone());
    let _ = Tensor3::from_vec(1, height, width, reals);
});
