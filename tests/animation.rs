extern crate image;
extern crate multibrot;
extern crate num;
extern crate rayon;
extern crate tempfile;

use multibrot::{
    generate, generate_single, palette, Animation, ImageFormat, ImageWriter, Viewport,
};
use num::Complex;
use rayon::ThreadPoolBuilder;
use tempfile::tempdir;

fn viewport() -> Viewport {
    Viewport::new(4, 4, Complex::new(-2.0, -1.0), Complex::new(1.0, 1.0)).unwrap()
}

#[test]
fn single_frame_is_reproducible_across_pool_sizes() {
    let viewport = viewport();
    let grids: Vec<_> = [1, 4, 1, 4]
        .iter()
        .map(|&threads| {
            let pool = ThreadPoolBuilder::new().num_threads(threads).build().unwrap();
            pool.install(|| generate(&viewport, 2.0, 50))
        })
        .collect();
    let reference = generate_single(&viewport, 2.0, 50);
    for grid in &grids {
        assert_eq!(grid, &reference);
        assert_eq!(grid.depths().len(), 16);
    }
}

#[test]
fn written_frames_decode_to_the_mapped_colors() {
    let dir = tempdir().unwrap();
    let writer = ImageWriter::new(dir.path(), ImageFormat::Png, 0).unwrap();
    let animation = Animation::new(viewport(), 3, 1.0, 0.5, 50).unwrap();
    let pool = ThreadPoolBuilder::new().num_threads(3).build().unwrap();

    let summary = animation.run(&pool, &writer, 2).unwrap();
    assert!(summary.is_success());
    assert_eq!(summary.rendered, 3);

    for frame in animation.descriptors() {
        let expected = palette::map(&generate_single(&viewport(), frame.exponent, 50));
        let path = dir.path().join(format!("{:03}.png", frame.index));
        let decoded = image::open(&path).unwrap().to_rgb();
        assert_eq!(decoded.into_raw(), expected.to_rgb8());
    }
}
