use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use batchwarp_ops::backend::cpu;
use batchwarp_ops::interpolation::InterpolationMode;
use batchwarp_ops::layout::{ImageLayout, ImageSize};
use batchwarp_ops::warp::WarpAffineBatch;
use batchwarp_tensor::{DType, Tensor};

fn bench_warp_affine_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("WarpAffineBatch");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);

        // dst -> src half-scale sampling
        let m = [0.5f32, 0.0, 0.0, 0.0, 0.5, 0.0];
        let transforms = Tensor::from_vec(&[6], m.to_vec()).unwrap();
        let out_size = ImageSize {
            width: width / 2,
            height: height / 2,
        };

        let interleaved = Tensor::from_vec(
            &[*height, *width, 3],
            vec![0u8; height * width * 3],
        )
        .unwrap();
        let op = WarpAffineBatch::new(out_size)
            .unwrap()
            .interpolation(InterpolationMode::Linear);

        group.bench_with_input(
            BenchmarkId::new("interleaved_u8x3", &parameter_string),
            &(&interleaved, &transforms),
            |b, i| {
                let (image, transforms) = *i;
                let mut outputs = [Tensor::empty(DType::U8)];
                b.iter(|| {
                    op.apply(
                        cpu::registry(),
                        black_box(std::slice::from_ref(image)),
                        black_box(transforms),
                        black_box(&mut outputs),
                    )
                })
            },
        );

        let planar = Tensor::from_vec(
            &[7, *height, *width],
            vec![0f32; 7 * height * width],
        )
        .unwrap();
        let op = WarpAffineBatch::new(out_size)
            .unwrap()
            .layout(ImageLayout::ChannelFirst)
            .interpolation(InterpolationMode::Linear);

        group.bench_with_input(
            BenchmarkId::new("planar_f32x7", &parameter_string),
            &(&planar, &transforms),
            |b, i| {
                let (image, transforms) = *i;
                let mut outputs = [Tensor::empty(DType::F32)];
                b.iter(|| {
                    op.apply(
                        cpu::registry(),
                        black_box(std::slice::from_ref(image)),
                        black_box(transforms),
                        black_box(&mut outputs),
                    )
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_warp_affine_batch);
criterion_main!(benches);
