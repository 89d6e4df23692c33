use criterion::*;
use geostl::*;

fn terrain(size: usize) -> HeightGrid {
    HeightGrid::from_fn(size, size, |x, y| {
        let (x, y) = (x as f64 / 7.0, y as f64 / 11.0);
        300.0 + 40.0 * x.sin() * y.cos() + (x + y) * 2.0
    })
}

fn ctx(grid: &HeightGrid) -> MeshContext {
    MeshContext {
        scale: Scale::geographic([ARC_SECOND; 2], -41.5, 1.0),
        base: compute_base(grid.zs()).unwrap(),
    }
}

fn meshing(c: &mut Criterion) {
    c.bench_function("mesh small chunk", |b| {
        let g = terrain(50);
        let ctx = ctx(&g);
        b.iter(|| mesh(&g, &ctx, "bench").unwrap())
    });
    c.bench_function("mesh large chunk", |b| {
        let g = terrain(500); // about half a million facets
        let ctx = ctx(&g);
        b.iter(|| mesh(&g, &ctx, "bench").unwrap())
    });
}

fn base_level(c: &mut Criterion) {
    c.bench_function("base level large chunk", |b| {
        let g = terrain(1000);
        b.iter(|| compute_base(g.zs()))
    });
}

fn stl(c: &mut Criterion) {
    use geostl::io::stl::*;

    let g = terrain(200);
    let solid = mesh(&g, &ctx(&g), "bench").unwrap();

    c.bench_function("write ascii stl", |b| b.iter(|| to_stl_ascii(&solid)));
    c.bench_function("write binary stl", |b| b.iter(|| to_stl_binary(&solid)));

    let ascii = to_stl_ascii(&solid);
    c.bench_function("read ascii stl", |b| b.iter(|| from_stl_ascii(&ascii).unwrap()));
}

fn no_data(c: &mut Criterion) {
    c.bench_function("fill scattered no-data", |b| {
        let mut g = terrain(300);
        for i in (0..g.len()).step_by(17) {
            g.set(i % 300, i / 300, -32768.0);
        }
        b.iter_batched(
            || g.clone(),
            |mut g| g.fill_no_data(-32768.0).unwrap(),
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, meshing, base_level, stl, no_data);
criterion_main!(benches);
