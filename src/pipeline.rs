//! Raster to STL artifacts, chunk by chunk.
//!
//! A run goes through three stages:
//! 1. locate the area of interest in the raster and split it into chunks,
//! 2. pass over every chunk once to find the global base level,
//! 3. mesh each chunk against the shared [`MeshContext`] and write it out.
//!
//! Only one chunk's samples are held in memory at a time in sequential mode.
use crate::{
    config::{Config, Format, NoData},
    io::{stl, Raster},
    *,
};
use rayon::prelude::*;
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    sync::Mutex,
    time::Instant,
};

/// Mesh the configured area of `raster` and write one STL per chunk into `out_dir`.
///
/// Returns the artifact paths in chunk order (`nx` outermost).
///
/// # Errors
/// Any failure stops the run. Failures raised while processing a chunk are wrapped in
/// [`Error::Chunk`]. Artifacts written before the failure are left in place, a failed chunk
/// never leaves a partial file.
pub fn run<R: Raster + Send>(mut raster: R, cfg: &Config, out_dir: &Path) -> Result<Vec<PathBuf>> {
    cfg.validate()?;

    let dims = raster.dimensions();
    log::info!("Dimensions: {}x{}", dims.0, dims.1);
    log::info!("Bbox: {:?}", raster.bbox());
    match raster.resolution() {
        Some(r) => log::info!("Resolution: {:?}", r),
        None => log::info!("Resolution: unknown, assuming one arc-second"),
    }
    if let Some(p) = raster.projection() {
        log::info!("Projection: {}", p);
    }

    let window = Window::from_geo_bounds(raster.bbox(), dims, cfg.bounds())?;
    log::info!("Global window: {}", window);

    let chunks = window.chunks(cfg.chunks_count_x, cfg.chunks_count_y)?;
    let no_data = cfg.no_data_value.or_else(|| raster.no_data());

    let range = global_range(&mut raster, &chunks, no_data, cfg.no_data)?;
    let base = range.base().ok_or_else(|| {
        Error::raster("computing base level", "no valid samples in the area of interest")
    })?;
    if range.min == range.max {
        return Err(Error::degenerate(format!(
            "every sample in window {} is {}, a flat dataset has no relief to mesh",
            window, range.min
        )));
    }
    log::info!(
        "Base level: {} (samples range {} to {})",
        base,
        range.min,
        range.max
    );

    let ctx = MeshContext {
        scale: cfg.scale(raster.resolution()),
        base,
    };
    log::debug!("mesh scale: {:?}", ctx.scale);
    if !ctx.scale.is_positive() {
        return Err(Error::degenerate(format!(
            "mesh scale {:?} must be finite and positive on every axis",
            ctx.scale.0
        )));
    }

    fs::create_dir_all(out_dir).map_err(|source| Error::Write {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let job = Job {
        cfg,
        ctx: &ctx,
        no_data,
        out_dir,
    };

    if cfg.parallel {
        let raster = Mutex::new(raster);
        chunks
            .par_iter()
            .map(|c| {
                let grid = raster
                    .lock()
                    .unwrap_or_else(std::sync::PoisonError::into_inner)
                    .read_window(c.window);
                grid.and_then(|g| job.process(c, g))
                    .map_err(|e| e.in_chunk(c.nx, c.ny, c.window))
            })
            .collect()
    } else {
        chunks
            .iter()
            .map(|c| {
                raster
                    .read_window(c.window)
                    .and_then(|g| job.process(c, g))
                    .map_err(|e| e.in_chunk(c.nx, c.ny, c.window))
            })
            .collect()
    }
}

/// The sample range over every chunk.
///
/// With [`NoData::Fill`] the `no_data` sentinel is left out.
pub fn global_range<R: Raster>(
    raster: &mut R,
    chunks: &[Chunk],
    no_data: Option<f64>,
    mode: NoData,
) -> Result<MinMax> {
    let mut range = MinMax::empty();
    let mut sentinels = 0;

    for c in chunks {
        let grid = raster
            .read_window(c.window)
            .map_err(|e| e.in_chunk(c.nx, c.ny, c.window))?;
        match (mode, no_data) {
            (NoData::Fill, Some(nd)) => {
                sentinels += grid.count_no_data(nd);
                // NaN never moves the range, so a NaN sentinel needs no filtering
                range.extend(grid.zs().iter().copied().filter(|&z| z != nd));
            }
            (_, nd) => {
                if let Some(nd) = nd {
                    sentinels += grid.count_no_data(nd);
                }
                range.extend(grid.zs().iter().copied());
            }
        }
    }

    if sentinels > 0 {
        match mode {
            NoData::Keep => log::warn!(
                "{} no-data samples will be meshed as heights, set `noData` to \"fill\" to replace them",
                sentinels
            ),
            NoData::Fill => log::info!("{} no-data samples will be filled", sentinels),
        }
    }

    Ok(range)
}

struct Job<'a> {
    cfg: &'a Config,
    ctx: &'a MeshContext,
    no_data: Option<f64>,
    out_dir: &'a Path,
}

impl Job<'_> {
    fn process(&self, chunk: &Chunk, mut grid: HeightGrid) -> Result<PathBuf> {
        let Chunk { nx, ny, window } = *chunk;
        log::info!("Window: {}", window);
        let start = Instant::now();

        if let (NoData::Fill, Some(nd)) = (self.cfg.no_data, self.no_data) {
            let n = grid.fill_no_data(nd)?;
            if n > 0 {
                log::debug!("chunk ({}, {}): filled {} no-data samples", nx, ny, n);
            }
        }

        let solid = mesh(&grid, self.ctx, self.cfg.chunk_name(nx, ny))?;
        let path = self.out_dir.join(self.cfg.chunk_filename(nx, ny));

        write_atomic(&path, |wtr| match self.cfg.format {
            Format::Ascii => stl::write_stl_ascii(&solid, wtr),
            Format::Binary => stl::write_stl_binary(&solid, wtr),
        })?;

        log::debug!(
            "chunk ({}, {}): {} facets written to '{}' in {:?}",
            nx,
            ny,
            solid.facet_len(),
            path.display(),
            start.elapsed()
        );

        Ok(path)
    }
}

/// Write to a sibling temporary file and rename it over `path` once complete.
pub fn write_atomic<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
{
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let written = File::create(&tmp).and_then(|file| {
        let mut wtr = BufWriter::new(file);
        write(&mut wtr)?;
        wtr.flush()?;
        wtr.get_ref().sync_all()
    });

    let result = written.and_then(|_| fs::rename(&tmp, path));
    if let Err(source) = result {
        let _ = fs::remove_file(&tmp);
        return Err(Error::Write {
            path: path.to_path_buf(),
            source,
        });
    }

    Ok(())
}
