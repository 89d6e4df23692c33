//! Run configuration, read from JSON.
use crate::*;
use std::path::{Path, PathBuf};

/// Output STL encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Ascii,
    Binary,
}

/// Treatment of no-data samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoData {
    /// The sentinel is meshed as an ordinary height.
    #[default]
    Keep,
    /// Sentinels are replaced by the mean of their valid neighbours.
    Fill,
}

/// Everything a run needs besides the output directory.
///
/// ```
/// # use geostl::config::*;
/// let cfg = Config::from_json(br#"{
///     "filename": "dem.tif",
///     "minLat": 146.0, "maxLat": 146.5,
///     "minLng": -42.0, "maxLng": -41.5,
///     "chunksCountX": 2
/// }"#).unwrap();
/// assert_eq!(cfg.chunks_count_x, 2);
/// assert_eq!(cfg.chunks_count_y, 1);
/// assert_eq!(cfg.format, Format::Ascii);
/// assert_eq!(cfg.chunk_name(1, 0), "res_1_0");
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Path to the elevation raster.
    pub filename: PathBuf,
    /// Low edge along the raster x axis.
    pub min_lat: f64,
    /// High edge along the raster x axis.
    pub max_lat: f64,
    /// Low edge along the raster y axis.
    pub min_lng: f64,
    /// High edge along the raster y axis.
    pub max_lng: f64,
    /// Vertical exaggeration.
    #[serde(default = "one")]
    pub height_scale: f64,
    #[serde(default = "one_u32")]
    pub chunks_count_x: u32,
    #[serde(default = "one_u32")]
    pub chunks_count_y: u32,
    #[serde(default)]
    pub format: Format,
    #[serde(default)]
    pub no_data: NoData,
    /// Sentinel overriding the one the raster declares.
    #[serde(default)]
    pub no_data_value: Option<f64>,
    /// Process chunks concurrently.
    #[serde(default)]
    pub parallel: bool,
    #[serde(default = "default_prefix")]
    pub output_prefix: String,
}

fn one() -> f64 {
    1.0
}

fn one_u32() -> u32 {
    1
}

fn default_prefix() -> String {
    "res".to_string()
}

impl Config {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &[u8]) -> Result<Self> {
        let cfg: Config = serde_json::from_slice(json)
            .map_err(|e| Error::Config(format!("invalid configuration json: {}", e)))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse, and validate the configuration file at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read(path).map_err(|e| {
            Error::Config(format!("failed reading '{}': {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    /// Check field ranges.
    ///
    /// # Errors
    /// [`Error::Config`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let bad = |msg: String| Err(Error::Config(msg));

        if self.filename.as_os_str().is_empty() {
            return bad("`filename` is empty".into());
        }
        for (name, v) in [
            ("minLat", self.min_lat),
            ("maxLat", self.max_lat),
            ("minLng", self.min_lng),
            ("maxLng", self.max_lng),
        ] {
            if !v.is_finite() {
                return bad(format!("`{}` must be finite, found {}", name, v));
            }
        }
        if self.min_lat >= self.max_lat {
            return bad(format!(
                "`minLat` ({}) must be less than `maxLat` ({})",
                self.min_lat, self.max_lat
            ));
        }
        if self.min_lng >= self.max_lng {
            return bad(format!(
                "`minLng` ({}) must be less than `maxLng` ({})",
                self.min_lng, self.max_lng
            ));
        }
        // the lng centre feeds the cosine of the x scale
        if self.min_lng <= -90.0 || self.max_lng >= 90.0 {
            return bad(format!(
                "`minLng` ({}) and `maxLng` ({}) must lie strictly between -90 and 90",
                self.min_lng, self.max_lng
            ));
        }
        if !(self.height_scale.is_finite() && self.height_scale > 0.0) {
            return bad(format!(
                "`heightScale` must be finite and positive, found {}",
                self.height_scale
            ));
        }
        if self.chunks_count_x == 0 || self.chunks_count_y == 0 {
            return bad(format!(
                "chunk counts must be at least 1, found {}x{}",
                self.chunks_count_x, self.chunks_count_y
            ));
        }
        if self.output_prefix.is_empty()
            || self.output_prefix.contains(|c: char| {
                matches!(c, '/' | '\\') || c.is_control() || c.is_whitespace()
            })
        {
            return bad(format!(
                "`outputPrefix` must be a plain file name, found '{}'",
                self.output_prefix
            ));
        }
        Ok(())
    }

    pub fn bounds(&self) -> GeoBounds {
        GeoBounds {
            min_lat: self.min_lat,
            max_lat: self.max_lat,
            min_lng: self.min_lng,
            max_lng: self.max_lng,
        }
    }

    /// The latitude at the centre of the bounds, taken from the `lng` pair.
    pub fn centre_latitude(&self) -> f64 {
        (self.min_lng + self.max_lng) / 2.0
    }

    /// Scale for a raster with pixel size `resolution`, one arc-second if unknown.
    pub fn scale(&self, resolution: Option<[f64; 2]>) -> Scale {
        let res = resolution
            .filter(|r| r.iter().all(|x| x.is_finite() && *x != 0.0))
            .unwrap_or([ARC_SECOND; 2]);
        Scale::geographic(res, self.centre_latitude(), self.height_scale)
    }

    /// Solid name of chunk `(nx, ny)`.
    pub fn chunk_name(&self, nx: u32, ny: u32) -> String {
        format!("{}_{}_{}", self.output_prefix, nx, ny)
    }

    /// Artifact file name of chunk `(nx, ny)`.
    pub fn chunk_filename(&self, nx: u32, ny: u32) -> String {
        format!("{}.stl", self.chunk_name(nx, ny))
    }
}
