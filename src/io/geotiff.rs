use super::*;
use std::{fs::File, io::BufReader, path::Path};
use tiff::{
    decoder::{Decoder, DecodingResult},
    tags::Tag,
    ColorType,
};

const MODEL_PIXEL_SCALE: u16 = 33550;
const MODEL_TIEPOINT: u16 = 33922;
const GEO_KEY_DIRECTORY: u16 = 34735;
const GDAL_NODATA: u16 = 42113;

/// A single band GeoTIFF read on demand.
///
/// Only the strips or tiles overlapping a requested window are decoded.
pub struct GeoTiff {
    context: String,
    decoder: Decoder<BufReader<File>>,
    dims: (u32, u32),
    bbox: [f64; 4],
    resolution: Option<[f64; 2]>,
    no_data: Option<f64>,
    projection: Option<String>,
}

impl GeoTiff {
    /// Open the GeoTIFF at `path` and read its georeferencing tags.
    ///
    /// # Errors
    /// [`Error::RasterRead`] if the file cannot be decoded, holds more than one band, or lacks
    /// the pixel scale and tiepoint tags.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let context = path.display().to_string();
        let err = |e: &dyn std::fmt::Display| Error::raster(context.as_str(), e);

        let file = File::open(path).map_err(|e| err(&e))?;
        let mut decoder = Decoder::new(BufReader::new(file)).map_err(|e| err(&e))?;

        match decoder.colortype().map_err(|e| err(&e))? {
            ColorType::Gray(_) => (),
            other => return Err(err(&format!("expecting a single band, found {:?}", other))),
        }

        let dims = decoder.dimensions().map_err(|e| err(&e))?;

        let mut tag_f64s = |code| -> Result<Option<Vec<f64>>> {
            decoder
                .find_tag(Tag::from_u16_exhaustive(code))
                .and_then(|v| v.map(|v| v.into_f64_vec()).transpose())
                .map_err(|e| err(&e))
        };
        let scale = tag_f64s(MODEL_PIXEL_SCALE)?
            .filter(|s| s.len() >= 2)
            .ok_or_else(|| err(&"missing ModelPixelScale tag"))?;
        let tiepoint = tag_f64s(MODEL_TIEPOINT)?
            .filter(|t| t.len() >= 6)
            .ok_or_else(|| err(&"missing ModelTiepoint tag"))?;

        let (sx, sy) = (scale[0], scale[1]);
        let min_x = tiepoint[3] - tiepoint[0] * sx;
        let max_y = tiepoint[4] + tiepoint[1] * sy;
        let bbox = [
            min_x,
            max_y - dims.1 as f64 * sy,
            min_x + dims.0 as f64 * sx,
            max_y,
        ];

        // the sentinel is stored as ascii text
        let no_data = decoder
            .find_tag(Tag::from_u16_exhaustive(GDAL_NODATA))
            .ok()
            .flatten()
            .and_then(|v| v.into_string().ok())
            .and_then(|s| s.trim_matches(char::from(0)).trim().parse().ok());

        let projection = decoder
            .find_tag(Tag::from_u16_exhaustive(GEO_KEY_DIRECTORY))
            .ok()
            .flatten()
            .and_then(|v| v.into_u32_vec().ok())
            .and_then(|dir| geokeys::projection_from_geokeys(&dir));

        log::debug!(
            "opened '{}', decoding in blocks of {:?}",
            context,
            decoder.chunk_dimensions()
        );

        Ok(Self {
            context,
            decoder,
            dims,
            bbox,
            resolution: Some([sx, sy]),
            no_data,
            projection,
        })
    }

    fn err(&self, e: impl std::fmt::Display) -> Error {
        Error::raster(self.context.as_str(), e)
    }
}

impl Raster for GeoTiff {
    fn dimensions(&self) -> (u32, u32) {
        self.dims
    }

    fn bbox(&self) -> [f64; 4] {
        self.bbox
    }

    fn resolution(&self) -> Option<[f64; 2]> {
        self.resolution
    }

    fn no_data(&self) -> Option<f64> {
        self.no_data
    }

    fn projection(&self) -> Option<String> {
        self.projection.clone()
    }

    fn read_window(&mut self, window: Window) -> Result<HeightGrid> {
        raster::check_window(window, self.dims)?;

        let (cw, ch) = self.decoder.chunk_dimensions();
        if cw == 0 || ch == 0 {
            return Err(self.err("zero sized strips or tiles"));
        }
        let across = (self.dims.0 + cw - 1) / cw;

        let (w, h) = (window.width(), window.height());
        let mut zs = vec![0.0; w * h];

        for cy in window.min_y / ch..=window.max_y / ch {
            for cx in window.min_x / cw..=window.max_x / cw {
                let idx = cy * across + cx;
                let (dw, dh) = self.decoder.chunk_data_dimensions(idx);
                let data = self
                    .decoder
                    .read_chunk(idx)
                    .map_err(|e| self.err(format!("chunk {}: {}", idx, e)))
                    .and_then(|d| samples(d).map_err(|e| self.err(e)))?;
                if data.len() < (dw * dh) as usize {
                    return Err(self.err(format!(
                        "chunk {} holds {} samples, expecting {}",
                        idx,
                        data.len(),
                        dw * dh
                    )));
                }

                // overlap of this chunk and the window, in raster pixels
                let (ox, oy) = (cx * cw, cy * ch);
                let xs = window.min_x.max(ox)..=window.max_x.min(ox + dw - 1);
                let ys = window.min_y.max(oy)..=window.max_y.min(oy + dh - 1);

                for y in ys {
                    let src = ((y - oy) * dw) as usize;
                    let dst = (y - window.min_y) as usize * w;
                    for x in xs.clone() {
                        zs[dst + (x - window.min_x) as usize] = data[src + (x - ox) as usize];
                    }
                }
            }
        }

        HeightGrid::new(w, h, zs)
    }
}

fn samples(data: DecodingResult) -> std::result::Result<Vec<f64>, &'static str> {
    use DecodingResult::*;
    fn conv<T: Into<f64>>(v: Vec<T>) -> Vec<f64> {
        v.into_iter().map(Into::into).collect()
    }
    let v = match data {
        U8(v) => conv(v),
        U16(v) => conv(v),
        U32(v) => conv(v),
        I8(v) => conv(v),
        I16(v) => conv(v),
        I32(v) => conv(v),
        F32(v) => conv(v),
        F64(v) => v,
        U64(v) => v.into_iter().map(|x| x as f64).collect(),
        I64(v) => v.into_iter().map(|x| x as f64).collect(),
        #[allow(unreachable_patterns)]
        _ => return Err("unsupported sample format"),
    };
    Ok(v)
}
