// crates/fc_io/src/drivers/gdal/driver.rs

//! GDAL 栅格驱动实现

use super::error::GdalError;
use std::path::Path;

#[cfg(feature = "gdal")]
use crate::drivers::raster::{RasterBand, RasterDriver, RasterMetadata};
#[cfg(feature = "gdal")]
use crate::error::IoResult;

/// GDAL 栅格驱动
#[cfg(feature = "gdal")]
pub struct GdalDriver {
    dataset: ::gdal::Dataset,
    metadata: RasterMetadata,
}

#[cfg(feature = "gdal")]
impl GdalDriver {
    /// 打开栅格文件
    pub fn open(path: impl AsRef<Path>) -> Result<Self, GdalError> {
        use ::gdal::Dataset;
        use fc_terrain::GeoTransform;

        let path = path.as_ref();
        if !path.exists() {
            return Err(GdalError::FileNotFound(path.display().to_string()));
        }

        let dataset = Dataset::open(path).map_err(|e| GdalError::OpenFailed(e.to_string()))?;
        let (width, height) = dataset.raster_size();
        let band_count = dataset.raster_count() as usize;
        let geo_transform = GeoTransform::from_gdal(dataset.geo_transform()?);
        let projection = Some(dataset.projection()).filter(|p| !p.is_empty());

        let nodata = if band_count > 0 {
            dataset.rasterband(1).ok().and_then(|b| b.no_data_value())
        } else {
            None
        };

        let metadata = RasterMetadata {
            width,
            height,
            band_count,
            geo_transform,
            projection,
            nodata,
        };

        Ok(Self { dataset, metadata })
    }

    fn read_band_raw(&self, band_idx: usize) -> Result<RasterBand, GdalError> {
        if band_idx == 0 || band_idx > self.metadata.band_count {
            return Err(GdalError::BandNotFound(band_idx));
        }

        let band = self.dataset.rasterband(band_idx as _)?;
        let nodata = band.no_data_value();

        let (width, height) = (self.metadata.width, self.metadata.height);
        let buffer = band
            .read_as::<f64>((0, 0), (width, height), (width, height), None)
            .map_err(|e| GdalError::ReadFailed(e.to_string()))?;

        Ok(RasterBand {
            data: buffer.data,
            width,
            height,
            nodata,
        })
    }
}

#[cfg(feature = "gdal")]
impl RasterDriver for GdalDriver {
    fn driver_name(&self) -> &'static str {
        "gdal"
    }

    fn metadata(&self) -> &RasterMetadata {
        &self.metadata
    }

    fn read_band(&self, band: usize) -> IoResult<RasterBand> {
        Ok(self.read_band_raw(band)?)
    }
}

/// 无 GDAL 支持时的占位实现
#[cfg(not(feature = "gdal"))]
pub struct GdalDriver;

#[cfg(not(feature = "gdal"))]
impl GdalDriver {
    /// 打开栅格文件 (无 GDAL 支持)
    pub fn open(path: impl AsRef<Path>) -> Result<Self, GdalError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(GdalError::FileNotFound(path.display().to_string()));
        }
        Err(GdalError::NotAvailable)
    }
}

#[cfg(all(test, not(feature = "gdal")))]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reported_before_availability() {
        let err = GdalDriver::open("/definitely/not/here.tif").err().unwrap();
        assert!(matches!(err, GdalError::FileNotFound(_)));
    }

    #[test]
    fn test_open_without_feature() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = GdalDriver::open(file.path()).err().unwrap();
        assert!(matches!(err, GdalError::NotAvailable));
    }
}
