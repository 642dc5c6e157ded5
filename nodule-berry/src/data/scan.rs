use ndarray::{Array2, ArrayView2};
use std::borrow::Cow;

use crate::error::{BuildError, BuildResult};
use crate::Idx2d;

/// 外部协作方返回的装箱错误.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// 扫描的几何元信息. 标注只持有这份快照, 不拥有扫描本身.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScanGeometry {
    pixel_spacing: f64,
    slice_thickness: f64,
}

impl ScanGeometry {
    /// 构造扫描几何信息. `pixel_spacing` 为水平方向 (x, y 各向同性) 像素间距,
    /// `slice_thickness` 为层厚, 单位均为毫米.
    ///
    /// 两者都必须是有限正数, 否则返回 `Err(BuildError::InvalidGeometry)`.
    pub fn new(pixel_spacing: f64, slice_thickness: f64) -> BuildResult<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(pixel_spacing) || !valid(slice_thickness) {
            return Err(BuildError::InvalidGeometry {
                pixel_spacing,
                slice_thickness,
            });
        }
        Ok(Self {
            pixel_spacing,
            slice_thickness,
        })
    }

    /// 像素间距 (mm / pixel).
    #[inline]
    pub fn pixel_spacing(&self) -> f64 {
        self.pixel_spacing
    }

    /// 层厚 (mm). 仅在标注无法从轮廓推断层间距时使用.
    #[inline]
    pub fn slice_thickness(&self) -> f64 {
        self.slice_thickness
    }

    /// 水平切片上单个像素的面积 (mm²).
    #[inline]
    pub fn pixel_area(&self) -> f64 {
        self.pixel_spacing * self.pixel_spacing
    }
}

/// CT 影像栈中的一张水平切片. HU 值以 `f32` 保存, 按 `(row, column)` 访问.
#[derive(Debug, Clone)]
pub struct ScanImage {
    source_id: String,
    z_position: f64,
    pixels: Array2<f32>,
}

impl ScanImage {
    /// 直接构造切片.
    pub fn new(source_id: impl Into<String>, z_position: f64, pixels: Array2<f32>) -> Self {
        Self {
            source_id: source_id.into(),
            z_position,
            pixels,
        }
    }

    /// 切片标识. 与 [`crate::Contour::source_id`] 对应.
    #[inline]
    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    /// 切片物理位置 (mm).
    #[inline]
    pub fn z_position(&self) -> f64 {
        self.z_position
    }

    /// 像素数据的不可变视图.
    #[inline]
    pub fn pixels(&self) -> ArrayView2<'_, f32> {
        self.pixels.view()
    }

    /// 切片形状 `(rows, columns)`.
    #[inline]
    pub fn frame_shape(&self) -> Idx2d {
        self.pixels.dim()
    }
}

/// 外部影像栈协作方.
///
/// 加载可能是缓慢的阻塞 I/O, 本 crate 不定义取消或超时语义.
/// 需要取消的调用方应在外部包装该调用.
pub trait ImageStack {
    /// 加载整个影像栈. 返回顺序不作要求, 调用方会按 z 位置排序.
    fn load_images(&self) -> Result<Cow<'_, [ScanImage]>, BoxError>;
}

impl ImageStack for [ScanImage] {
    #[inline]
    fn load_images(&self) -> Result<Cow<'_, [ScanImage]>, BoxError> {
        Ok(Cow::Borrowed(self))
    }
}

impl ImageStack for Vec<ScanImage> {
    #[inline]
    fn load_images(&self) -> Result<Cow<'_, [ScanImage]>, BoxError> {
        Ok(Cow::Borrowed(self.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_init() {
        assert!(ScanGeometry::new(0.7, 2.5).is_ok());
        assert!(ScanGeometry::new(0.0, 2.5).is_err());
        assert!(ScanGeometry::new(0.7, -1.0).is_err());
        assert!(ScanGeometry::new(f64::NAN, 1.0).is_err());

        let g = ScanGeometry::new(0.5, 1.0).unwrap();
        assert_eq!(g.pixel_area(), 0.25);
    }

    #[test]
    fn test_vec_stack_borrows() {
        let stack = vec![ScanImage::new("a", 1.0, Array2::zeros((4, 3)))];
        let loaded = stack.load_images().unwrap();
        assert!(matches!(loaded, Cow::Borrowed(_)));
        assert_eq!(loaded[0].frame_shape(), (4, 3));
    }
}
