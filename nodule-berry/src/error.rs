//! 运行时错误.

use std::fmt;
use thiserror::Error;

use crate::{BoxError, Idx2d};

/// 值对象构造错误.
pub type BuildResult<T> = Result<T, BuildError>;

/// 体数据截取 / 重采样错误.
pub type VolumeResult<T> = Result<T, VolumeError>;

/// 构造 [`crate::Contour`], [`crate::Annotation`] 等值对象时的校验错误.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    /// 轮廓不含任何点.
    #[error("contour has no points")]
    EmptyContour,

    /// 标注不含任何轮廓.
    #[error("annotation has no contours")]
    EmptyAnnotation,

    /// 坐标为 inf 或 NaN.
    #[error("non-finite coordinate ({0}, {1}, {2})")]
    NonFiniteCoordinate(f64, f64, f64),

    /// 像素间距或层厚不是有限正数.
    #[error("invalid scan geometry: pixel spacing {pixel_spacing}, slice thickness {slice_thickness}")]
    InvalidGeometry {
        /// 像素间距 (mm).
        pixel_spacing: f64,
        /// 层厚 (mm).
        slice_thickness: f64,
    },

    /// 特征评分超出其取值范围. 第一个参数为特征名, 第二个参数为实际评分.
    #[error("{0} score out of bounds: {1}")]
    ScoreOutOfRange(&'static str, u8),

    /// 标注 id 重复.
    #[error("duplicate annotation id {0}")]
    DuplicateAnnotation(u64),

    /// 轮廓引用的切片标识不在扫描的切片列表中.
    #[error("contour refers to unknown slice {0:?}")]
    UnknownSlice(String),
}

/// 体数据的三个轴. 顺序与 [`crate::mask::BoolMask`] 的数组轴一致.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum VolumeAxis {
    /// 第 0 轴, 图像的行方向 (y).
    Row,

    /// 第 1 轴, 图像的列方向 (x).
    Column,

    /// 第 2 轴, 相邻切片方向 (z).
    Slice,
}

impl fmt::Display for VolumeAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Row => "row",
            Self::Column => "column",
            Self::Slice => "slice",
        };
        f.write_str(s)
    }
}

/// [`crate::Annotation::to_volume`] 的运行时错误.
#[derive(Debug, Error)]
pub enum VolumeError {
    /// 指定的 padding 使某一轴的索引越出 CT 影像范围.
    ///
    /// `lower` 为 `起始索引 - pad_before`, `upper` 为 `结束索引 + pad_after`.
    #[error("specified {axis}-padding results in out-of-bounds index: index-pad={lower}, index+pad={upper}")]
    PaddingOutOfBounds {
        /// 越界的轴.
        axis: VolumeAxis,
        /// 下界索引 (含).
        lower: i64,
        /// 上界索引.
        upper: i64,
    },

    /// 外部影像加载失败.
    #[error("failed to load image stack")]
    ImageLoad(#[source] BoxError),

    /// 影像栈为空.
    #[error("image stack is empty")]
    EmptyStack,

    /// 影像栈中切片形状不一致. 第一个参数为切片在按 z 排序后的位置.
    #[error("image {0} has frame shape {2:?}, expected {1:?}")]
    FrameMismatch(usize, Idx2d, Idx2d),

    /// 影像的 z 位置不是有限值. 参数为该影像的切片标识.
    #[error("image {0:?} has a non-finite z position")]
    NonFiniteZ(String),

    /// 重采样间距不是有限正数.
    #[error("invalid resample spacing {0}")]
    InvalidSpacing(f64),
}
