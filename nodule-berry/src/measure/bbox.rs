//! 包围盒与质心.

use ndarray::{arr2, Array2, Axis};

use crate::geometry::min_max;
use crate::Annotation;

/// 轴对齐三维包围盒. 每个轴保存闭区间 `[min, max]`.
///
/// 由 [`Annotation::bbox`] 得到时三个轴依次为 `x`, `y` (像素), `z` (物理位置, mm).
/// 由 [`crate::mask::BoolMask`] 携带时前两个轴已交换, 依次为 `y`, `x`, `z`,
/// 与掩膜数组的轴顺序一致.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    bounds: [[f64; 2]; 3],
}

impl BoundingBox {
    /// 直接由三个轴的 `[min, max]` 构造.
    ///
    /// 若某个轴 `min > max`, 则程序 panic.
    pub fn new(bounds: [[f64; 2]; 3]) -> Self {
        assert!(bounds.iter().all(|[lo, hi]| lo <= hi), "包围盒下界不能大于上界");
        Self { bounds }
    }

    /// 第 `axis` 个轴的 `[min, max]`. `axis` 越界时 panic.
    #[inline]
    pub fn axis(&self, axis: usize) -> [f64; 2] {
        self.bounds[axis]
    }

    /// 第 `axis` 个轴的下界.
    #[inline]
    pub fn min(&self, axis: usize) -> f64 {
        self.bounds[axis][0]
    }

    /// 第 `axis` 个轴的上界.
    #[inline]
    pub fn max(&self, axis: usize) -> f64 {
        self.bounds[axis][1]
    }

    /// 第 `axis` 个轴上从 `floor(min)` 到 `floor(max)` (闭区间) 的整数像素个数.
    /// 仅对像素轴有意义.
    #[inline]
    pub fn pixel_len(&self, axis: usize) -> usize {
        (self.max(axis).floor() - self.min(axis).floor()) as usize + 1
    }

    /// 交换前两个轴.
    #[inline]
    pub fn swapped_xy(&self) -> Self {
        let [a, b, c] = self.bounds;
        Self { bounds: [b, a, c] }
    }

    /// 以 `3 x 2` 矩阵形式返回.
    pub fn to_array(&self) -> Array2<f64> {
        arr2(&self.bounds)
    }
}

impl Annotation {
    /// 计算标注的包围盒, 三行依次为 `x`, `y`, `z`, 两列依次为闭区间的下界和上界.
    ///
    /// 若 `scan_slice` 是扫描中的一张二维切片 (按 `(row, column)` 访问),
    /// 则标注在该切片上的部分被包含在
    /// `scan_slice[bbox.min(1)..=bbox.max(1), bbox.min(0)..=bbox.max(0)]` 内.
    pub fn bbox(&self) -> BoundingBox {
        let m = self.contours_to_matrix();
        let mut bounds = [[0.0; 2]; 3];
        for (b, col) in bounds.iter_mut().zip(m.columns()) {
            // 标注至少有一条轮廓, 每条轮廓至少一个点.
            *b = min_max(col.iter().copied()).unwrap_or([f64::NAN; 2]);
        }
        BoundingBox { bounds }
    }

    /// 计算标注的质心, 即全部轮廓顶点的逐坐标平均值.
    ///
    /// 前两个分量为像素坐标均值, 最后一个分量为 z 物理位置均值.
    pub fn centroid(&self) -> [f64; 3] {
        let m = self.contours_to_matrix();
        let mut ans = [0.0; 3];
        if let Some(mean) = m.mean_axis(Axis(0)) {
            ans.iter_mut().zip(mean.iter()).for_each(|(a, v)| *a = *v);
        }
        ans
    }
}
