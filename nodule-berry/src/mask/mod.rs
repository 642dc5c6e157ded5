//! 三维布尔掩膜.
//!
//! 在标注包围盒内, 对每个不同的 z 位置生成一层二维掩膜:
//! 先由 inclusion 轮廓 "点亮" 像素, 再由 exclusion 轮廓挖去空洞.

use log::warn;
use ndarray::{Array3, ArrayView2, ArrayView3, Axis};
use ordered_float::OrderedFloat;
use std::collections::BTreeMap;

use crate::geometry::contains_points;
use crate::measure::{slice_thicknesses, BoundingBox};
use crate::overlap::{Voxel, VoxelSet};
use crate::{Annotation, Contour, Idx3d, Point2d, ScanGeometry};

/// 标注的三维布尔掩膜.
///
/// 数组按 `(row, column, slice)` 即 `(y, x, z)` 组织; 第 `k` 层对应
/// [`Self::z_positions`] 中第 `k` 个 z 位置 (升序).
/// `bbox` 的轴顺序与数组一致, 同样为 `y`, `x`, `z`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoolMask {
    data: Array3<bool>,
    bbox: BoundingBox,
    z_positions: Vec<f64>,
}

impl BoolMask {
    /// 掩膜数据的不可变视图.
    #[inline]
    pub fn data(&self) -> ArrayView3<'_, bool> {
        self.data.view()
    }

    /// 掩膜形状 `(rows, columns, slices)`.
    #[inline]
    pub fn shape(&self) -> Idx3d {
        self.data.dim()
    }

    /// 掩膜对应的包围盒, 轴顺序为 `y`, `x`, `z`.
    #[inline]
    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    /// 每一层对应的 z 物理位置 (升序).
    #[inline]
    pub fn z_positions(&self) -> &[f64] {
        &self.z_positions
    }

    /// 第 `k` 层二维掩膜. `k` 越界时 panic.
    #[inline]
    pub fn slice_at(&self, k: usize) -> ArrayView2<'_, bool> {
        self.data.index_axis(Axis(2), k)
    }

    /// 消费自我, 获得底层数组与包围盒.
    #[inline]
    pub fn into_parts(self) -> (Array3<bool>, BoundingBox) {
        (self.data, self.bbox)
    }

    /// 前景体素个数.
    #[inline]
    pub fn voxel_count(&self) -> usize {
        self.data.iter().filter(|v| **v).count()
    }

    /// 以体素计数法估计体积 (mm³).
    ///
    /// 每层前景像素数乘以像素面积, 再乘以该层厚度. 层厚的推断规则与
    /// [`Annotation::estimate_volume`] 一致, 因此两种方法可直接比较.
    pub fn voxel_volume_mm3(&self, geometry: &ScanGeometry) -> f64 {
        let thicknesses = slice_thicknesses(&self.z_positions, geometry.slice_thickness());
        self.data
            .axis_iter(Axis(2))
            .zip(thicknesses)
            .map(|(s, t)| s.iter().filter(|v| **v).count() as f64 * t)
            .sum::<f64>()
            * geometry.pixel_area()
    }

    /// 将前景体素映射到全局坐标系 (绝对像素 x/y, 物理 z), 与
    /// [`Annotation::as_voxel_set`] 的坐标系一致.
    pub fn to_voxel_set(&self) -> VoxelSet {
        let (y0, x0) = (self.bbox.min(0).floor() as i64, self.bbox.min(1).floor() as i64);
        self.data
            .indexed_iter()
            .filter(|(_, v)| **v)
            .map(|((r, c, k), _)| Voxel::new(x0 + c as i64, y0 + r as i64, self.z_positions[k]))
            .collect()
    }
}

/// 栅格化所需的共享上下文: 包围盒, z 索引表和候选像素.
struct Raster {
    bbox: BoundingBox,
    z_positions: Vec<f64>,
    z_to_index: BTreeMap<OrderedFloat<f64>, usize>,
    nx: usize,
    ny: usize,
    /// 按 `(i, j)` 行优先排列的候选像素 `(floor(x_min) + i, floor(y_min) + j)`.
    candidates: Vec<Point2d>,
}

impl Raster {
    fn new(ann: &Annotation) -> Self {
        let bbox = ann.bbox();
        let z_positions = ann.distinct_z_positions();
        let z_to_index = z_positions
            .iter()
            .enumerate()
            .map(|(i, z)| (OrderedFloat(*z), i))
            .collect();
        let (nx, ny) = (bbox.pixel_len(0), bbox.pixel_len(1));
        let (x0, y0) = (bbox.min(0).floor(), bbox.min(1).floor());
        let candidates = itertools::iproduct!(0..nx, 0..ny)
            .map(|(i, j)| (x0 + i as f64, y0 + j as f64))
            .collect();
        Self {
            bbox,
            z_positions,
            z_to_index,
            nx,
            ny,
            candidates,
        }
    }

    /// 轮廓所在层的索引.
    #[inline]
    fn slice_index(&self, c: &Contour) -> usize {
        self.z_to_index[&OrderedFloat(c.z_position())]
    }

    /// 对全部候选像素运行包含测试.
    #[inline]
    fn containment(&self, c: &Contour) -> Vec<bool> {
        contains_points(&c.closed_points(), &self.candidates)
    }

    /// 按轮廓顺序组装掩膜. `layers` 中每一项为 (轮廓, 其包含测试结果).
    ///
    /// 先处理全部 inclusion 轮廓: 直接 **覆写** 所在层 (同层多条 inclusion
    /// 轮廓时后者覆盖前者); 再处理全部 exclusion 轮廓: 与所在层的取反结果求与.
    fn assemble(self, layers: &[(&Contour, Vec<bool>)]) -> BoolMask {
        let mut mask = Array3::<bool>::from_elem((self.nx, self.ny, self.z_positions.len()), false);
        let mut filled = vec![false; self.z_positions.len()];

        for (c, inside) in layers.iter().filter(|(c, _)| c.is_inclusion()) {
            let zi = self.slice_index(c);
            if filled[zi] {
                warn!(
                    "inclusion contour at z = {} overwrites an earlier one on the same slice",
                    c.z_position()
                );
            }
            filled[zi] = true;
            // 切片视图按 (i, j) 行优先迭代, 与候选像素顺序一致.
            let mut s = mask.index_axis_mut(Axis(2), zi);
            s.iter_mut().zip(inside).for_each(|(m, v)| *m = *v);
        }

        for (c, inside) in layers.iter().filter(|(c, _)| c.is_exclusion()) {
            let zi = self.slice_index(c);
            let mut s = mask.index_axis_mut(Axis(2), zi);
            s.iter_mut().zip(inside).for_each(|(m, v)| *m &= !*v);
        }

        // (x, y, z) -> (y, x, z).
        let data = mask.permuted_axes([1, 0, 2]).as_standard_layout().into_owned();
        BoolMask {
            data,
            bbox: self.bbox.swapped_xy(),
            z_positions: self.z_positions,
        }
    }
}

impl Annotation {
    /// 生成标注包围盒范围内的三维布尔掩膜. 各层按轮廓 z 位置升序排列.
    ///
    /// 在原始 `512 x 512 x 切片数` 的 CT 体数据中, 掩膜覆盖的像素为
    /// `floor(bbox.min(i))..=floor(bbox.max(i))`, `i = 0, 1` (轴顺序 `y`, `x`);
    /// z 方向覆盖轮廓出现过的全部切片.
    ///
    /// # 注意
    ///
    /// 1. 该方法不处理标注 "跳层" (某些中间切片没有轮廓) 的情况,
    ///   [`Annotation::to_volume`] 会处理它.
    /// 2. 同一层有多条 inclusion 轮廓时, 后出现者覆盖先出现者, 而不是取并集.
    /// 3. 退化或自相交轮廓不会报错, 结果由包含测试自然给出.
    ///
    /// 对相同输入多次调用的结果逐位一致.
    pub fn as_boolean_mask(&self) -> BoolMask {
        let raster = Raster::new(self);
        let layers: Vec<(&Contour, Vec<bool>)> = self
            .contours()
            .iter()
            .map(|c| (c, raster.containment(c)))
            .collect();
        raster.assemble(&layers)
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "rayon")] {
        use rayon::prelude::*;

        /// 并发操作部分
        impl Annotation {
            /// 借助 `rayon`, 并行地对每条轮廓运行包含测试, 再按轮廓顺序串行组装.
            /// 结果与 [`Self::as_boolean_mask`] 完全一致.
            pub fn par_as_boolean_mask(&self) -> BoolMask {
                let raster = Raster::new(self);
                let layers: Vec<(&Contour, Vec<bool>)> = self
                    .contours()
                    .par_iter()
                    .map(|c| (c, raster.containment(c)))
                    .collect();
                raster.assemble(&layers)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phantom::{self, SpherePhantom};

    fn geometry() -> ScanGeometry {
        ScanGeometry::new(1.0, 1.0).unwrap()
    }

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64, z: f64, inclusion: bool) -> Contour {
        Contour::new(phantom::rectangle(x0, y0, x1, y1), z, inclusion, format!("{z}")).unwrap()
    }

    #[test]
    fn test_mask_shape_and_axes() {
        // x: 10..=20, y: 30..=35, 两层.
        let ann = Annotation::new(
            1,
            1,
            geometry(),
            vec![rect(10.0, 30.0, 20.0, 35.0, 0.0, true), rect(12.0, 31.0, 18.0, 34.0, 2.0, true)],
        )
        .unwrap();
        let mask = ann.as_boolean_mask();
        assert_eq!(mask.shape(), (6, 11, 2));
        assert_eq!(mask.bbox().axis(0), [30.0, 35.0]);
        assert_eq!(mask.bbox().axis(1), [10.0, 20.0]);
        assert_eq!(mask.z_positions(), &[0.0, 2.0]);

        // 像素 (x = 15, y = 33) 位于两个矩形内部.
        assert!(mask.data()[(3, 5, 0)]);
        assert!(mask.data()[(3, 5, 1)]);
        // 像素 (x = 11, y = 33) 只在第一层矩形内.
        assert!(mask.data()[(3, 1, 0)]);
        assert!(!mask.data()[(3, 1, 1)]);
    }

    #[test]
    fn test_mask_idempotent() {
        let ann = SpherePhantom::new(6.0).annotation(1);
        let a = ann.as_boolean_mask();
        let b = ann.as_boolean_mask();
        assert_eq!(a, b);
        assert!(a.voxel_count() > 0);
    }

    #[test]
    fn test_exclusion_carves_hole() {
        let ann = Annotation::new(
            1,
            1,
            geometry(),
            vec![rect(0.0, 0.0, 20.0, 20.0, 5.0, true), rect(5.0, 5.0, 15.0, 15.0, 5.0, false)],
        )
        .unwrap();
        let mask = ann.as_boolean_mask();
        let s = mask.slice_at(0);
        for ((r, c), v) in s.indexed_iter() {
            let (x, y) = (c as f64, r as f64);
            let strictly_in_hole = x > 5.0 && x < 15.0 && y > 5.0 && y < 15.0;
            let in_annulus = x > 0.0
                && x < 20.0
                && y > 0.0
                && y < 20.0
                && (x < 5.0 || x > 15.0 || y < 5.0 || y > 15.0);
            if strictly_in_hole {
                assert!(!v, "({x}, {y}) should be carved");
            }
            if in_annulus {
                assert!(*v, "({x}, {y}) should be kept");
            }
        }
    }

    #[test]
    fn test_inclusion_overwrites() {
        // 覆写时会输出 warn 日志.
        let _ = simple_logger::SimpleLogger::new()
            .with_level(log::LevelFilter::Warn)
            .init();

        let ann = Annotation::new(
            1,
            1,
            geometry(),
            vec![rect(0.0, 0.0, 4.0, 10.0, 0.0, true), rect(6.0, 0.0, 10.0, 10.0, 0.0, true)],
        )
        .unwrap();
        let mask = ann.as_boolean_mask();
        // 左侧矩形被右侧矩形覆盖掉.
        assert!(!mask.data()[(5, 2, 0)]);
        assert!(mask.data()[(5, 8, 0)]);
    }

    #[test]
    fn test_voxel_volume_close_to_shoelace() {
        let sphere = SpherePhantom::new(10.0).with_center((200.3, 310.6));
        let ann = sphere.annotation(1);
        let shoelace = ann.estimate_volume();
        let counted = ann.as_boolean_mask().voxel_volume_mm3(ann.geometry());
        let rel = (counted - shoelace).abs() / shoelace;
        assert!(rel < 0.05, "relative error {rel}");
    }

    #[test]
    fn test_mask_agrees_with_voxel_set() {
        let sphere = SpherePhantom::new(5.0).snapped();
        let ann = sphere.annotation(1);
        assert_eq!(ann.as_boolean_mask().to_voxel_set(), ann.as_voxel_set());
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn test_par_mask_consistent() {
        let ann = SpherePhantom::new(8.0).annotation(1);
        assert_eq!(ann.as_boolean_mask(), ann.par_as_boolean_mask());
    }
}
