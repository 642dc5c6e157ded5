//! 直接基于轮廓几何 (不经栅格化) 的测量: 包围盒, 质心, 直径, 体积.

mod bbox;
mod diameter;
mod volume;

pub use bbox::BoundingBox;
pub use diameter::Diameter;

pub(crate) use volume::slice_thicknesses;

use crate::Annotation;

/// 一次标注的全部几何测量结果, 供报告 / 可视化协作方使用.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Measurements {
    /// 标注 id.
    pub annotation_id: u64,

    /// 包围盒, 三个轴依次为 `x`, `y`, `z`.
    pub bbox: BoundingBox,

    /// 质心.
    pub centroid: [f64; 3],

    /// 最大轴向直径. 所有轮廓都是单点时为 `None`.
    pub diameter: Option<Diameter>,

    /// 体积 (mm³).
    pub volume: f64,
}

impl Annotation {
    /// 一次性计算包围盒, 质心, 直径和体积.
    pub fn measure(&self) -> Measurements {
        Measurements {
            annotation_id: self.id(),
            bbox: self.bbox(),
            centroid: self.centroid(),
            diameter: self.estimate_diameter(),
            volume: self.estimate_volume(),
        }
    }
}

/// 依次测量一批标注.
pub fn measure_all(annotations: &[Annotation]) -> Vec<Measurements> {
    annotations.iter().map(Annotation::measure).collect()
}

cfg_if::cfg_if! {
    if #[cfg(feature = "rayon")] {
        use rayon::prelude::*;

        /// 借助 `rayon`, 并行地测量一批标注. 结果顺序与输入一致.
        pub fn par_measure_all(annotations: &[Annotation]) -> Vec<Measurements> {
            annotations.par_iter().map(Annotation::measure).collect()
        }
    }
}
